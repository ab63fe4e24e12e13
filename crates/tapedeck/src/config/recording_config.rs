use crate::config::{default_max_duration_secs, default_tick_interval_ms};

use serde::{Deserialize, Serialize};
use tapedeck_core::capture::{EncodingDescriptor, default_encodings};

/// Recording session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Net recording time after which a session stops on its own.
    #[serde(default = "default_max_duration_secs")]
    pub max_duration_secs: u64,

    /// Elapsed-time polling period.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Candidate encodings, most preferred first.
    #[serde(default = "default_encodings")]
    pub encodings: Vec<EncodingDescriptor>,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            max_duration_secs: default_max_duration_secs(),
            tick_interval_ms: default_tick_interval_ms(),
            encodings: default_encodings(),
        }
    }
}
