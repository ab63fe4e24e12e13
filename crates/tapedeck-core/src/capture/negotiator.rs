use crate::{CoreError, CoreResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// A candidate capture encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingDescriptor {
    /// MIME type probed against the environment, e.g. `audio/webm;codecs=opus`.
    pub mime_type: String,
    /// File suffix for artifacts in this encoding, without the dot.
    pub suffix: String,
}

impl EncodingDescriptor {
    /// Creates a descriptor from borrowed parts.
    pub fn new(mime_type: &str, suffix: &str) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            suffix: suffix.to_string(),
        }
    }
}

/// The encoding negotiated for this machine. Immutable once selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingChoice {
    mime_type: String,
    suffix: String,
}

impl EncodingChoice {
    /// MIME type handed to the encoder.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Artifact file suffix, without the dot.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl From<&EncodingDescriptor> for EncodingChoice {
    fn from(descriptor: &EncodingDescriptor) -> Self {
        Self {
            mime_type: descriptor.mime_type.clone(),
            suffix: descriptor.suffix.clone(),
        }
    }
}

/// Candidate encodings, compressed and broadly compatible first.
pub fn default_encodings() -> Vec<EncodingDescriptor> {
    vec![
        EncodingDescriptor::new("audio/webm;codecs=opus", "webm"),
        EncodingDescriptor::new("audio/ogg;codecs=opus", "ogg"),
        EncodingDescriptor::new("audio/mp4", "m4a"),
        EncodingDescriptor::new("audio/wav", "wav"),
    ]
}

/// Returns the first candidate the environment reports as supported.
///
/// # Errors
///
/// [`CoreError::NoEncodingSupported`] when no candidate matches, including
/// when `candidates` is empty.
#[track_caller]
#[instrument(skip(candidates, is_supported), fields(candidates = candidates.len()))]
pub fn select_encoding<F>(
    candidates: &[EncodingDescriptor],
    is_supported: F,
) -> CoreResult<EncodingChoice>
where
    F: Fn(&str) -> bool,
{
    for candidate in candidates {
        if is_supported(&candidate.mime_type) {
            info!(
                mime_type = %candidate.mime_type,
                suffix = %candidate.suffix,
                "Encoding selected"
            );
            return Ok(EncodingChoice::from(candidate));
        }
        debug!(mime_type = %candidate.mime_type, "Encoding not supported");
    }

    Err(CoreError::NoEncodingSupported {
        candidates: candidates.iter().map(|c| c.mime_type.clone()).collect(),
        location: ErrorLocation::from(Location::caller()),
    })
}
