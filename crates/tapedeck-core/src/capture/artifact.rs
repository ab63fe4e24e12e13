use crate::capture::EncodingChoice;

use std::time::Duration;

/// The finished output of one recording session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingArtifact {
    bytes: Vec<u8>,
    encoding: EncodingChoice,
    duration: Duration,
}

impl RecordingArtifact {
    /// Wraps sealed `bytes` produced with `encoding`.
    pub fn new(bytes: Vec<u8>, encoding: EncodingChoice) -> Self {
        Self {
            bytes,
            encoding,
            duration: Duration::ZERO,
        }
    }

    /// Sets the net recorded duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Encoded bytes, container included.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// File suffix for the artifact's encoding, without the dot.
    pub fn suffix(&self) -> &str {
        self.encoding.suffix()
    }

    /// MIME type the artifact was encoded with.
    pub fn mime_type(&self) -> &str {
        self.encoding.mime_type()
    }

    /// Net recorded time, pauses excluded.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Size of the artifact in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the artifact holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
