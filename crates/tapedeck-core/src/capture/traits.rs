//! Capability interfaces consumed by the capture pipeline.
//!
//! The environment (native host, test fakes) implements these; the core
//! never touches a device, an encoder library, or a clock source directly.

use crate::{CoreResult, capture::EncodingChoice};

/// Read-only source of frequency-domain magnitudes.
pub trait AnalysisTap {
    /// Number of frequency bins the tap produces per sample.
    fn bin_count(&self) -> usize;

    /// Fills `out` with the current magnitudes, one byte (0..=255) per bin.
    ///
    /// When `out` is longer than [`bin_count`](Self::bin_count) the
    /// remainder is zeroed; when shorter, the tap writes the first
    /// `out.len()` bins.
    fn frequency_data(&mut self, out: &mut [u8]);
}

/// An open microphone input handle.
pub trait MicrophoneStream: AnalysisTap {
    /// Releases the underlying input device. Must be idempotent.
    fn release(&mut self);
}

/// Encoder sink fed by the open microphone stream.
pub trait ChunkEncoder {
    /// Begins producing chunks.
    fn start(&mut self) -> CoreResult<()>;

    /// Suspends encoding without dropping anything already produced.
    fn pause(&mut self) -> CoreResult<()>;

    /// Continues encoding after [`pause`](Self::pause).
    fn resume(&mut self) -> CoreResult<()>;

    /// Takes every chunk produced since the previous call.
    ///
    /// Chunk sizes and timing are unspecified; an empty vector is normal.
    fn take_chunks(&mut self) -> Vec<Vec<u8>>;

    /// Finalizes encoding and returns any trailing chunks.
    fn finish(&mut self) -> CoreResult<Vec<Vec<u8>>>;

    /// Wraps the concatenated chunk payload in its final container.
    fn seal(&mut self, payload: Vec<u8>) -> CoreResult<Vec<u8>> {
        Ok(payload)
    }
}

/// The capture environment: format support, microphone access, encoders.
pub trait CaptureBackend {
    /// Whether the environment can encode `mime_type`.
    fn supports_encoding(&self, mime_type: &str) -> bool;

    /// Acquires exclusive access to the microphone.
    ///
    /// # Errors
    ///
    /// [`CoreError::PermissionDenied`](crate::CoreError::PermissionDenied)
    /// when access is refused or no input exists.
    fn acquire_microphone(&mut self) -> CoreResult<Box<dyn MicrophoneStream>>;

    /// Builds an encoder attached to the currently open microphone stream.
    fn create_encoder(&mut self, encoding: &EncodingChoice) -> CoreResult<Box<dyn ChunkEncoder>>;
}
