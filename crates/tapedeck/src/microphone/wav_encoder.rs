use crate::microphone::SharedCapture;

use std::{io::Cursor, panic::Location, sync::Arc};

use error_location::ErrorLocation;
use hound::{SampleFormat, WavSpec, WavWriter};
use tapedeck_core::{CoreError, CoreResult, capture::ChunkEncoder};
use tracing::{debug, instrument, warn};

/// The only encoding the native backend produces.
pub(crate) const WAV_MIME_TYPE: &str = "audio/wav";

/// Emits 16-bit little-endian mono PCM chunks and seals them into a
/// RIFF/WAV container.
pub(crate) struct WavEncoder {
    capture: Arc<SharedCapture>,
    sample_rate: u32,
    samples_encoded: usize,
}

impl WavEncoder {
    pub(crate) fn new(capture: Arc<SharedCapture>, sample_rate: u32) -> Self {
        Self {
            capture,
            sample_rate,
            samples_encoded: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn samples_encoded(&self) -> usize {
        self.samples_encoded
    }

    fn drain_chunk(&mut self) -> Option<Vec<u8>> {
        let dropped = self.capture.take_dropped();
        if dropped > 0 {
            warn!(
                dropped_samples = dropped,
                "Capture backlog overflowed, oldest samples dropped from the recording"
            );
        }

        let samples = self.capture.take_pending();
        if samples.is_empty() {
            return None;
        }
        self.samples_encoded += samples.len();
        Some(encode_pcm16(&samples))
    }
}

impl ChunkEncoder for WavEncoder {
    fn start(&mut self) -> CoreResult<()> {
        // Discard anything captured before this recording.
        let _ = self.capture.take_pending();
        let _ = self.capture.take_dropped();
        self.samples_encoded = 0;
        self.capture.set_encoding(true);
        Ok(())
    }

    fn pause(&mut self) -> CoreResult<()> {
        self.capture.set_encoding(false);
        Ok(())
    }

    fn resume(&mut self) -> CoreResult<()> {
        self.capture.set_encoding(true);
        Ok(())
    }

    fn take_chunks(&mut self) -> Vec<Vec<u8>> {
        self.drain_chunk().into_iter().collect()
    }

    #[track_caller]
    fn finish(&mut self) -> CoreResult<Vec<Vec<u8>>> {
        self.capture.set_encoding(false);
        if self.capture.is_shut_down() {
            return Err(CoreError::EncoderError {
                reason: "Microphone was released before the encoder finished".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        let trailing = self.drain_chunk().into_iter().collect();
        debug!(samples = self.samples_encoded, "WAV encoder finished");
        Ok(trailing)
    }

    #[track_caller]
    #[instrument(skip(self, payload), fields(bytes = payload.len()))]
    fn seal(&mut self, payload: Vec<u8>) -> CoreResult<Vec<u8>> {
        let spec = WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::with_capacity(payload.len() + 44));
        let mut writer =
            WavWriter::new(&mut cursor, spec).map_err(|e| CoreError::EncoderError {
                reason: format!("Failed to write WAV header: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        for pair in payload.chunks_exact(2) {
            writer
                .write_sample(i16::from_le_bytes([pair[0], pair[1]]))
                .map_err(|e| CoreError::EncoderError {
                    reason: format!("Failed to write WAV sample: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
        }

        writer.finalize().map_err(|e| CoreError::EncoderError {
            reason: format!("Failed to finalize WAV: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(cursor.into_inner())
    }
}

/// Clamps to `[-1, 1]` and converts to 16-bit little-endian PCM.
pub(crate) fn encode_pcm16(samples: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}
