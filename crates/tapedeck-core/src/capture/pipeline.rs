use crate::{
    CoreError, CoreResult,
    capture::{
        AnalysisTap, CaptureBackend, ChunkBuffer, ChunkEncoder, EncodingChoice, EncodingDescriptor,
        MicrophoneStream, RecordingArtifact, select_encoding,
    },
};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

/// Encoding phase of an open pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelinePhase {
    /// Microphone open, no encoder running.
    Ready,
    /// Encoder running and producing chunks.
    Encoding,
    /// Encoder suspended; buffered chunks retained.
    Suspended,
}

impl PipelinePhase {
    fn as_str(self) -> &'static str {
        match self {
            PipelinePhase::Ready => "ready",
            PipelinePhase::Encoding => "encoding",
            PipelinePhase::Suspended => "suspended",
        }
    }
}

/// Microphone stream, analysis tap and encoder sink for one machine.
///
/// Holds the microphone for as long as it lives; dropping the pipeline
/// releases it. The negotiated [`EncodingChoice`] lives here too, so it is
/// reused by every session until the pipeline is torn down.
pub struct CapturePipeline {
    stream: Box<dyn MicrophoneStream>,
    encoding: EncodingChoice,
    encoder: Option<Box<dyn ChunkEncoder>>,
    chunks: ChunkBuffer,
    phase: PipelinePhase,
}

impl CapturePipeline {
    /// Acquires the microphone and negotiates an encoding.
    ///
    /// # Errors
    ///
    /// `PermissionDenied` if the microphone is refused, `NoEncodingSupported`
    /// if no candidate is supported. Nothing is retained on failure.
    #[track_caller]
    #[instrument(skip_all)]
    pub fn open(
        backend: &mut dyn CaptureBackend,
        candidates: &[EncodingDescriptor],
    ) -> CoreResult<Self> {
        let mut stream = backend.acquire_microphone()?;

        let encoding = match select_encoding(candidates, |mime| backend.supports_encoding(mime)) {
            Ok(encoding) => encoding,
            Err(e) => {
                stream.release();
                return Err(e);
            }
        };

        info!(
            mime_type = encoding.mime_type(),
            bins = stream.bin_count(),
            "Capture pipeline opened"
        );

        Ok(Self {
            stream,
            encoding,
            encoder: None,
            chunks: ChunkBuffer::default(),
            phase: PipelinePhase::Ready,
        })
    }

    /// Builds an encoder for the open stream and starts it.
    #[track_caller]
    #[instrument(skip_all)]
    pub fn start(&mut self, backend: &mut dyn CaptureBackend) -> CoreResult<()> {
        self.expect_phase("start", &[PipelinePhase::Ready])?;

        self.chunks.clear();
        let mut encoder = backend.create_encoder(&self.encoding)?;
        encoder.start()?;
        self.encoder = Some(encoder);
        self.phase = PipelinePhase::Encoding;

        info!(mime_type = self.encoding.mime_type(), "Encoding started");

        Ok(())
    }

    /// Suspends encoding. Already buffered chunks are kept.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn pause(&mut self) -> CoreResult<()> {
        self.expect_phase("pause", &[PipelinePhase::Encoding])?;

        if let Some(encoder) = self.encoder.as_mut() {
            encoder.pause()?;
        }
        self.collect();
        self.phase = PipelinePhase::Suspended;

        debug!(buffered_bytes = self.chunks.total_bytes(), "Encoding paused");

        Ok(())
    }

    /// Continues a suspended encoder.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn resume(&mut self) -> CoreResult<()> {
        self.expect_phase("resume", &[PipelinePhase::Suspended])?;

        if let Some(encoder) = self.encoder.as_mut() {
            encoder.resume()?;
        }
        self.phase = PipelinePhase::Encoding;

        debug!("Encoding resumed");

        Ok(())
    }

    /// Moves every chunk the encoder has produced into the buffer.
    ///
    /// Returns the number of chunks appended.
    pub fn collect(&mut self) -> usize {
        let Some(encoder) = self.encoder.as_mut() else {
            return 0;
        };

        let mut appended = 0;
        for chunk in encoder.take_chunks() {
            if !chunk.is_empty() {
                appended += 1;
            }
            self.chunks.push(chunk);
        }
        appended
    }

    /// Finalizes the encoder and assembles the artifact.
    ///
    /// The pipeline returns to [`PipelinePhase::Ready`] whether or not
    /// finalization succeeds; the microphone stays open.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn stop(&mut self) -> CoreResult<RecordingArtifact> {
        self.expect_phase("stop", &[PipelinePhase::Encoding, PipelinePhase::Suspended])?;

        self.collect();
        self.phase = PipelinePhase::Ready;

        let Some(mut encoder) = self.encoder.take() else {
            self.chunks.clear();
            return Err(CoreError::EncoderError {
                reason: "Encoder missing while stopping".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let trailing = match encoder.finish() {
            Ok(trailing) => trailing,
            Err(e) => {
                self.chunks.clear();
                return Err(e);
            }
        };
        for chunk in trailing {
            self.chunks.push(chunk);
        }

        let chunk_count = self.chunks.len();
        let payload = self.chunks.drain_concat();
        let bytes = encoder.seal(payload)?;

        info!(
            chunks = chunk_count,
            bytes = bytes.len(),
            suffix = self.encoding.suffix(),
            "Recording finalized"
        );

        Ok(RecordingArtifact::new(bytes, self.encoding.clone()))
    }

    /// Drops any running encoder and every buffered chunk.
    #[instrument(skip(self))]
    pub fn discard(&mut self) {
        if let Some(mut encoder) = self.encoder.take()
            && let Err(e) = encoder.finish()
        {
            warn!(error = ?e, "Encoder failed to finish while discarding");
        }
        self.chunks.clear();
        self.phase = PipelinePhase::Ready;
    }

    /// Tears the pipeline down and releases the microphone.
    pub fn close(self) {
        drop(self);
    }

    /// The encoding negotiated when the pipeline was opened.
    pub fn encoding(&self) -> &EncodingChoice {
        &self.encoding
    }

    /// Current encoding phase.
    pub fn phase(&self) -> PipelinePhase {
        self.phase
    }

    /// Bytes currently buffered.
    pub fn buffered_bytes(&self) -> usize {
        self.chunks.total_bytes()
    }

    #[track_caller]
    fn expect_phase(&self, operation: &'static str, allowed: &[PipelinePhase]) -> CoreResult<()> {
        if allowed.contains(&self.phase) {
            return Ok(());
        }
        Err(CoreError::InvalidPipelineState {
            operation,
            phase: self.phase.as_str(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

impl Drop for CapturePipeline {
    fn drop(&mut self) {
        self.discard();
        self.stream.release();
        info!("Capture pipeline closed");
    }
}

impl AnalysisTap for CapturePipeline {
    fn bin_count(&self) -> usize {
        self.stream.bin_count()
    }

    fn frequency_data(&mut self, out: &mut [u8]) {
        self.stream.frequency_data(out);
    }
}
