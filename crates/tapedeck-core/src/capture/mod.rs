//! Microphone capture: encoding negotiation, chunk buffering and the capture pipeline.

mod artifact;
mod chunk_buffer;
mod negotiator;
mod pipeline;
mod traits;

pub use {
    artifact::RecordingArtifact,
    chunk_buffer::ChunkBuffer,
    negotiator::{EncodingChoice, EncodingDescriptor, default_encodings, select_encoding},
    pipeline::{CapturePipeline, PipelinePhase},
    traits::{AnalysisTap, CaptureBackend, ChunkEncoder, MicrophoneStream},
};
