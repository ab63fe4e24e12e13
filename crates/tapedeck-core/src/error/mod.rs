use error_location::ErrorLocation;
use thiserror::Error;

/// Recording core errors with source location tracking.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Microphone access was refused or no input device is available.
    #[error("Microphone access denied: {reason} {location}")]
    PermissionDenied {
        /// Why access could not be obtained.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// None of the candidate encodings is supported by the environment.
    #[error("No supported encoding among {candidates:?} {location}")]
    NoEncodingSupported {
        /// MIME types that were probed, in priority order.
        candidates: Vec<String>,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Audio input device operation failed.
    #[error("Audio device error: {reason} {location}")]
    DeviceError {
        /// Description of the device error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The encoder could not be created, fed, or finalized.
    #[error("Encoder error: {reason} {location}")]
    EncoderError {
        /// Description of the encoder error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A pipeline operation was requested in a phase that does not allow it.
    #[error("Cannot {operation} while pipeline is {phase} {location}")]
    InvalidPipelineState {
        /// The rejected operation.
        operation: &'static str,
        /// The phase the pipeline was in.
        phase: &'static str,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Session settings the machine cannot run with.
    #[error("Invalid session settings: {reason} {location}")]
    InvalidSettings {
        /// Which setting is unusable.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The save collaborator failed to persist an artifact.
    #[error("Save failed: {reason} {location}")]
    SaveFailed {
        /// Description of the save failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
