use crate::{CoreError, clock::format_elapsed};

use std::{fmt, time::Duration};

/// User-visible status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    /// Idle and ready.
    Ready,
    /// A recording started.
    Recording,
    /// The recording was paused.
    Paused,
    /// The recording was resumed.
    Resumed,
    /// The user stopped the recording.
    Stopped,
    /// The maximum duration stopped the recording.
    AutoStopped {
        /// The configured maximum.
        limit: Duration,
    },
    /// The save collaborator accepted the artifact.
    Saved {
        /// Where the artifact went.
        location: String,
    },
    /// The save collaborator failed.
    SaveFailed,
    /// Save requested but finalization produced no artifact.
    NothingToSave,
    /// Microphone access was refused.
    PermissionDenied,
    /// No candidate encoding is supported.
    NoSupportedEncoding,
    /// The microphone or encoder failed to start.
    DeviceFailure,
    /// The encoder refused to pause; recording continues.
    PauseFailed,
    /// The encoder refused to resume; the recording stays paused.
    ResumeFailed,
    /// Stopped, but the encoder could not finalize the artifact.
    FinalizeFailed,
}

impl StatusMessage {
    /// Status shown for an error that aborted a record request.
    pub fn from_error(error: &CoreError) -> Self {
        match error {
            CoreError::PermissionDenied { .. } => StatusMessage::PermissionDenied,
            CoreError::NoEncodingSupported { .. } => StatusMessage::NoSupportedEncoding,
            CoreError::SaveFailed { .. } => StatusMessage::SaveFailed,
            CoreError::DeviceError { .. }
            | CoreError::EncoderError { .. }
            | CoreError::InvalidPipelineState { .. }
            | CoreError::InvalidSettings { .. } => StatusMessage::DeviceFailure,
        }
    }

    /// Whether the message reports a failure.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            StatusMessage::SaveFailed
                | StatusMessage::NothingToSave
                | StatusMessage::PermissionDenied
                | StatusMessage::NoSupportedEncoding
                | StatusMessage::DeviceFailure
                | StatusMessage::PauseFailed
                | StatusMessage::ResumeFailed
                | StatusMessage::FinalizeFailed
        )
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusMessage::Ready => write!(f, "Ready to record"),
            StatusMessage::Recording => write!(f, "Recording..."),
            StatusMessage::Paused => write!(f, "Recording paused"),
            StatusMessage::Resumed => write!(f, "Recording resumed"),
            StatusMessage::Stopped => write!(f, "Recording stopped"),
            StatusMessage::AutoStopped { limit } => write!(
                f,
                "Maximum recording time of {} reached, recording stopped",
                format_elapsed(*limit)
            ),
            StatusMessage::Saved { location } => write!(f, "Recording saved to {location}"),
            StatusMessage::SaveFailed => write!(f, "Could not save the recording"),
            StatusMessage::NothingToSave => write!(f, "Nothing to save"),
            StatusMessage::PermissionDenied => write!(f, "Microphone access denied"),
            StatusMessage::NoSupportedEncoding => write!(f, "No supported recording format"),
            StatusMessage::DeviceFailure => write!(f, "Could not start the microphone"),
            StatusMessage::PauseFailed => write!(f, "Could not pause, still recording"),
            StatusMessage::ResumeFailed => write!(f, "Could not resume, still paused"),
            StatusMessage::FinalizeFailed => {
                write!(f, "Recording stopped, but it could not be finalized")
            }
        }
    }
}
