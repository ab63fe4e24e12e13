use crate::session::UserAction;

/// Lifecycle state of the recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nothing recorded, ready to start.
    #[default]
    Idle,
    /// Capturing audio.
    Recording,
    /// Capture suspended, session still open.
    Paused,
    /// Capture finished, artifact available.
    Stopped,
}

impl SessionState {
    /// Guard table: whether `action` is valid in this state.
    pub fn accepts(self, action: UserAction) -> bool {
        matches!(
            (self, action),
            (SessionState::Idle, UserAction::Record)
                | (
                    SessionState::Recording | SessionState::Paused,
                    UserAction::TogglePause | UserAction::Stop
                )
                | (SessionState::Stopped, UserAction::Save | UserAction::Reset)
        )
    }

    /// Whether capture is open (recording or paused).
    pub fn is_active(self) -> bool {
        matches!(self, SessionState::Recording | SessionState::Paused)
    }

    /// Short lowercase name for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Recording => "recording",
            SessionState::Paused => "paused",
            SessionState::Stopped => "stopped",
        }
    }
}
