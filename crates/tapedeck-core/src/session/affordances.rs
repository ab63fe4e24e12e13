use crate::session::{SessionState, UserAction};

/// Caption of the pause/resume affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseLabel {
    /// Pressing it pauses.
    Pause,
    /// Pressing it resumes.
    Resume,
}

/// Enable flags for every input affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    /// Record enabled.
    pub record: bool,
    /// Pause/resume enabled.
    pub pause: bool,
    /// Pause/resume caption.
    pub pause_label: PauseLabel,
    /// Stop enabled.
    pub stop: bool,
    /// Save enabled.
    pub save: bool,
    /// Reset enabled.
    pub reset: bool,
}

impl Affordances {
    /// Derives the flags from `state` through its guard table.
    pub fn for_state(state: SessionState) -> Self {
        Self {
            record: state.accepts(UserAction::Record),
            pause: state.accepts(UserAction::TogglePause),
            pause_label: if state == SessionState::Paused {
                PauseLabel::Resume
            } else {
                PauseLabel::Pause
            },
            stop: state.accepts(UserAction::Stop),
            save: state.accepts(UserAction::Save),
            reset: state.accepts(UserAction::Reset),
        }
    }

    /// Whether the affordance for `action` is enabled.
    pub fn allows(&self, action: UserAction) -> bool {
        match action {
            UserAction::Record => self.record,
            UserAction::TogglePause => self.pause,
            UserAction::Stop => self.stop,
            UserAction::Save => self.save,
            UserAction::Reset => self.reset,
        }
    }
}
