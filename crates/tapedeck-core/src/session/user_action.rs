/// Transition requests raised by the input affordances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserAction {
    /// Start a new recording.
    Record,
    /// Pause when recording, resume when paused.
    TogglePause,
    /// Finish the recording.
    Stop,
    /// Hand the finished recording to the save collaborator.
    Save,
    /// Discard the finished recording and return to idle.
    Reset,
}

impl UserAction {
    /// Every action, in affordance order.
    pub const ALL: [UserAction; 5] = [
        UserAction::Record,
        UserAction::TogglePause,
        UserAction::Stop,
        UserAction::Save,
        UserAction::Reset,
    ];
}
