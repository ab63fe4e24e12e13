use crate::{app_command::shortcut, terminal::SharedScreen};

use tapedeck_core::{Affordances, ControlPanel, StatusMessage, UserAction, session::PauseLabel};
use tracing::{info, warn};

/// [`ControlPanel`] printing status lines and the enabled keys.
pub(crate) struct TerminalPanel {
    screen: SharedScreen,
}

impl TerminalPanel {
    pub(crate) fn new(screen: SharedScreen) -> Self {
        Self { screen }
    }
}

impl ControlPanel for TerminalPanel {
    fn show_status(&mut self, status: &StatusMessage) {
        if status.is_error() {
            warn!(status = %status, "Status");
        } else {
            info!(status = %status, "Status");
        }
        self.screen.borrow_mut().log_line(&status.to_string());
    }

    fn show_elapsed(&mut self, elapsed: &str) {
        self.screen.borrow_mut().set_elapsed(elapsed);
    }

    fn set_affordances(&mut self, affordances: Affordances) {
        self.screen.borrow_mut().set_keys(key_list(affordances));
    }
}

/// Enabled actions as `key=label` pairs plus quit and help.
pub(crate) fn key_list(affordances: Affordances) -> String {
    let mut keys: Vec<String> = UserAction::ALL
        .iter()
        .filter(|action| affordances.allows(**action))
        .map(|action| format!("{}={}", shortcut(*action), label(*action, affordances)))
        .collect();
    keys.push("h=help".to_string());
    keys.push("q=quit".to_string());
    keys.join("  ")
}

fn label(action: UserAction, affordances: Affordances) -> &'static str {
    match action {
        UserAction::Record => "record",
        UserAction::TogglePause => match affordances.pause_label {
            PauseLabel::Pause => "pause",
            PauseLabel::Resume => "resume",
        },
        UserAction::Stop => "stop",
        UserAction::Save => "save",
        UserAction::Reset => "reset",
    }
}
