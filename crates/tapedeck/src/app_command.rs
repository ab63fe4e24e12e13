use crate::{AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;
use tapedeck_core::UserAction;

/// Commands typed on stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Forward a transition request to the session machine.
    Session(UserAction),
    /// Print the key list.
    Help,
    /// Release the microphone and exit.
    Quit,
}

impl AppCommand {
    /// Parses one input line. Matching is case-insensitive; the first
    /// letter of each word is accepted as a shortcut.
    #[track_caller]
    pub fn parse(line: &str) -> AppResult<Self> {
        let input = line.trim().to_ascii_lowercase();

        let command = match input.as_str() {
            "r" | "record" => AppCommand::Session(UserAction::Record),
            "p" | "pause" | "resume" => AppCommand::Session(UserAction::TogglePause),
            "s" | "stop" => AppCommand::Session(UserAction::Stop),
            "w" | "write" | "save" => AppCommand::Session(UserAction::Save),
            "x" | "reset" => AppCommand::Session(UserAction::Reset),
            "h" | "?" | "help" => AppCommand::Help,
            "q" | "quit" | "exit" => AppCommand::Quit,
            _ => {
                return Err(AppError::InvalidCommand {
                    input,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        Ok(command)
    }
}

/// Input shortcut for each session action.
pub(crate) fn shortcut(action: UserAction) -> &'static str {
    match action {
        UserAction::Record => "r",
        UserAction::TogglePause => "p",
        UserAction::Stop => "s",
        UserAction::Save => "w",
        UserAction::Reset => "x",
    }
}
