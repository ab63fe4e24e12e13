//! Recording session lifecycle, affordances and status messages.

mod affordances;
mod collaborators;
mod machine;
mod settings;
mod state;
mod status;
mod user_action;

pub use {
    affordances::{Affordances, PauseLabel},
    collaborators::{ArtifactSink, Collaborators, ControlPanel},
    machine::SessionMachine,
    settings::{DEFAULT_MAX_DURATION, DEFAULT_SPECTRUM_BINS, DEFAULT_TICK_INTERVAL, SessionSettings},
    state::SessionState,
    status::StatusMessage,
    user_action::UserAction,
};
