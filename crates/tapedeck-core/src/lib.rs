//! Tapedeck Core Library
//!
//! Microphone recording session controller: a state machine that drives a
//! capture pipeline, a pause-aware session clock with a maximum-duration
//! auto-stop, and a bar-spectrum visualizer. Devices, encoders, pixels,
//! timers and storage are capabilities supplied by the host.
//!
//! # Example
//!
//! ```no_run
//! use tapedeck_core::{Collaborators, SessionMachine, SessionSettings, UserAction};
//!
//! use std::time::Instant;
//!
//! fn run(collaborators: Collaborators) {
//!     let mut machine = SessionMachine::new(SessionSettings::default(), collaborators);
//!
//!     machine.dispatch(UserAction::Record, Instant::now());
//!     // ... the host forwards frame and tick callbacks ...
//!     machine.dispatch(UserAction::Stop, Instant::now());
//!     machine.dispatch(UserAction::Save, Instant::now());
//! }
//! ```

pub mod capture;
pub mod clock;
mod error;
pub mod scheduler;
pub mod session;
pub mod visualizer;

pub use {
    error::CoreError,
    error::Result as CoreResult,
    session::{
        Affordances, ArtifactSink, Collaborators, ControlPanel, SessionMachine, SessionSettings,
        SessionState, StatusMessage, UserAction,
    },
};

#[cfg(test)]
mod tests;
