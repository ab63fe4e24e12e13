//! Pause-aware session clock with a maximum-duration auto-stop.

mod accounting;
mod session_clock;

pub use {
    accounting::ElapsedAccounting,
    session_clock::{ClockReading, SessionClock, format_elapsed},
};
