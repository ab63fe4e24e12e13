use crate::clock::ElapsedAccounting;

use std::time::{Duration, Instant};

use tracing::{debug, info};

/// Result of one clock poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockReading {
    /// Net elapsed time; the session may continue.
    Elapsed(Duration),
    /// The maximum duration was reached. Carries the elapsed time, clamped
    /// to the maximum.
    AutoStop(Duration),
}

/// Tracks net recording time and reports when the maximum is reached.
///
/// The clock only reports; acting on [`ClockReading::AutoStop`] is the
/// caller's job.
#[derive(Debug)]
pub struct SessionClock {
    max_duration: Duration,
    accounting: Option<ElapsedAccounting>,
    auto_stop_reported: bool,
}

impl SessionClock {
    /// Creates an idle clock with the given maximum session length.
    pub fn new(max_duration: Duration) -> Self {
        Self {
            max_duration,
            accounting: None,
            auto_stop_reported: false,
        }
    }

    /// Starts a fresh session at `now`, discarding previous accounting.
    pub fn start(&mut self, now: Instant) {
        self.accounting = Some(ElapsedAccounting::new(now));
        self.auto_stop_reported = false;
        debug!("Session clock started");
    }

    /// Opens a pause at `now`.
    pub fn pause(&mut self, now: Instant) {
        if let Some(accounting) = self.accounting.as_mut() {
            accounting.pause(now);
        }
    }

    /// Closes the open pause at `now`.
    pub fn resume(&mut self, now: Instant) {
        if let Some(accounting) = self.accounting.as_mut() {
            accounting.resume(now);
        }
    }

    /// Stops the clock and returns the final net elapsed time.
    pub fn stop(&mut self, now: Instant) -> Duration {
        let elapsed = self.elapsed(now);
        self.accounting = None;
        debug!(elapsed_ms = elapsed.as_millis(), "Session clock stopped");
        elapsed
    }

    /// Drops the session's accounting without reading it.
    pub fn reset(&mut self) {
        self.accounting = None;
        self.auto_stop_reported = false;
    }

    /// Polls the clock.
    ///
    /// Reports [`ClockReading::AutoStop`] exactly once per session, the
    /// first time net elapsed reaches the maximum.
    pub fn tick(&mut self, now: Instant) -> ClockReading {
        let elapsed = self.elapsed(now);

        if elapsed >= self.max_duration && !self.auto_stop_reported && self.accounting.is_some() {
            self.auto_stop_reported = true;
            info!(
                elapsed_ms = elapsed.as_millis(),
                max_ms = self.max_duration.as_millis(),
                "Maximum recording duration reached"
            );
            return ClockReading::AutoStop(self.max_duration);
        }

        ClockReading::Elapsed(elapsed)
    }

    /// Net elapsed time at `now`, zero when not running.
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.accounting
            .map(|a| a.net_elapsed(now))
            .unwrap_or(Duration::ZERO)
    }

    /// Current accounting, if a session is running.
    pub fn accounting(&self) -> Option<&ElapsedAccounting> {
        self.accounting.as_ref()
    }

    /// Configured maximum session length.
    pub fn max_duration(&self) -> Duration {
        self.max_duration
    }
}

/// Renders a duration as `mm:ss`. Minutes are not wrapped at 60.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}
