use crate::{
    CoreError, CoreResult,
    capture::{EncodingDescriptor, default_encodings},
};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;

/// Default maximum session length.
pub const DEFAULT_MAX_DURATION: Duration = Duration::from_secs(60 * 60);
/// Default clock polling period.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);
/// Default number of spectrum bars.
pub const DEFAULT_SPECTRUM_BINS: usize = 128;

/// Tunables for a [`SessionMachine`](crate::SessionMachine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Net recording time after which the session auto-stops.
    pub max_duration: Duration,
    /// Clock polling period. Auto-stop can lag the maximum by up to one
    /// period.
    pub tick_interval: Duration,
    /// Candidate encodings in priority order.
    pub encodings: Vec<EncodingDescriptor>,
    /// Frequency bins sampled (and bars painted) per frame.
    pub spectrum_bins: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_duration: DEFAULT_MAX_DURATION,
            tick_interval: DEFAULT_TICK_INTERVAL,
            encodings: default_encodings(),
            spectrum_bins: DEFAULT_SPECTRUM_BINS,
        }
    }
}

impl SessionSettings {
    /// Rejects settings that would stall the clock or render nothing.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidSettings`] naming the first unusable field.
    #[track_caller]
    pub fn validate(&self) -> CoreResult<()> {
        let problem = if self.max_duration.is_zero() {
            Some("max_duration must be greater than zero")
        } else if self.tick_interval.is_zero() {
            Some("tick_interval must be greater than zero")
        } else if self.encodings.is_empty() {
            Some("encodings must list at least one candidate")
        } else if self.spectrum_bins == 0 {
            Some("spectrum_bins must be greater than zero")
        } else {
            None
        };

        match problem {
            Some(reason) => Err(CoreError::InvalidSettings {
                reason: reason.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
            None => Ok(()),
        }
    }
}
