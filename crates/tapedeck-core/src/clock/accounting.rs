use std::time::{Duration, Instant};

/// Wall-clock bookkeeping for one session, pauses excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedAccounting {
    started_at: Instant,
    paused_total: Duration,
    paused_at: Option<Instant>,
}

impl ElapsedAccounting {
    /// Starts accounting at `now`.
    pub fn new(now: Instant) -> Self {
        Self {
            started_at: now,
            paused_total: Duration::ZERO,
            paused_at: None,
        }
    }

    /// Marks the start of a pause. Ignored if already paused.
    pub fn pause(&mut self, now: Instant) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    /// Folds the current pause into the paused total. Ignored if not paused.
    pub fn resume(&mut self, now: Instant) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += now.saturating_duration_since(paused_at);
        }
    }

    /// Net recorded time at `now`.
    ///
    /// While paused the reading is frozen at the pause instant, so it never
    /// moves backwards across a pause/resume pair.
    pub fn net_elapsed(&self, now: Instant) -> Duration {
        let end = self.paused_at.unwrap_or(now);
        end.saturating_duration_since(self.started_at)
            .saturating_sub(self.paused_total)
    }

    /// Total time spent paused, including an open pause up to `now`.
    pub fn paused_total(&self, now: Instant) -> Duration {
        match self.paused_at {
            Some(paused_at) => self.paused_total + now.saturating_duration_since(paused_at),
            None => self.paused_total,
        }
    }

    /// Whether a pause is open.
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }
}
