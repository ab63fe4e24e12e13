//! Cooperative scheduling seam.
//!
//! The host owns the event loop. The core asks it for display-refresh
//! frames and periodic ticks and receives them back as calls carrying the
//! [`TaskHandle`] it was given. Whatever fires with a handle that is no
//! longer armed is stale and gets ignored.

use std::time::Duration;

/// Identifies one scheduled frame or ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

impl TaskHandle {
    /// Wraps a host-assigned id. Ids must be unique per scheduler.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The host-assigned id.
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Host event loop, as seen from the core.
pub trait Scheduler {
    /// Schedules a single callback at the next display refresh.
    fn request_frame(&mut self) -> TaskHandle;

    /// Schedules a repeating callback every `period`, first one a full
    /// period from now.
    fn start_ticker(&mut self, period: Duration) -> TaskHandle;

    /// Cancels a pending frame or ticker. Unknown handles are ignored.
    fn cancel(&mut self, handle: TaskHandle);
}

/// Armed flag for a cancellable, host-scheduled task.
#[derive(Debug, Default)]
pub struct CancellableTask {
    armed: Option<TaskHandle>,
}

impl CancellableTask {
    /// Records `handle` as the only invocation allowed to run.
    pub fn arm(&mut self, handle: TaskHandle) {
        self.armed = Some(handle);
    }

    /// Disarms and returns the handle that must be cancelled with the host.
    pub fn disarm(&mut self) -> Option<TaskHandle> {
        self.armed.take()
    }

    /// Whether `handle` is the armed invocation.
    pub fn matches(&self, handle: TaskHandle) -> bool {
        self.armed == Some(handle)
    }

    /// Consumes a one-shot invocation: true and disarmed if `handle` was
    /// armed, false (and unchanged) otherwise.
    pub fn fire(&mut self, handle: TaskHandle) -> bool {
        if self.matches(handle) {
            self.armed = None;
            true
        } else {
            false
        }
    }

    /// Whether an invocation is pending.
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}
