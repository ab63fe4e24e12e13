//! Cooperative scheduler on the current-thread tokio runtime.
//!
//! Timers run as tokio tasks that only post [`HostEvent`]s; the session
//! machine itself is driven from the single app loop, so no core state is
//! ever touched off that loop.

use crate::HostEvent;

use std::{collections::HashMap, time::Duration};

use tapedeck_core::scheduler::{Scheduler, TaskHandle};
use tokio::{sync::mpsc, task::JoinHandle, time};
use tracing::trace;

/// [`Scheduler`] backed by tokio timers.
pub struct TokioScheduler {
    events: mpsc::UnboundedSender<HostEvent>,
    frame_period: Duration,
    next_id: u64,
    tasks: HashMap<TaskHandle, JoinHandle<()>>,
}

impl TokioScheduler {
    /// Creates a scheduler posting to `events`, with frames `frame_period`
    /// apart.
    pub fn new(events: mpsc::UnboundedSender<HostEvent>, frame_period: Duration) -> Self {
        Self {
            events,
            frame_period,
            next_id: 0,
            tasks: HashMap::new(),
        }
    }

    /// Tasks not yet finished or cancelled.
    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.tasks.values().filter(|t| !t.is_finished()).count()
    }

    fn next_handle(&mut self) -> TaskHandle {
        self.next_id += 1;
        self.tasks.retain(|_, task| !task.is_finished());
        TaskHandle::new(self.next_id)
    }
}

impl Scheduler for TokioScheduler {
    fn request_frame(&mut self) -> TaskHandle {
        let handle = self.next_handle();
        let events = self.events.clone();
        let period = self.frame_period;

        let task = tokio::spawn(async move {
            time::sleep(period).await;
            let _ = events.send(HostEvent::Frame(handle));
        });
        self.tasks.insert(handle, task);

        handle
    }

    fn start_ticker(&mut self, period: Duration) -> TaskHandle {
        let handle = self.next_handle();
        let events = self.events.clone();

        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if events.send(HostEvent::Tick(handle)).is_err() {
                    break;
                }
            }
        });
        self.tasks.insert(handle, task);

        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
            trace!(handle = handle.id(), "Scheduled task cancelled");
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
