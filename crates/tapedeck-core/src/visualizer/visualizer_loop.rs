use crate::{
    capture::AnalysisTap,
    scheduler::{CancellableTask, Scheduler, TaskHandle},
    visualizer::{BarSpectrum, DisplaySurface},
};

use tracing::{debug, trace};

/// Self-rescheduling render task.
///
/// Each frame re-arms itself with the scheduler, and only while the session
/// is recording. A frame whose handle is not the armed one is stale and has
/// no effect.
#[derive(Debug)]
pub struct VisualizerLoop {
    task: CancellableTask,
    spectrum: BarSpectrum,
    frames_rendered: u64,
}

impl VisualizerLoop {
    /// Creates an idle loop rendering `bins` bars.
    pub fn new(bins: usize) -> Self {
        Self {
            task: CancellableTask::default(),
            spectrum: BarSpectrum::new(bins),
            frames_rendered: 0,
        }
    }

    /// Schedules the first frame. No-op if a frame is already pending.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler) {
        if self.task.is_armed() {
            return;
        }
        self.task.arm(scheduler.request_frame());
        debug!("Visualizer started");
    }

    /// Cancels the pending frame, if any.
    pub fn cancel(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(handle) = self.task.disarm() {
            scheduler.cancel(handle);
            debug!(handle = handle.id(), "Visualizer cancelled");
        }
    }

    /// Runs one frame.
    ///
    /// Returns true if a frame was rendered (and the next one scheduled).
    pub fn frame(
        &mut self,
        handle: TaskHandle,
        recording: bool,
        tap: &mut dyn AnalysisTap,
        surface: &mut dyn DisplaySurface,
        scheduler: &mut dyn Scheduler,
    ) -> bool {
        if !self.task.fire(handle) {
            trace!(handle = handle.id(), "Stale visualizer frame ignored");
            return false;
        }
        if !recording {
            return false;
        }

        self.spectrum.render(tap, surface);
        self.frames_rendered += 1;
        self.task.arm(scheduler.request_frame());
        true
    }

    /// Whether a frame is pending.
    pub fn is_armed(&self) -> bool {
        self.task.is_armed()
    }

    /// Frames rendered since creation.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// The renderer, for inspection.
    pub fn spectrum(&self) -> &BarSpectrum {
        &self.spectrum
    }
}
