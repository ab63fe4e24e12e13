use crate::{
    CoreResult,
    capture::{CaptureBackend, RecordingArtifact},
    scheduler::Scheduler,
    session::{Affordances, StatusMessage},
    visualizer::DisplaySurface,
};

/// Output affordances owned by the UI layer.
pub trait ControlPanel {
    /// Replaces the status line.
    fn show_status(&mut self, status: &StatusMessage);

    /// Replaces the `mm:ss` elapsed display.
    fn show_elapsed(&mut self, elapsed: &str);

    /// Applies enable flags to the input affordances.
    fn set_affordances(&mut self, affordances: Affordances);
}

/// Receives finished recordings.
pub trait ArtifactSink {
    /// Persists `artifact` and describes where it went.
    ///
    /// # Errors
    ///
    /// [`CoreError::SaveFailed`](crate::CoreError::SaveFailed) when the
    /// artifact could not be stored.
    fn save(&mut self, artifact: &RecordingArtifact) -> CoreResult<String>;
}

/// Everything a [`SessionMachine`](crate::SessionMachine) drives.
pub struct Collaborators {
    /// Microphone, encoders and format support.
    pub backend: Box<dyn CaptureBackend>,
    /// Host event loop.
    pub scheduler: Box<dyn Scheduler>,
    /// Visualizer target.
    pub surface: Box<dyn DisplaySurface>,
    /// Status, elapsed display and affordance flags.
    pub panel: Box<dyn ControlPanel>,
    /// Save handoff.
    pub sink: Box<dyn ArtifactSink>,
}
