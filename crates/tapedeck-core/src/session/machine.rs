//! Recording session lifecycle.
//!
//! `Idle -> Recording <-> Paused -> Stopped -> Idle`. Every transition
//! starts or stops the capture pipeline, the session clock and the
//! visualizer so their activity always matches the current state. Requests
//! that are not valid in the current state are ignored.

use crate::{
    capture::{CaptureBackend, CapturePipeline, RecordingArtifact},
    clock::{ClockReading, SessionClock, format_elapsed},
    scheduler::{CancellableTask, Scheduler, TaskHandle},
    session::{
        Affordances, ArtifactSink, Collaborators, ControlPanel, SessionSettings, SessionState,
        StatusMessage, UserAction,
    },
    visualizer::{DisplaySurface, VisualizerLoop},
};

use std::time::{Duration, Instant};

use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Why a session reached `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopReason {
    Requested,
    MaxDuration,
}

/// The recording session object.
///
/// Owns the capture pipeline, the clock, the visualizer and every
/// collaborator; nothing is shared through globals. All methods take the
/// current instant explicitly so the machine is deterministic under test.
pub struct SessionMachine {
    settings: SessionSettings,
    state: SessionState,
    backend: Box<dyn CaptureBackend>,
    scheduler: Box<dyn Scheduler>,
    surface: Box<dyn DisplaySurface>,
    panel: Box<dyn ControlPanel>,
    sink: Box<dyn ArtifactSink>,
    pipeline: Option<CapturePipeline>,
    clock: SessionClock,
    ticker: CancellableTask,
    visualizer: VisualizerLoop,
    artifact: Option<RecordingArtifact>,
    session_id: Option<Uuid>,
    status: StatusMessage,
    elapsed: Duration,
}

impl SessionMachine {
    /// Creates an idle machine and publishes the initial affordances.
    pub fn new(settings: SessionSettings, collaborators: Collaborators) -> Self {
        let Collaborators {
            backend,
            scheduler,
            surface,
            panel,
            sink,
        } = collaborators;

        let mut machine = Self {
            clock: SessionClock::new(settings.max_duration),
            visualizer: VisualizerLoop::new(settings.spectrum_bins),
            settings,
            state: SessionState::Idle,
            backend,
            scheduler,
            surface,
            panel,
            sink,
            pipeline: None,
            ticker: CancellableTask::default(),
            artifact: None,
            session_id: None,
            status: StatusMessage::Ready,
            elapsed: Duration::ZERO,
        };

        machine.clear_surface();
        machine.publish(StatusMessage::Ready);
        machine.publish_elapsed(Duration::ZERO);

        machine
    }

    /// Routes an input affordance to its transition.
    pub fn dispatch(&mut self, action: UserAction, now: Instant) {
        match action {
            UserAction::Record => self.record(now),
            UserAction::TogglePause => self.toggle_pause(now),
            UserAction::Stop => self.stop(now),
            UserAction::Save => self.save(),
            UserAction::Reset => self.reset(),
        }
    }

    /// `Idle -> Recording`.
    ///
    /// Opens the pipeline on first use and reuses it (and its negotiated
    /// encoding) afterwards. On failure the machine stays idle and the error
    /// is shown as a status.
    #[instrument(skip(self, now))]
    pub fn record(&mut self, now: Instant) {
        if !self.guard(UserAction::Record) {
            return;
        }

        if self.pipeline.is_none() {
            match CapturePipeline::open(self.backend.as_mut(), &self.settings.encodings) {
                Ok(pipeline) => self.pipeline = Some(pipeline),
                Err(e) => {
                    error!(error = ?e, "Failed to open capture pipeline");
                    self.publish(StatusMessage::from_error(&e));
                    return;
                }
            }
        }

        let Some(pipeline) = self.pipeline.as_mut() else {
            return;
        };
        if let Err(e) = pipeline.start(self.backend.as_mut()) {
            error!(error = ?e, "Failed to start encoding");
            self.publish(StatusMessage::from_error(&e));
            return;
        }

        let session_id = Uuid::new_v4();
        self.session_id = Some(session_id);
        self.artifact = None;
        self.clock.start(now);
        self.start_ticker();
        self.visualizer.start(self.scheduler.as_mut());
        self.state = SessionState::Recording;

        info!(session_id = %session_id, "Recording started");

        self.publish(StatusMessage::Recording);
        self.publish_elapsed(Duration::ZERO);
    }

    /// `Recording -> Paused` or `Paused -> Recording`.
    #[instrument(skip(self, now))]
    pub fn toggle_pause(&mut self, now: Instant) {
        if !self.guard(UserAction::TogglePause) {
            return;
        }

        match self.state {
            SessionState::Recording => self.pause(now),
            SessionState::Paused => self.resume(now),
            SessionState::Idle | SessionState::Stopped => {}
        }
    }

    /// A refused encoder pause keeps the session recording.
    fn pause(&mut self, now: Instant) {
        if let Some(pipeline) = self.pipeline.as_mut()
            && let Err(e) = pipeline.pause()
        {
            error!(session_id = ?self.session_id, error = ?e, "Failed to pause encoding");
            self.publish(StatusMessage::PauseFailed);
            return;
        }
        self.clock.pause(now);
        self.cancel_ticker();
        self.visualizer.cancel(self.scheduler.as_mut());
        self.state = SessionState::Paused;

        let elapsed = self.clock.elapsed(now);
        info!(
            session_id = ?self.session_id,
            elapsed_ms = elapsed.as_millis(),
            "Recording paused"
        );

        self.publish(StatusMessage::Paused);
        self.publish_elapsed(elapsed);
    }

    /// A refused encoder resume keeps the session paused.
    fn resume(&mut self, now: Instant) {
        if let Some(pipeline) = self.pipeline.as_mut()
            && let Err(e) = pipeline.resume()
        {
            error!(session_id = ?self.session_id, error = ?e, "Failed to resume encoding");
            self.publish(StatusMessage::ResumeFailed);
            return;
        }
        self.clock.resume(now);
        self.start_ticker();
        self.visualizer.start(self.scheduler.as_mut());
        self.state = SessionState::Recording;

        info!(session_id = ?self.session_id, "Recording resumed");

        self.publish(StatusMessage::Resumed);
    }

    /// `Recording | Paused -> Stopped` at the user's request.
    #[instrument(skip(self, now))]
    pub fn stop(&mut self, now: Instant) {
        if !self.guard(UserAction::Stop) {
            return;
        }
        self.finish(now, StopReason::Requested);
    }

    /// `Stopped -> Stopped`: hands the artifact to the save collaborator.
    ///
    /// Repeatable; the artifact is never re-finalized.
    #[instrument(skip(self))]
    pub fn save(&mut self) {
        if !self.guard(UserAction::Save) {
            return;
        }

        let Some(artifact) = self.artifact.as_ref() else {
            warn!("Save requested without an artifact");
            self.publish(StatusMessage::NothingToSave);
            return;
        };

        match self.sink.save(artifact) {
            Ok(location) => {
                info!(
                    session_id = ?self.session_id,
                    bytes = artifact.len(),
                    location = %location,
                    "Recording saved"
                );
                self.publish(StatusMessage::Saved { location });
            }
            Err(e) => {
                error!(error = ?e, "Failed to save recording");
                self.publish(StatusMessage::SaveFailed);
            }
        }
    }

    /// `Stopped -> Idle`: discards the artifact and restores the initial
    /// display.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        if !self.guard(UserAction::Reset) {
            return;
        }

        self.artifact = None;
        self.teardown_session();
        self.session_id = None;
        self.state = SessionState::Idle;

        info!("Session reset");

        self.publish(StatusMessage::Ready);
        self.publish_elapsed(Duration::ZERO);
    }

    /// Clock ticker callback.
    ///
    /// Collects pending chunks, refreshes the elapsed display and enforces
    /// the maximum duration. Stale ticks are ignored.
    pub fn on_tick(&mut self, handle: TaskHandle, now: Instant) {
        if !self.ticker.matches(handle) || self.state != SessionState::Recording {
            debug!(handle = handle.id(), state = self.state.as_str(), "Stale tick ignored");
            return;
        }

        if let Some(pipeline) = self.pipeline.as_mut() {
            pipeline.collect();
        }

        match self.clock.tick(now) {
            ClockReading::Elapsed(elapsed) => self.publish_elapsed(elapsed),
            ClockReading::AutoStop(_) => self.finish(now, StopReason::MaxDuration),
        }
    }

    /// Visualizer frame callback.
    ///
    /// Returns true if a frame was rendered.
    pub fn on_frame(&mut self, handle: TaskHandle) -> bool {
        let recording = self.state == SessionState::Recording;
        let Some(pipeline) = self.pipeline.as_mut() else {
            return false;
        };

        self.visualizer.frame(
            handle,
            recording,
            pipeline,
            self.surface.as_mut(),
            self.scheduler.as_mut(),
        )
    }

    /// Tears everything down from any state and releases the microphone.
    ///
    /// The next record request renegotiates the encoding.
    #[instrument(skip(self, now))]
    pub fn shutdown(&mut self, now: Instant) {
        if self.state.is_active() {
            self.finish(now, StopReason::Requested);
        }

        self.teardown_session();
        if let Some(pipeline) = self.pipeline.take() {
            pipeline.close();
        }
        self.artifact = None;
        self.session_id = None;
        self.state = SessionState::Idle;

        info!("Session machine shut down");
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Affordance flags for the current state.
    pub fn affordances(&self) -> Affordances {
        Affordances::for_state(self.state)
    }

    /// Last published status.
    pub fn status(&self) -> &StatusMessage {
        &self.status
    }

    /// Last published net elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// The finished recording, while `Stopped`.
    pub fn artifact(&self) -> Option<&RecordingArtifact> {
        self.artifact.as_ref()
    }

    /// Id of the current session, for log correlation.
    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    /// Whether the microphone is held.
    pub fn is_capture_open(&self) -> bool {
        self.pipeline.is_some()
    }

    /// Whether a visualizer frame is pending.
    pub fn is_visualizer_armed(&self) -> bool {
        self.visualizer.is_armed()
    }

    /// Whether the clock ticker is running.
    pub fn is_ticker_armed(&self) -> bool {
        self.ticker.is_armed()
    }

    /// The machine's settings.
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Transition to `Stopped`. Every teardown step runs even if an earlier
    /// one failed.
    fn finish(&mut self, now: Instant, reason: StopReason) {
        self.visualizer.cancel(self.scheduler.as_mut());
        self.cancel_ticker();

        let mut elapsed = self.clock.stop(now);
        if reason == StopReason::MaxDuration {
            elapsed = elapsed.min(self.settings.max_duration);
        }

        let finalized = match self.pipeline.as_mut() {
            Some(pipeline) => match pipeline.stop() {
                Ok(artifact) => Some(artifact.with_duration(elapsed)),
                Err(e) => {
                    error!(error = ?e, "Failed to finalize recording");
                    None
                }
            },
            None => None,
        };
        let finalize_failed = finalized.is_none();
        self.artifact = finalized;

        self.clear_surface();
        self.state = SessionState::Stopped;

        info!(
            session_id = ?self.session_id,
            elapsed_ms = elapsed.as_millis(),
            bytes = self.artifact.as_ref().map(RecordingArtifact::len),
            reason = ?reason,
            "Recording stopped"
        );

        let status = match reason {
            _ if finalize_failed => StatusMessage::FinalizeFailed,
            StopReason::Requested => StatusMessage::Stopped,
            StopReason::MaxDuration => StatusMessage::AutoStopped {
                limit: self.settings.max_duration,
            },
        };
        self.publish(status);
        self.publish_elapsed(elapsed);
    }

    /// Stops visualizer, ticker, clock and encoder and clears the display.
    fn teardown_session(&mut self) {
        self.visualizer.cancel(self.scheduler.as_mut());
        self.cancel_ticker();
        self.clock.reset();
        if let Some(pipeline) = self.pipeline.as_mut() {
            pipeline.discard();
        }
        self.clear_surface();
    }

    fn guard(&self, action: UserAction) -> bool {
        if self.state.accepts(action) {
            return true;
        }
        debug!(action = ?action, state = self.state.as_str(), "Request ignored in current state");
        false
    }

    fn start_ticker(&mut self) {
        self.cancel_ticker();
        let handle = self.scheduler.start_ticker(self.settings.tick_interval);
        self.ticker.arm(handle);
    }

    fn cancel_ticker(&mut self) {
        if let Some(handle) = self.ticker.disarm() {
            self.scheduler.cancel(handle);
        }
    }

    fn clear_surface(&mut self) {
        self.surface.clear();
        self.surface.present();
    }

    fn publish(&mut self, status: StatusMessage) {
        self.panel.show_status(&status);
        self.panel.set_affordances(Affordances::for_state(self.state));
        self.status = status;
    }

    fn publish_elapsed(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
        self.panel.show_elapsed(&format_elapsed(elapsed));
    }
}

impl Drop for SessionMachine {
    fn drop(&mut self) {
        self.visualizer.cancel(self.scheduler.as_mut());
        self.cancel_ticker();
    }
}
