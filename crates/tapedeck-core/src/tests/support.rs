//! In-crate fakes for every capability the machine consumes.
//!
//! Each fake writes into an `Rc<RefCell<..>>` log the test keeps a clone of.

use crate::{
    CoreError, CoreResult, SessionMachine, SessionSettings, StatusMessage,
    capture::{
        AnalysisTap, CaptureBackend, ChunkEncoder, EncodingChoice, MicrophoneStream,
        RecordingArtifact,
    },
    scheduler::{Scheduler, TaskHandle},
    session::{Affordances, ArtifactSink, Collaborators, ControlPanel},
    visualizer::{DisplaySurface, Rgb},
};

use std::{
    cell::RefCell,
    panic::Location,
    rc::Rc,
    time::{Duration, Instant},
};

use error_location::ErrorLocation;

pub(crate) type Shared<T> = Rc<RefCell<T>>;

#[derive(Debug, Default)]
pub(crate) struct BackendLog {
    pub supported: Vec<String>,
    pub deny_microphone: bool,
    pub fail_encoder_creation: bool,
    pub fail_finish: bool,
    pub fail_pause: bool,
    pub fail_resume: bool,
    pub probes: usize,
    pub acquisitions: usize,
    pub releases: usize,
    pub encoders_created: usize,
    pub encoder_events: Vec<&'static str>,
    pub pending_chunks: Vec<Vec<u8>>,
    pub trailing: Vec<u8>,
    pub magnitudes: Vec<u8>,
}

pub(crate) struct FakeBackend {
    pub log: Shared<BackendLog>,
}

impl CaptureBackend for FakeBackend {
    fn supports_encoding(&self, mime_type: &str) -> bool {
        let mut log = self.log.borrow_mut();
        log.probes += 1;
        log.supported.iter().any(|m| m == mime_type)
    }

    #[track_caller]
    fn acquire_microphone(&mut self) -> CoreResult<Box<dyn MicrophoneStream>> {
        let mut log = self.log.borrow_mut();
        if log.deny_microphone {
            return Err(CoreError::PermissionDenied {
                reason: "denied by test".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        log.acquisitions += 1;
        Ok(Box::new(FakeStream {
            log: Rc::clone(&self.log),
            released: false,
        }))
    }

    #[track_caller]
    fn create_encoder(&mut self, _encoding: &EncodingChoice) -> CoreResult<Box<dyn ChunkEncoder>> {
        let mut log = self.log.borrow_mut();
        if log.fail_encoder_creation {
            return Err(CoreError::EncoderError {
                reason: "encoder refused by test".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        log.encoders_created += 1;
        Ok(Box::new(FakeEncoder {
            log: Rc::clone(&self.log),
        }))
    }
}

pub(crate) struct FakeStream {
    log: Shared<BackendLog>,
    released: bool,
}

impl AnalysisTap for FakeStream {
    fn bin_count(&self) -> usize {
        self.log.borrow().magnitudes.len()
    }

    fn frequency_data(&mut self, out: &mut [u8]) {
        let log = self.log.borrow();
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = log.magnitudes.get(i).copied().unwrap_or(0);
        }
    }
}

impl MicrophoneStream for FakeStream {
    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.log.borrow_mut().releases += 1;
        }
    }
}

pub(crate) struct FakeEncoder {
    log: Shared<BackendLog>,
}

impl ChunkEncoder for FakeEncoder {
    fn start(&mut self) -> CoreResult<()> {
        self.log.borrow_mut().encoder_events.push("start");
        Ok(())
    }

    #[track_caller]
    fn pause(&mut self) -> CoreResult<()> {
        let mut log = self.log.borrow_mut();
        log.encoder_events.push("pause");
        if log.fail_pause {
            return Err(CoreError::EncoderError {
                reason: "pause refused by test".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }

    #[track_caller]
    fn resume(&mut self) -> CoreResult<()> {
        let mut log = self.log.borrow_mut();
        log.encoder_events.push("resume");
        if log.fail_resume {
            return Err(CoreError::EncoderError {
                reason: "resume refused by test".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }

    fn take_chunks(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.log.borrow_mut().pending_chunks)
    }

    #[track_caller]
    fn finish(&mut self) -> CoreResult<Vec<Vec<u8>>> {
        let mut log = self.log.borrow_mut();
        log.encoder_events.push("finish");
        if log.fail_finish {
            return Err(CoreError::EncoderError {
                reason: "finish refused by test".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(vec![log.trailing.clone()])
    }
}

#[derive(Debug, Default)]
pub(crate) struct SchedulerLog {
    pub next_id: u64,
    pub frames: Vec<TaskHandle>,
    pub tickers: Vec<(TaskHandle, Duration)>,
    pub cancelled: Vec<TaskHandle>,
    pub frame_requests: usize,
}

impl SchedulerLog {
    pub fn pending_frame(&self) -> Option<TaskHandle> {
        self.frames.last().copied()
    }

    pub fn active_ticker(&self) -> Option<TaskHandle> {
        self.tickers.last().map(|(h, _)| *h)
    }
}

pub(crate) struct FakeScheduler {
    pub log: Shared<SchedulerLog>,
}

impl Scheduler for FakeScheduler {
    fn request_frame(&mut self) -> TaskHandle {
        let mut log = self.log.borrow_mut();
        log.next_id += 1;
        log.frame_requests += 1;
        let handle = TaskHandle::new(log.next_id);
        log.frames.push(handle);
        handle
    }

    fn start_ticker(&mut self, period: Duration) -> TaskHandle {
        let mut log = self.log.borrow_mut();
        log.next_id += 1;
        let handle = TaskHandle::new(log.next_id);
        log.tickers.push((handle, period));
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        let mut log = self.log.borrow_mut();
        log.frames.retain(|h| *h != handle);
        log.tickers.retain(|(h, _)| *h != handle);
        log.cancelled.push(handle);
    }
}

#[derive(Debug)]
pub(crate) struct SurfaceLog {
    pub width: u32,
    pub height: u32,
    pub clears: usize,
    pub presents: usize,
    pub rects: Vec<(f32, f32, f32, f32, Rgb)>,
}

impl Default for SurfaceLog {
    fn default() -> Self {
        Self {
            width: 300,
            height: 100,
            clears: 0,
            presents: 0,
            rects: Vec::new(),
        }
    }
}

pub(crate) struct FakeSurface {
    pub log: Shared<SurfaceLog>,
}

impl DisplaySurface for FakeSurface {
    fn width(&self) -> u32 {
        self.log.borrow().width
    }

    fn height(&self) -> u32 {
        self.log.borrow().height
    }

    fn clear(&mut self) {
        let mut log = self.log.borrow_mut();
        log.clears += 1;
        log.rects.clear();
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.log.borrow_mut().rects.push((x, y, width, height, color));
    }

    fn present(&mut self) {
        self.log.borrow_mut().presents += 1;
    }
}

#[derive(Debug, Default)]
pub(crate) struct PanelLog {
    pub statuses: Vec<StatusMessage>,
    pub elapsed: Vec<String>,
    pub affordances: Vec<Affordances>,
}

impl PanelLog {
    pub fn last_status(&self) -> Option<&StatusMessage> {
        self.statuses.last()
    }

    pub fn last_elapsed(&self) -> Option<&str> {
        self.elapsed.last().map(String::as_str)
    }

    pub fn last_affordances(&self) -> Option<Affordances> {
        self.affordances.last().copied()
    }
}

pub(crate) struct FakePanel {
    pub log: Shared<PanelLog>,
}

impl ControlPanel for FakePanel {
    fn show_status(&mut self, status: &StatusMessage) {
        self.log.borrow_mut().statuses.push(status.clone());
    }

    fn show_elapsed(&mut self, elapsed: &str) {
        self.log.borrow_mut().elapsed.push(elapsed.to_string());
    }

    fn set_affordances(&mut self, affordances: Affordances) {
        self.log.borrow_mut().affordances.push(affordances);
    }
}

#[derive(Debug, Default)]
pub(crate) struct SinkLog {
    pub fail: bool,
    pub saved: Vec<RecordingArtifact>,
}

pub(crate) struct FakeSink {
    pub log: Shared<SinkLog>,
}

impl ArtifactSink for FakeSink {
    #[track_caller]
    fn save(&mut self, artifact: &RecordingArtifact) -> CoreResult<String> {
        let mut log = self.log.borrow_mut();
        if log.fail {
            return Err(CoreError::SaveFailed {
                reason: "disk full in test".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        log.saved.push(artifact.clone());
        Ok(format!("memory://{}.{}", log.saved.len(), artifact.suffix()))
    }
}

/// A machine wired to fakes, plus handles on every fake's log.
pub(crate) struct Harness {
    pub machine: SessionMachine,
    pub backend: Shared<BackendLog>,
    pub scheduler: Shared<SchedulerLog>,
    pub surface: Shared<SurfaceLog>,
    pub panel: Shared<PanelLog>,
    pub sink: Shared<SinkLog>,
    pub t0: Instant,
}

impl Harness {
    /// Ogg/Opus supported, four bins of audio, chunk `[1, 2]` pending.
    pub fn new(settings: SessionSettings) -> Self {
        let backend = Rc::new(RefCell::new(BackendLog {
            supported: vec!["audio/ogg;codecs=opus".to_string(), "audio/wav".to_string()],
            magnitudes: vec![255, 128, 64, 0],
            ..BackendLog::default()
        }));
        Self::with_backend(settings, backend)
    }

    pub fn with_backend(settings: SessionSettings, backend: Shared<BackendLog>) -> Self {
        let scheduler = Rc::new(RefCell::new(SchedulerLog::default()));
        let surface = Rc::new(RefCell::new(SurfaceLog::default()));
        let panel = Rc::new(RefCell::new(PanelLog::default()));
        let sink = Rc::new(RefCell::new(SinkLog::default()));

        let machine = SessionMachine::new(
            settings,
            Collaborators {
                backend: Box::new(FakeBackend {
                    log: Rc::clone(&backend),
                }),
                scheduler: Box::new(FakeScheduler {
                    log: Rc::clone(&scheduler),
                }),
                surface: Box::new(FakeSurface {
                    log: Rc::clone(&surface),
                }),
                panel: Box::new(FakePanel {
                    log: Rc::clone(&panel),
                }),
                sink: Box::new(FakeSink {
                    log: Rc::clone(&sink),
                }),
            },
        );

        Self {
            machine,
            backend,
            scheduler,
            surface,
            panel,
            sink,
            t0: Instant::now(),
        }
    }

    /// Settings with four spectrum bins and the given maximum.
    pub fn settings(max_duration: Duration) -> SessionSettings {
        SessionSettings {
            max_duration,
            spectrum_bins: 4,
            ..SessionSettings::default()
        }
    }

    pub fn at(&self, secs: u64) -> Instant {
        self.t0 + Duration::from_secs(secs)
    }

    /// Fires the active ticker at `secs`. Returns false if none is active.
    pub fn tick(&mut self, secs: u64) -> bool {
        let Some(handle) = self.scheduler.borrow().active_ticker() else {
            return false;
        };
        let now = self.at(secs);
        self.machine.on_tick(handle, now);
        true
    }

    /// Fires the pending frame. Returns false if none is pending.
    pub fn frame(&mut self) -> bool {
        let Some(handle) = self.scheduler.borrow_mut().frames.pop() else {
            return false;
        };
        self.machine.on_frame(handle)
    }
}
