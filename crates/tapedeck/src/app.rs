use crate::{
    AppCommand, AppResult, FileSaver, HostEvent, TokioScheduler,
    config::Config,
    microphone::CpalBackend,
    terminal::{Screen, SharedScreen, TerminalPanel, TerminalSurface},
};

use std::{rc::Rc, time::Instant};

use tapedeck_core::{Collaborators, SessionMachine};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::{debug, info, instrument, warn};

const HELP: &str = "Commands: r=record  p=pause/resume  s=stop  w=save  x=reset  h=help  q=quit";

/// Main application state.
///
/// Everything runs on one current-thread runtime: stdin lines, scheduler
/// events and Ctrl-C are multiplexed onto the session machine from a
/// single loop.
pub struct App {
    pub(crate) machine: SessionMachine,
    pub(crate) events: mpsc::UnboundedReceiver<HostEvent>,
    pub(crate) screen: SharedScreen,
}

impl App {
    /// Wires the native collaborators described by `config`.
    ///
    /// Must be called inside the runtime: the scheduler spawns tokio tasks.
    pub(crate) fn new(config: &Config) -> AppResult<Self> {
        let settings = config.session_settings()?;
        let screen = Screen::shared(Box::new(std::io::stdout()));
        let (events_tx, events) = mpsc::unbounded_channel();

        let collaborators = Collaborators {
            backend: Box::new(CpalBackend::new(settings.spectrum_bins)),
            scheduler: Box::new(TokioScheduler::new(events_tx, config.frame_period())),
            surface: Box::new(TerminalSurface::new(
                Rc::clone(&screen),
                config.display.columns,
                config.display.rows,
                config.display.ansi_colors,
            )),
            panel: Box::new(TerminalPanel::new(Rc::clone(&screen))),
            sink: Box::new(FileSaver::new(
                config.output_directory()?,
                config.output.file_prefix.clone(),
            )),
        };

        Ok(Self {
            machine: SessionMachine::new(settings, collaborators),
            events,
            screen,
        })
    }

    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Tapedeck starting");
        self.screen.borrow_mut().log_line(HELP);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        let result = loop {
            tokio::select! {
                line = lines.next_line() => match line {
                    Ok(Some(line)) => {
                        if !self.handle_line(&line) {
                            break Ok(());
                        }
                    }
                    Ok(None) => {
                        info!("Input closed, shutting down");
                        break Ok(());
                    }
                    Err(e) => break Err(e.into()),
                },

                Some(event) = self.events.recv() => self.handle_event(event),

                _ = &mut ctrl_c => {
                    info!("Interrupted, shutting down");
                    break Ok(());
                }
            }
        };

        self.machine.shutdown(Instant::now());
        info!("Tapedeck stopped");

        result
    }

    /// Returns false when the app should exit.
    fn handle_line(&mut self, line: &str) -> bool {
        if line.trim().is_empty() {
            return true;
        }

        match AppCommand::parse(line) {
            Ok(AppCommand::Session(action)) => {
                self.machine.dispatch(action, Instant::now());
                true
            }
            Ok(AppCommand::Help) => {
                self.screen.borrow_mut().log_line(HELP);
                true
            }
            Ok(AppCommand::Quit) => {
                info!("Quit requested");
                false
            }
            Err(e) => {
                warn!(error = %e, "Unrecognised command");
                self.screen
                    .borrow_mut()
                    .log_line(&format!("Unknown command '{}' (h for help)", line.trim()));
                true
            }
        }
    }

    fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::Frame(handle) => {
                self.machine.on_frame(handle);
            }
            HostEvent::Tick(handle) => {
                debug!(handle = handle.id(), "Tick");
                self.machine.on_tick(handle, Instant::now());
            }
        }
    }
}
