//! Tapedeck: terminal microphone recorder with a live spectrum and a
//! maximum-duration auto-stop.

mod app;
mod app_command;
mod config;
mod error;
mod file_saver;
mod host_event;
mod microphone;
mod scheduler;
mod terminal;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    file_saver::FileSaver,
    host_event::HostEvent,
    scheduler::TokioScheduler,
};

use crate::config::Config;

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::error;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "tapedeck=info,tapedeck_core=info";

/// Application entry point.
fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // Logs go to stderr so the live display keeps stdout.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        error!("Config validation failed: {:?}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&config) {
        error!(error = ?e, "App error");
        std::process::exit(1);
    }
}

#[track_caller]
fn run(config: &Config) -> AppResult<()> {
    // Current-thread: the session machine and its collaborators are !Send.
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::RuntimeError {
            reason: format!("Failed to create tokio runtime: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    rt.block_on(async {
        let app = App::new(config)?;
        app.run().await
    })
}
