//! Configuration management for tapedeck.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths, validation, and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{DisplayConfig, OutputConfig, RecordingConfig},
};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
    time::Duration,
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tapedeck_core::SessionSettings;
use tracing::{debug, info, instrument};

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Session limits and encoding preferences.
    #[serde(default)]
    pub recording: RecordingConfig,
    /// Terminal visualizer settings.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Saved recording location.
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from disk, creating default if not found.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let config = Self::load_from(&config_path)?;
            info!(config_path = ?config_path, "Configuration loaded");
            Ok(config)
        } else {
            info!("No config found, creating default");
            let config = Config::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Parse a configuration file. Missing sections and keys take defaults.
    #[track_caller]
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to read config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        toml::from_str(&contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Reject values the session machine or the display cannot run with.
    ///
    /// Session limits are checked by the core through
    /// [`session_settings`](Self::session_settings).
    #[track_caller]
    #[instrument(skip(self))]
    pub fn validate(&self) -> AppResult<()> {
        let problem = if self.display.frame_rate == 0 {
            Some("display.frame_rate must be greater than zero")
        } else if self.display.columns == 0 || self.display.rows == 0 {
            Some("display.columns and display.rows must be greater than zero")
        } else if self.output.file_prefix.trim().is_empty() {
            Some("output.file_prefix must not be empty")
        } else {
            None
        };

        if let Some(reason) = problem {
            return Err(AppError::ConfigError {
                reason: reason.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.session_settings().map(|_| ())
    }

    /// Save configuration to `path` using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let temp_path = path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Session machine settings derived from this configuration.
    ///
    /// # Errors
    ///
    /// [`AppError::Core`] wrapping `InvalidSettings` for a zero duration,
    /// tick or bin count, or an empty encoding list.
    #[track_caller]
    pub fn session_settings(&self) -> AppResult<SessionSettings> {
        let settings = SessionSettings {
            max_duration: Duration::from_secs(self.recording.max_duration_secs),
            tick_interval: Duration::from_millis(self.recording.tick_interval_ms),
            encodings: self.recording.encodings.clone(),
            spectrum_bins: self.display.bins,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Time between visualizer frames.
    pub fn frame_period(&self) -> Duration {
        Duration::from_secs(1) / self.display.frame_rate.max(1)
    }

    /// Directory saved recordings go to.
    #[track_caller]
    pub fn output_directory(&self) -> AppResult<PathBuf> {
        match &self.output.directory {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::project_dirs()?.data_dir().join("recordings")),
        }
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = Self::project_dirs()?;
        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn project_dirs() -> AppResult<ProjectDirs> {
        ProjectDirs::from("com", "tapedeck", "Tapedeck").ok_or_else(|| AppError::ConfigError {
            reason: "Failed to get project directories".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
