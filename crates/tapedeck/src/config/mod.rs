mod display_config;
#[allow(clippy::module_inception)]
mod config;
mod output_config;
mod recording_config;

pub(crate) use {
    config::Config, display_config::DisplayConfig, output_config::OutputConfig,
    recording_config::RecordingConfig,
};

pub(crate) const DEFAULT_MAX_DURATION_SECS: u64 = 60 * 60;
pub(crate) const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;
pub(crate) const DEFAULT_FRAME_RATE: u32 = 30;
pub(crate) const DEFAULT_COLUMNS: u32 = 64;
pub(crate) const DEFAULT_ROWS: u32 = 8;
pub(crate) const DEFAULT_BINS: usize = 128;
pub(crate) const DEFAULT_FILE_PREFIX: &str = "recording";

pub(crate) fn default_max_duration_secs() -> u64 {
    DEFAULT_MAX_DURATION_SECS
}

pub(crate) fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

pub(crate) fn default_frame_rate() -> u32 {
    DEFAULT_FRAME_RATE
}

pub(crate) fn default_columns() -> u32 {
    DEFAULT_COLUMNS
}

pub(crate) fn default_rows() -> u32 {
    DEFAULT_ROWS
}

pub(crate) fn default_bins() -> usize {
    DEFAULT_BINS
}

pub(crate) fn default_ansi_colors() -> bool {
    true
}

pub(crate) fn default_file_prefix() -> String {
    DEFAULT_FILE_PREFIX.to_string()
}
