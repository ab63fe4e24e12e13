use crate::config::{
    default_ansi_colors, default_bins, default_columns, default_frame_rate, default_rows,
};

use serde::{Deserialize, Serialize};

/// Terminal visualizer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Visualizer frames per second.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// Width of the spectrum line in terminal cells.
    #[serde(default = "default_columns")]
    pub columns: u32,

    /// Vertical resolution, in glyph rows of eight levels each.
    #[serde(default = "default_rows")]
    pub rows: u32,

    /// Frequency bins analysed per frame.
    #[serde(default = "default_bins")]
    pub bins: usize,

    /// Colour bars with 24-bit ANSI escapes.
    #[serde(default = "default_ansi_colors")]
    pub ansi_colors: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            columns: default_columns(),
            rows: default_rows(),
            bins: default_bins(),
            ansi_colors: default_ansi_colors(),
        }
    }
}
