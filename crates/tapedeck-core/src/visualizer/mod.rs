//! Bar-spectrum rendering and its self-rescheduling frame loop.

mod spectrum;
mod surface;
mod visualizer_loop;

#[cfg(test)]
pub(crate) use spectrum::{BAR_GAP, BAR_WIDTH_SCALE};

pub use {
    spectrum::{BarSpectrum, bar_color},
    surface::{DisplaySurface, Rgb},
    visualizer_loop::VisualizerLoop,
};
