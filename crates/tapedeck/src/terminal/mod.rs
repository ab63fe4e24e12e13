//! Terminal rendering of the control panel and bar spectrum.

mod screen;
mod terminal_panel;
mod terminal_surface;

pub(crate) use {
    screen::{Screen, SharedScreen},
    terminal_panel::TerminalPanel,
    terminal_surface::TerminalSurface,
};

#[cfg(test)]
pub(crate) use terminal_panel::key_list;
