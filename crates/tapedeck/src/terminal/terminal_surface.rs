use crate::terminal::SharedScreen;

use tapedeck_core::visualizer::{DisplaySurface, Rgb};

/// Vertical resolution of one character cell.
pub(crate) const LEVELS_PER_ROW: u32 = 8;

const GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// [`DisplaySurface`] drawing bars as block glyphs, one column per
/// character and eight levels per row.
pub(crate) struct TerminalSurface {
    screen: SharedScreen,
    columns: u32,
    rows: u32,
    ansi_colors: bool,
    heights: Vec<f32>,
    colors: Vec<Rgb>,
}

impl TerminalSurface {
    pub(crate) fn new(screen: SharedScreen, columns: u32, rows: u32, ansi_colors: bool) -> Self {
        Self {
            screen,
            columns,
            rows,
            ansi_colors,
            heights: vec![0.0; columns as usize],
            colors: vec![Rgb::default(); columns as usize],
        }
    }

    /// Rendered rows, top first.
    pub(crate) fn lines(&self) -> Vec<String> {
        (0..self.rows)
            .map(|row| {
                let floor = ((self.rows - 1 - row) * LEVELS_PER_ROW) as f32;
                let mut line = String::new();
                for (height, color) in self.heights.iter().zip(&self.colors) {
                    let fill = (height - floor).clamp(0.0, LEVELS_PER_ROW as f32).round() as usize;
                    if fill == 0 {
                        line.push(' ');
                    } else if self.ansi_colors {
                        line.push_str(&format!(
                            "\x1b[38;2;{};{};{}m{}\x1b[0m",
                            color.r,
                            color.g,
                            color.b,
                            GLYPHS[fill - 1]
                        ));
                    } else {
                        line.push(GLYPHS[fill - 1]);
                    }
                }
                line.trim_end().to_string()
            })
            .collect()
    }
}

impl DisplaySurface for TerminalSurface {
    fn width(&self) -> u32 {
        self.columns
    }

    fn height(&self) -> u32 {
        self.rows * LEVELS_PER_ROW
    }

    fn clear(&mut self) {
        self.heights.iter_mut().for_each(|h| *h = 0.0);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        let bottom = (y + height).min(self.height() as f32);
        let top = y.max(0.0);
        if bottom <= top {
            return;
        }
        // Bars stand on the bottom edge; a rect's extent is its distance
        // from the top down to the floor.
        let level = self.height() as f32 - top;

        let first = x.max(0.0).floor() as usize;
        let last = ((x + width).ceil().max(0.0) as usize).min(self.heights.len());
        for column in first..last {
            if level > self.heights[column] {
                self.heights[column] = level;
                self.colors[column] = color;
            }
        }
    }

    fn present(&mut self) {
        let lines = self.lines();
        self.screen.borrow_mut().set_bars(lines);
    }
}
