use crate::{
    capture::AnalysisTap,
    visualizer::{DisplaySurface, Rgb},
};

/// Bars are wider than an even split so the low bins fill the surface.
pub(crate) const BAR_WIDTH_SCALE: f32 = 2.5;
/// Horizontal gap between bars.
pub(crate) const BAR_GAP: f32 = 1.0;

/// Bar-spectrum renderer with fixed, reused buffers.
#[derive(Debug)]
pub struct BarSpectrum {
    magnitudes: Vec<u8>,
    palette: Vec<Rgb>,
}

impl BarSpectrum {
    /// Creates a renderer for `bins` frequency bins.
    pub fn new(bins: usize) -> Self {
        Self {
            magnitudes: vec![0; bins],
            palette: (0..bins).map(|i| bar_color(i, bins)).collect(),
        }
    }

    /// Number of bars this renderer paints at most.
    pub fn bins(&self) -> usize {
        self.magnitudes.len()
    }

    /// Magnitudes sampled by the most recent [`render`](Self::render).
    pub fn magnitudes(&self) -> &[u8] {
        &self.magnitudes
    }

    /// Samples `tap` and paints one frame onto `surface`.
    ///
    /// Returns the number of bars painted.
    pub fn render(&mut self, tap: &mut dyn AnalysisTap, surface: &mut dyn DisplaySurface) -> usize {
        tap.frequency_data(&mut self.magnitudes);

        let width = surface.width() as f32;
        let height = surface.height() as f32;

        surface.clear();

        let mut painted = 0;
        if !self.magnitudes.is_empty() && width > 0.0 && height > 0.0 {
            let bar_width = width / self.magnitudes.len() as f32 * BAR_WIDTH_SCALE;
            let mut x = 0.0;

            for (magnitude, color) in self.magnitudes.iter().zip(&self.palette) {
                if x >= width {
                    break;
                }
                let bar_height = f32::from(*magnitude) / 255.0 * height;
                if bar_height > 0.0 {
                    surface.fill_rect(x, height - bar_height, bar_width, bar_height, *color);
                    painted += 1;
                }
                x += bar_width + BAR_GAP;
            }
        }

        surface.present();
        painted
    }
}

/// Colour of bar `index` out of `bins`: a blue to red sweep.
pub fn bar_color(index: usize, bins: usize) -> Rgb {
    let span = bins.saturating_sub(1).max(1);
    let t = index.min(span) as f32 / span as f32;
    let r = 50.0 + 205.0 * t;
    let b = 255.0 - 205.0 * t;
    Rgb::new(r.round() as u8, 80, b.round() as u8)
}
