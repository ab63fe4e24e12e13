//! Frequency-domain analysis of the live sample window.
//!
//! Output follows the browser analyser node convention: `bins` magnitudes
//! from a `2 * bins` point transform, Hann-windowed, smoothed over time, and
//! mapped from a decibel range onto `0..=255`.

use std::f32::consts::PI;

/// Decibel value mapped to 0.
pub(crate) const MIN_DECIBELS: f32 = -100.0;
/// Decibel value mapped to 255.
pub(crate) const MAX_DECIBELS: f32 = -30.0;
/// Weight of the previous frame in the running magnitude.
pub(crate) const SMOOTHING: f32 = 0.8;

#[derive(Debug)]
pub(crate) struct SpectrumAnalyzer {
    bins: usize,
    window: Vec<f32>,
    /// `(cos, sin)` of `2 * PI * m / size` for every `m`.
    twiddles: Vec<(f32, f32)>,
    smoothed: Vec<f32>,
    frame: Vec<f32>,
}

impl SpectrumAnalyzer {
    pub(crate) fn new(bins: usize) -> Self {
        let size = bins * 2;
        let window = (0..size)
            .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / size as f32).cos()))
            .collect();
        let twiddles = (0..size)
            .map(|m| {
                let phase = 2.0 * PI * m as f32 / size as f32;
                (phase.cos(), phase.sin())
            })
            .collect();

        Self {
            bins,
            window,
            twiddles,
            smoothed: vec![0.0; bins],
            frame: vec![0.0; size],
        }
    }

    pub(crate) fn bins(&self) -> usize {
        self.bins
    }

    /// Samples per transform.
    pub(crate) fn size(&self) -> usize {
        self.bins * 2
    }

    /// Analyses the newest `size()` samples of `samples` into `out`.
    ///
    /// Fewer samples than `size()` are zero-padded at the front. Slots of
    /// `out` past `bins()` are zeroed.
    pub(crate) fn analyze(&mut self, samples: &[f32], out: &mut [u8]) {
        let size = self.size();
        let skip = samples.len().saturating_sub(size);
        let recent = &samples[skip..];
        let pad = size - recent.len();

        for (i, slot) in self.frame.iter_mut().enumerate() {
            *slot = if i < pad {
                0.0
            } else {
                recent[i - pad] * self.window[i]
            };
        }

        for (k, level) in self.smoothed.iter_mut().enumerate() {
            let (mut re, mut im) = (0.0f32, 0.0f32);
            for (n, sample) in self.frame.iter().enumerate() {
                let (cos, sin) = self.twiddles[k * n % size];
                re += sample * cos;
                im -= sample * sin;
            }
            let magnitude = (re * re + im * im).sqrt() / size as f32;
            *level = SMOOTHING * *level + (1.0 - SMOOTHING) * magnitude;
        }

        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.smoothed.get(i).map_or(0, |level| to_byte(*level));
        }
    }
}

fn to_byte(magnitude: f32) -> u8 {
    if magnitude <= 0.0 {
        return 0;
    }
    let db = 20.0 * magnitude.log10();
    let scaled = (db - MIN_DECIBELS) / (MAX_DECIBELS - MIN_DECIBELS) * 255.0;
    scaled.clamp(0.0, 255.0) as u8
}
