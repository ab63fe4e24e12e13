use std::{
    collections::VecDeque,
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use tracing::error;

/// Maximum mono samples held between two collections (30 seconds at 48kHz).
///
/// The ticker collects every second, so this only fills if the app loop
/// stalls. Oldest samples are dropped past it and counted in `dropped`.
///
/// **Memory footprint at max capacity:**
/// - 48,000 Hz * 30s * 4 bytes/f32 = ~5.8MB
pub(crate) const MAX_PENDING_SAMPLES: usize = 48_000 * 30;

/// State shared between the cpal callback and the app loop.
///
/// The callback downmixes every frame to mono, keeps the newest
/// `window_len` samples for analysis, and appends to `pending` only while
/// encoding is switched on.
#[derive(Debug)]
pub(crate) struct SharedCapture {
    channels: usize,
    window_len: usize,
    window: Mutex<VecDeque<f32>>,
    pending: Mutex<Vec<f32>>,
    encoding: AtomicBool,
    /// Pending samples discarded at the cap since the last `take_dropped`.
    dropped: AtomicUsize,
    /// Set before the stream is dropped so no late callback writes.
    shutdown: AtomicBool,
}

impl SharedCapture {
    pub(crate) fn new(channels: u16, window_len: usize) -> Self {
        Self {
            channels: usize::from(channels.max(1)),
            window_len,
            window: Mutex::new(VecDeque::with_capacity(window_len)),
            pending: Mutex::new(Vec::new()),
            encoding: AtomicBool::new(false),
            dropped: AtomicUsize::new(0),
            shutdown: AtomicBool::new(false),
        }
    }

    /// Called from the audio thread with interleaved samples.
    pub(crate) fn push_frames(&self, data: &[f32]) {
        if self.shutdown.load(Ordering::Acquire) {
            return;
        }

        let channels = self.channels;
        let mono = data
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32);

        // Recover from lock poison rather than silently dropping audio.
        let mut window = self.window.lock().unwrap_or_else(|e| {
            error!("Analysis window lock poisoned, recovering: {}", e);
            e.into_inner()
        });

        if self.encoding.load(Ordering::Acquire) {
            let mut pending = self.pending.lock().unwrap_or_else(|e| {
                error!("Pending sample lock poisoned, recovering: {}", e);
                e.into_inner()
            });
            for sample in mono {
                pending.push(sample);
                window.push_back(sample);
            }
            if pending.len() > MAX_PENDING_SAMPLES {
                let excess = pending.len() - MAX_PENDING_SAMPLES;
                pending.drain(..excess);
                self.dropped.fetch_add(excess, Ordering::AcqRel);
            }
        } else {
            window.extend(mono);
        }

        while window.len() > self.window_len {
            window.pop_front();
        }
    }

    /// Newest samples, oldest first, at most `window_len` of them.
    pub(crate) fn snapshot_window(&self, out: &mut Vec<f32>) {
        out.clear();
        let window = self.window.lock().unwrap_or_else(|e| e.into_inner());
        out.extend(window.iter().copied());
    }

    /// Samples captured while encoding since the last call.
    pub(crate) fn take_pending(&self) -> Vec<f32> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *pending)
    }

    /// Samples dropped at the pending cap since the last call.
    pub(crate) fn take_dropped(&self) -> usize {
        self.dropped.swap(0, Ordering::AcqRel)
    }

    pub(crate) fn set_encoding(&self, encoding: bool) {
        self.encoding.store(encoding, Ordering::Release);
    }

    #[cfg(test)]
    pub(crate) fn is_encoding(&self) -> bool {
        self.encoding.load(Ordering::Acquire)
    }

    pub(crate) fn shut_down(&self) {
        self.encoding.store(false, Ordering::Release);
        self.shutdown.store(true, Ordering::Release);
    }

    pub(crate) fn is_shut_down(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }
}
