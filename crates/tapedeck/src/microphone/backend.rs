use crate::microphone::{SharedCapture, SpectrumAnalyzer, WAV_MIME_TYPE, WavEncoder};

use std::{panic::Location, sync::Arc};

use cpal::{
    BuildStreamError, Stream, StreamConfig,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use tapedeck_core::{
    CoreError, CoreResult,
    capture::{AnalysisTap, CaptureBackend, ChunkEncoder, EncodingChoice, MicrophoneStream},
};
use tracing::{debug, error, info, instrument};

/// Capture backend on the default cpal input device.
pub(crate) struct CpalBackend {
    host: cpal::Host,
    bins: usize,
    /// Capture state and sample rate of the most recently acquired stream.
    current: Option<(Arc<SharedCapture>, u32)>,
}

impl CpalBackend {
    /// `bins` sets the analysis tap resolution of acquired streams.
    pub(crate) fn new(bins: usize) -> Self {
        Self {
            host: cpal::default_host(),
            bins,
            current: None,
        }
    }
}

impl CaptureBackend for CpalBackend {
    fn supports_encoding(&self, mime_type: &str) -> bool {
        mime_type == WAV_MIME_TYPE
    }

    #[track_caller]
    #[instrument(skip(self))]
    fn acquire_microphone(&mut self) -> CoreResult<Box<dyn MicrophoneStream>> {
        let device =
            self.host
                .default_input_device()
                .ok_or_else(|| CoreError::PermissionDenied {
                    reason: "No input device available".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })?;

        let supported = device
            .default_input_config()
            .map_err(|e| CoreError::DeviceError {
                reason: format!("Failed to get config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let config: StreamConfig = supported.into();
        let analyzer = SpectrumAnalyzer::new(self.bins);
        let capture = Arc::new(SharedCapture::new(config.channels, analyzer.size()));

        let callback_capture = Arc::clone(&capture);
        let stream = device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    callback_capture.push_frames(data);
                },
                |err| {
                    error!("Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| match e {
                BuildStreamError::DeviceNotAvailable => CoreError::PermissionDenied {
                    reason: format!("Input device unavailable: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                },
                other => CoreError::DeviceError {
                    reason: format!("Failed to build stream: {}", other),
                    location: ErrorLocation::from(Location::caller()),
                },
            })?;

        stream.play().map_err(|e| CoreError::DeviceError {
            reason: format!("Failed to start stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(
            device_id = ?device.id(),
            sample_rate = config.sample_rate,
            channels = config.channels,
            bins = self.bins,
            "Microphone acquired"
        );

        self.current = Some((Arc::clone(&capture), config.sample_rate));

        Ok(Box::new(CpalStream {
            stream: Some(stream),
            capture,
            analyzer,
            window: Vec::new(),
        }))
    }

    #[track_caller]
    fn create_encoder(&mut self, encoding: &EncodingChoice) -> CoreResult<Box<dyn ChunkEncoder>> {
        if encoding.mime_type() != WAV_MIME_TYPE {
            return Err(CoreError::EncoderError {
                reason: format!("Unsupported encoding: {}", encoding.mime_type()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        match &self.current {
            Some((capture, sample_rate)) if !capture.is_shut_down() => {
                debug!(sample_rate, "WAV encoder created");
                Ok(Box::new(WavEncoder::new(Arc::clone(capture), *sample_rate)))
            }
            _ => Err(CoreError::EncoderError {
                reason: "No open microphone stream to encode".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

/// An open cpal input stream plus its analysis tap.
pub(crate) struct CpalStream {
    stream: Option<Stream>,
    capture: Arc<SharedCapture>,
    analyzer: SpectrumAnalyzer,
    window: Vec<f32>,
}

impl AnalysisTap for CpalStream {
    fn bin_count(&self) -> usize {
        self.analyzer.bins()
    }

    fn frequency_data(&mut self, out: &mut [u8]) {
        self.capture.snapshot_window(&mut self.window);
        self.analyzer.analyze(&self.window, out);
    }
}

impl MicrophoneStream for CpalStream {
    fn release(&mut self) {
        // Signal the callback before dropping so no late callback writes.
        self.capture.shut_down();
        if let Some(stream) = self.stream.take() {
            drop(stream);
            info!("Microphone released");
        }
    }
}

impl Drop for CpalStream {
    fn drop(&mut self) {
        self.release();
    }
}
