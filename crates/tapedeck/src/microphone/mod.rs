mod backend;
mod shared_capture;
mod spectrum;
mod wav_encoder;

pub(crate) use {
    backend::CpalBackend,
    shared_capture::SharedCapture,
    spectrum::SpectrumAnalyzer,
    wav_encoder::{WAV_MIME_TYPE, WavEncoder},
};

#[cfg(test)]
pub(crate) use shared_capture::MAX_PENDING_SAMPLES;
