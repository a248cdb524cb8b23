//! Voice Feature Extraction
//!
//! Waveform -> 13 MFCC coefficients per frame, averaged over the time
//! axis. The vector length is fixed by the trained voice model.

use ndarray::{Array2, Axis};
use once_cell::sync::Lazy;

use crate::constants::SAMPLE_RATE;
use crate::logic::error::{VerifyError, VerifyResult};
use crate::logic::features::dsp;
use crate::logic::features::FeatureVector;
use crate::logic::sample::{Modality, VoiceSample};

/// MFCC coefficients per frame; fixed by the trained voice model
pub const VOICE_FEATURE_COUNT: usize = 13;

/// Frame length in samples (25 ms at 16 kHz)
const FRAME_LEN: usize = 400;

/// Hop between frames in samples (10 ms at 16 kHz)
const HOP_LEN: usize = 160;

/// FFT size; frames are zero-padded up to this
const N_FFT: usize = 512;

/// Mel filters feeding the DCT
const N_MELS: usize = 26;

/// Floor applied before the log, keeps silent bins finite
const LOG_FLOOR: f32 = 1e-10;

/// Shared tables for the default 16 kHz rate, built once per process
static DEFAULT_16K: Lazy<MfccExtractor> = Lazy::new(|| MfccExtractor::new(SAMPLE_RATE));

/// MFCC extractor with precomputed window, filterbank and DCT basis.
///
/// Deterministic: identical waveform and sample rate always yield the
/// identical vector.
#[derive(Debug, Clone)]
pub struct MfccExtractor {
    sample_rate: u32,
    window: Vec<f32>,
    filterbank: Vec<Vec<f32>>,
    dct: Vec<Vec<f32>>,
}

impl MfccExtractor {
    pub fn new(sample_rate: u32) -> Self {
        let fmax = sample_rate as f32 / 2.0;
        Self {
            sample_rate,
            window: dsp::hann_window(FRAME_LEN),
            filterbank: dsp::mel_filterbank(N_MELS, N_FFT, sample_rate, 0.0, fmax),
            dct: dsp::dct_ii_basis(VOICE_FEATURE_COUNT, N_MELS),
        }
    }

    /// Extractor for the given rate, reusing the shared 16 kHz tables
    /// when possible
    pub fn for_rate(sample_rate: u32) -> Self {
        if sample_rate == SAMPLE_RATE {
            DEFAULT_16K.clone()
        } else {
            Self::new(sample_rate)
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Extract the 13-element MFCC-mean vector
    pub fn extract(&self, sample: &VoiceSample) -> VerifyResult<FeatureVector> {
        if sample.samples.is_empty() {
            return Err(VerifyError::InvalidAudio("empty waveform".to_string()));
        }
        if sample.samples.iter().any(|v| !v.is_finite()) {
            return Err(VerifyError::InvalidAudio(
                "waveform contains non-finite samples".to_string(),
            ));
        }
        if sample.sample_rate != self.sample_rate {
            return Err(VerifyError::InvalidAudio(format!(
                "sample rate {} Hz, extractor expects {} Hz",
                sample.sample_rate, self.sample_rate
            )));
        }

        let n_frames = if sample.samples.len() < FRAME_LEN {
            1
        } else {
            1 + (sample.samples.len() - FRAME_LEN) / HOP_LEN
        };

        let mut mfcc = Array2::<f32>::zeros((n_frames, VOICE_FEATURE_COUNT));
        let mut frame = vec![0.0f32; FRAME_LEN];

        for i in 0..n_frames {
            let start = i * HOP_LEN;
            let end = (start + FRAME_LEN).min(sample.samples.len());
            frame.fill(0.0);
            frame[..end - start].copy_from_slice(&sample.samples[start..end]);
            for (v, w) in frame.iter_mut().zip(self.window.iter()) {
                *v *= w;
            }

            let spectrum = dsp::power_spectrum(&frame, N_FFT);

            let log_mel: Vec<f32> = self
                .filterbank
                .iter()
                .map(|filter| {
                    let energy: f32 = filter
                        .iter()
                        .zip(spectrum.iter())
                        .map(|(w, p)| w * p)
                        .sum();
                    energy.max(LOG_FLOOR).ln()
                })
                .collect();

            for (k, basis_row) in self.dct.iter().enumerate() {
                mfcc[[i, k]] = basis_row
                    .iter()
                    .zip(log_mel.iter())
                    .map(|(b, m)| b * m)
                    .sum();
            }
        }

        let means = mfcc
            .mean_axis(Axis(0))
            .expect("at least one frame")
            .to_vec();

        log::debug!(
            "MFCC extracted: {} frames from {:.2}s of audio",
            n_frames,
            sample.duration_secs()
        );

        Ok(FeatureVector::new(Modality::Voice, means))
    }
}

impl Default for MfccExtractor {
    fn default() -> Self {
        Self::for_rate(SAMPLE_RATE)
    }
}
