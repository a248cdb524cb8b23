//! Keystroke Feature Extraction
//!
//! Timing events -> hold-duration vector. The vector length is a strict
//! shape check against the trained keystroke model's input
//! dimensionality, not a heuristic.

use crate::constants::DEFAULT_EXPECTED_KEY_PRESSES;
use crate::logic::error::{VerifyError, VerifyResult};
use crate::logic::features::FeatureVector;
use crate::logic::sample::{KeyEventKind, KeystrokeSample, Modality};

/// Hold durations per sample; fixed by the trained keystroke model
pub const KEYSTROKE_FEATURE_COUNT: usize = DEFAULT_EXPECTED_KEY_PRESSES;

#[derive(Debug, Clone)]
pub struct KeystrokeFeatureExtractor {
    expected_presses: usize,
}

impl KeystrokeFeatureExtractor {
    pub fn new(expected_presses: usize) -> Self {
        Self { expected_presses }
    }

    pub fn expected_presses(&self) -> usize {
        self.expected_presses
    }

    /// Extract the hold-duration vector.
    ///
    /// Events variant: `hold[i] = up[i].time - down[i].time` in capture
    /// order; down and up counts must match, and the press count must
    /// equal the configured phrase length. Delays variant: the delay list
    /// is the vector, same length check.
    pub fn extract(&self, sample: &KeystrokeSample) -> VerifyResult<FeatureVector> {
        let values = match sample {
            KeystrokeSample::Events(events) => {
                let downs: Vec<f64> = events
                    .iter()
                    .filter(|e| e.kind == KeyEventKind::Down)
                    .map(|e| e.time)
                    .collect();
                let ups: Vec<f64> = events
                    .iter()
                    .filter(|e| e.kind == KeyEventKind::Up)
                    .map(|e| e.time)
                    .collect();

                if downs.len() != ups.len() {
                    return Err(VerifyError::MalformedSample(format!(
                        "mismatched number of key down/up events ({} down, {} up)",
                        downs.len(),
                        ups.len()
                    )));
                }
                if downs.len() != self.expected_presses {
                    return Err(VerifyError::SampleLength {
                        expected: self.expected_presses,
                        got: downs.len(),
                    });
                }

                downs
                    .iter()
                    .zip(ups.iter())
                    .map(|(down, up)| (up - down) as f32)
                    .collect()
            }
            KeystrokeSample::Delays(delays) => {
                if delays.len() != self.expected_presses {
                    return Err(VerifyError::SampleLength {
                        expected: self.expected_presses,
                        got: delays.len(),
                    });
                }
                delays.clone()
            }
        };

        Ok(FeatureVector::new(Modality::Keystroke, values))
    }
}

impl Default for KeystrokeFeatureExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_EXPECTED_KEY_PRESSES)
    }
}
