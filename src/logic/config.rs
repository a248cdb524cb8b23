//! Pipeline Configuration
//!
//! Operational knobs for one pipeline instance. Defaults come from
//! `constants`; `from_env` applies the documented environment overrides.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory holding `<modality>_model.json` parameter files
    pub model_dir: PathBuf,

    /// Where to persist sealed proofs; `None` disables persistence
    pub proof_dir: Option<PathBuf>,

    /// Audio sample rate the voice extractor expects (Hz)
    pub sample_rate: u32,

    /// Key presses the enrollment phrase produces
    pub expected_key_presses: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from(constants::DEFAULT_MODEL_DIR),
            proof_dir: None,
            sample_rate: constants::SAMPLE_RATE,
            expected_key_presses: constants::DEFAULT_EXPECTED_KEY_PRESSES,
        }
    }
}

impl PipelineConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        Self {
            model_dir: PathBuf::from(constants::get_model_dir()),
            proof_dir: None,
            sample_rate: constants::SAMPLE_RATE,
            expected_key_presses: constants::get_expected_key_presses(),
        }
    }

    pub fn with_proof_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.proof_dir = Some(dir.into());
        self
    }
}
