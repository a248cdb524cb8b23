//! Error handling
//!
//! One taxonomy for the whole pipeline. Extraction and classification
//! failures degrade a single modality at the orchestrator boundary;
//! `ModelUnavailable` means misconfiguration, not bad input, and stays
//! fatal for the request.

use thiserror::Error;

use crate::logic::sample::Modality;

pub type VerifyResult<T> = Result<T, VerifyError>;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("invalid audio: {0}")]
    InvalidAudio(String),

    #[error("malformed keystroke sample: {0}")]
    MalformedSample(String),

    #[error("invalid keystroke sample length (got {got}, expected {expected} key presses)")]
    SampleLength { expected: usize, got: usize },

    #[error("feature vector has {got} values, classifier expects {expected}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("{modality} model unavailable: {reason}")]
    ModelUnavailable { modality: Modality, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl VerifyError {
    /// True for errors that must abort the whole request instead of
    /// degrading one modality to absent.
    pub fn is_fatal(&self) -> bool {
        matches!(self, VerifyError::ModelUnavailable { .. })
    }
}
