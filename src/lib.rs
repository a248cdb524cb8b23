//! Liveness Verification Core
//!
//! Classifies a user as human or bot from two weak biometric signals -
//! voice audio and keystroke timing - and seals the outcome into a
//! tamper-evident proof record.
//!
//! # Architecture
//!
//! The pipeline processes one request in four stages:
//!
//! 1. Feature extraction: raw sample -> fixed-length vector
//!    (13 MFCC means for voice, 10 hold durations for keystroke)
//! 2. Classification: vector -> Human/Bot, one trained model per modality
//! 3. Fusion: OR over supplied labels, fail-closed when no evidence
//! 4. Proof: SHA-256-sealed record of the outcome
//!
//! Serving layers (HTTP upload handling, proof uploaders, capture UIs)
//! live outside this crate and call [`VerificationPipeline::verify`].

pub mod constants;
pub mod logic;

pub use logic::config::PipelineConfig;
pub use logic::decision::{decide, Label, ModalityResult, VerificationDecision};
pub use logic::error::{VerifyError, VerifyResult};
pub use logic::explain::{explain, ExplainResult};
pub use logic::features::{
    FeatureVector, KeystrokeFeatureExtractor, MfccExtractor, KEYSTROKE_FEATURE_COUNT,
    VOICE_FEATURE_COUNT,
};
pub use logic::model::{Classifier, LinearClassifier, ModelStore};
pub use logic::pipeline::{VerificationOutcome, VerificationPipeline};
pub use logic::proof::{ProofRecord, ProofStore};
pub use logic::sample::{
    AudioFormat, KeyEvent, KeyEventKind, KeystrokeSample, Modality, RawSample, VoiceSample,
};
