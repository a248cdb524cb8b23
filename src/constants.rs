//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change the default model directory, only edit this file.

/// Audio sample rate the voice models are trained at (Hz)
pub const SAMPLE_RATE: u32 = 16_000;

/// Key presses the enrollment phrase produces; fixes the keystroke
/// model's input dimensionality
pub const DEFAULT_EXPECTED_KEY_PRESSES: usize = 10;

/// Default directory holding `<modality>_model.json` parameter files
pub const DEFAULT_MODEL_DIR: &str = "models";

/// Default directory for persisted proof records
pub const DEFAULT_PROOF_DIR: &str = "proofs";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "liveness-core";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get the model directory from environment or use default
pub fn get_model_dir() -> String {
    std::env::var("LIVENESS_MODEL_DIR").unwrap_or_else(|_| DEFAULT_MODEL_DIR.to_string())
}

/// Get the proof output directory from environment or use default
pub fn get_proof_dir() -> String {
    std::env::var("LIVENESS_PROOF_DIR").unwrap_or_else(|_| DEFAULT_PROOF_DIR.to_string())
}

/// Get the expected key-press count from environment or use default
pub fn get_expected_key_presses() -> usize {
    std::env::var("LIVENESS_KEY_PRESSES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_EXPECTED_KEY_PRESSES)
}
