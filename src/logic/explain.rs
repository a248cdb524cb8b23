//! Decision Explanation
//!
//! Deterministic, template-based explanation of a fused decision for
//! operators and downstream UIs. Works from the decision alone; no
//! external services involved.

use serde::{Deserialize, Serialize};

use crate::logic::decision::{ModalityResult, VerificationDecision};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainResult {
    pub summary: String,
    pub details: Vec<String>,
}

fn describe(name: &str, result: Option<&ModalityResult>) -> String {
    match result {
        Some(r) => match r.raw_score {
            Some(score) => format!(
                "{} sample classified as {} (score {:.2})",
                name, r.label, score
            ),
            None => format!("{} sample classified as {}", name, r.label),
        },
        None => format!("{} sample not supplied", name),
    }
}

/// Explain why a decision verified or rejected the user
pub fn explain(decision: &VerificationDecision) -> ExplainResult {
    let details = vec![
        describe("Voice", decision.voice_result.as_ref()),
        describe("Keystroke", decision.keystroke_result.as_ref()),
    ];

    let supplied =
        decision.voice_result.is_some() || decision.keystroke_result.is_some();

    let summary = if decision.verified {
        "Verified: at least one biometric signal shows human behavior.".to_string()
    } else if !supplied {
        "Not verified: no biometric evidence was supplied.".to_string()
    } else {
        "Not verified: every supplied signal shows bot behavior.".to_string()
    };

    ExplainResult { summary, details }
}
