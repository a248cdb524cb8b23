//! Decision Engine
//!
//! Fuses per-modality classification results into the final verdict.
//! Fusion rule: verified iff at least one supplied result is Human, and
//! at least one modality was actually supplied. Missing evidence fails
//! closed. A single human signal is sufficient to pass; a bot attacker is
//! assumed unlikely to defeat both modalities at once.

use serde::{Deserialize, Serialize};

use crate::logic::sample::Modality;

// ============================================================================
// LABELS
// ============================================================================

/// Binary classification label. There is no "unknown" variant; absence of
/// a result is represented by omission, never by a third label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Human,
    Bot,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Human => "human",
            Label::Bot => "bot",
        }
    }

    /// Wire encoding used by the proof record: 1 = human, 0 = bot
    pub fn as_int(&self) -> u8 {
        match self {
            Label::Human => 1,
            Label::Bot => 0,
        }
    }

    pub fn is_human(&self) -> bool {
        *self == Label::Human
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RESULTS
// ============================================================================

/// Outcome of classifying one modality's sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalityResult {
    pub modality: Modality,
    pub label: Label,
    /// Classifier confidence in (0, 1) when the model exposes one
    pub raw_score: Option<f32>,
}

/// Fused verdict for one verification request. Derived once, never
/// mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationDecision {
    pub voice_result: Option<ModalityResult>,
    pub keystroke_result: Option<ModalityResult>,
    pub verified: bool,
}

impl VerificationDecision {
    /// Voice label coerced to the proof's 0/1 encoding; 0 when absent
    pub fn voice_bit(&self) -> u8 {
        self.voice_result
            .as_ref()
            .map(|r| r.label.as_int())
            .unwrap_or(0)
    }

    /// Keystroke label coerced to the proof's 0/1 encoding; 0 when absent
    pub fn keystroke_bit(&self) -> u8 {
        self.keystroke_result
            .as_ref()
            .map(|r| r.label.as_int())
            .unwrap_or(0)
    }
}

// ============================================================================
// FUSION
// ============================================================================

/// Fuse zero, one, or two modality results.
///
/// Total over its inputs: never errors, no retries, computed once per
/// request from whatever results the upstream stages produced.
pub fn decide(
    voice: Option<ModalityResult>,
    keystroke: Option<ModalityResult>,
) -> VerificationDecision {
    let verified = voice.as_ref().map(|r| r.label.is_human()).unwrap_or(false)
        || keystroke
            .as_ref()
            .map(|r| r.label.is_human())
            .unwrap_or(false);

    VerificationDecision {
        voice_result: voice,
        keystroke_result: keystroke,
        verified,
    }
}

// ============================================================================
// TESTS
// ============================================================================
