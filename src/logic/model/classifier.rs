//! Classifier
//!
//! Pure decision function over a feature vector plus loaded parameters.
//! No hidden state, no side effects; the acceptance threshold is baked
//! into the trained decision boundary, nothing is tunable here.

use serde::{Deserialize, Serialize};

use crate::logic::decision::{Label, ModalityResult};
use crate::logic::error::{VerifyError, VerifyResult};
use crate::logic::features::FeatureVector;
use crate::logic::sample::Modality;

/// Classification seam. Production code loads [`LinearClassifier`]
/// parameters through the model store; tests substitute fakes.
pub trait Classifier: Send + Sync {
    fn modality(&self) -> Modality;

    /// Input dimensionality the parameters were trained on
    fn dim(&self) -> usize;

    /// Classify one feature vector into exactly Human or Bot
    fn classify(&self, features: &FeatureVector) -> VerifyResult<ModalityResult>;
}

/// Logistic decision function: Human iff `w . x + b >= 0`.
///
/// Matches the linear models the training side exports; the JSON model
/// file deserializes straight into this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearClassifier {
    pub modality: Modality,
    pub weights: Vec<f32>,
    pub bias: f32,
}

impl LinearClassifier {
    pub fn new(modality: Modality, weights: Vec<f32>, bias: f32) -> Self {
        Self {
            modality,
            weights,
            bias,
        }
    }

    fn decision_value(&self, values: &[f32]) -> f32 {
        let dot: f32 = self
            .weights
            .iter()
            .zip(values.iter())
            .map(|(w, x)| w * x)
            .sum();
        dot + self.bias
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

impl Classifier for LinearClassifier {
    fn modality(&self) -> Modality {
        self.modality
    }

    fn dim(&self) -> usize {
        self.weights.len()
    }

    fn classify(&self, features: &FeatureVector) -> VerifyResult<ModalityResult> {
        debug_assert_eq!(features.modality, self.modality);

        if features.len() != self.weights.len() {
            return Err(VerifyError::DimensionMismatch {
                expected: self.weights.len(),
                got: features.len(),
            });
        }

        let value = self.decision_value(features.as_slice());
        let score = sigmoid(value);
        let label = if value >= 0.0 { Label::Human } else { Label::Bot };

        log::debug!(
            "{} classifier: decision value {:.4}, score {:.4} -> {}",
            self.modality,
            value,
            score,
            label
        );

        Ok(ModalityResult {
            modality: self.modality,
            label,
            raw_score: Some(score),
        })
    }
}
