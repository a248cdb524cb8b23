//! Verification Pipeline - Orchestrator
//!
//! Sequences extraction -> classification -> decision -> proof for one
//! verification request. Classifier handles are injected, shared and
//! read-only; requests share no other state.
//!
//! Failure policy: an extraction or classification error degrades that
//! modality to absent and the request continues on whatever evidence
//! remains. `ModelUnavailable` is the exception - it signals
//! misconfiguration and aborts the request instead of being swallowed.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::logic::config::PipelineConfig;
use crate::logic::decision::{decide, ModalityResult, VerificationDecision};
use crate::logic::error::VerifyResult;
use crate::logic::features::{KeystrokeFeatureExtractor, MfccExtractor};
use crate::logic::model::{Classifier, ModelStore};
use crate::logic::proof::ProofRecord;
use crate::logic::sample::{KeystrokeSample, Modality, VoiceSample};

/// Result of one verification request
#[derive(Debug, Clone, Serialize)]
pub struct VerificationOutcome {
    /// Correlation id for logs; not part of the proof
    pub request_id: Uuid,
    pub verified: bool,
    pub decision: VerificationDecision,
    pub proof: ProofRecord,
}

pub struct VerificationPipeline {
    voice_extractor: MfccExtractor,
    keystroke_extractor: KeystrokeFeatureExtractor,
    voice_classifier: Arc<dyn Classifier>,
    keystroke_classifier: Arc<dyn Classifier>,
}

impl std::fmt::Debug for VerificationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationPipeline").finish_non_exhaustive()
    }
}

impl VerificationPipeline {
    /// Build from explicit classifier handles (tests inject fakes here)
    pub fn new(
        voice_classifier: Arc<dyn Classifier>,
        keystroke_classifier: Arc<dyn Classifier>,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            voice_extractor: MfccExtractor::for_rate(config.sample_rate),
            keystroke_extractor: KeystrokeFeatureExtractor::new(config.expected_key_presses),
            voice_classifier,
            keystroke_classifier,
        }
    }

    /// Build with both classifiers resolved from the model store.
    ///
    /// Fails loud when either parameter file is missing - a pipeline
    /// without its models is misconfigured, not degraded.
    pub fn from_store(store: &ModelStore, config: &PipelineConfig) -> VerifyResult<Self> {
        let voice = store.load(Modality::Voice)?;
        let keystroke = store.load(Modality::Keystroke)?;
        Ok(Self::new(voice, keystroke, config))
    }

    /// Run one verification request over whatever samples were supplied.
    ///
    /// Returns the fused verdict and the sealed proof. Only
    /// `ModelUnavailable` aborts; every other per-modality failure
    /// degrades that modality to absent (fail-closed: no evidence, no
    /// pass).
    pub fn verify(
        &self,
        voice: Option<&VoiceSample>,
        keystroke: Option<&KeystrokeSample>,
    ) -> VerifyResult<VerificationOutcome> {
        let request_id = Uuid::new_v4();

        let voice_result = match voice {
            Some(sample) => self.degrade_on_error(
                request_id,
                Modality::Voice,
                self.voice_extractor
                    .extract(sample)
                    .and_then(|features| self.voice_classifier.classify(&features)),
            )?,
            None => None,
        };

        let keystroke_result = match keystroke {
            Some(sample) => self.degrade_on_error(
                request_id,
                Modality::Keystroke,
                self.keystroke_extractor
                    .extract(sample)
                    .and_then(|features| self.keystroke_classifier.classify(&features)),
            )?,
            None => None,
        };

        let decision = decide(voice_result, keystroke_result);
        let proof = ProofRecord::generate(decision.voice_bit(), decision.keystroke_bit());

        log::info!(
            "Request {}: voice={}, keystroke={}, verified={}",
            request_id,
            decision
                .voice_result
                .as_ref()
                .map(|r| r.label.as_str())
                .unwrap_or("absent"),
            decision
                .keystroke_result
                .as_ref()
                .map(|r| r.label.as_str())
                .unwrap_or("absent"),
            decision.verified
        );

        Ok(VerificationOutcome {
            request_id,
            verified: decision.verified,
            decision,
            proof,
        })
    }

    /// Per-modality failure policy: keep fatal errors, degrade the rest
    fn degrade_on_error(
        &self,
        request_id: Uuid,
        modality: Modality,
        result: VerifyResult<ModalityResult>,
    ) -> VerifyResult<Option<ModalityResult>> {
        match result {
            Ok(r) => {
                log::info!(
                    "Request {}: {} prediction: {}",
                    request_id,
                    modality,
                    r.label
                );
                Ok(Some(r))
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                log::warn!(
                    "Request {}: {} modality degraded to absent: {}",
                    request_id,
                    modality,
                    e
                );
                Ok(None)
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SAMPLE_RATE;
    use crate::logic::decision::Label;
    use crate::logic::error::VerifyError;
    use crate::logic::model::LinearClassifier;
    use crate::logic::sample::{AudioFormat, KeyEvent};

    /// Always answers with a fixed label
    struct FixedClassifier {
        modality: Modality,
        label: Label,
    }

    impl Classifier for FixedClassifier {
        fn modality(&self) -> Modality {
            self.modality
        }

        fn dim(&self) -> usize {
            crate::logic::features::FeatureVector::expected_len(self.modality)
        }

        fn classify(
            &self,
            _features: &crate::logic::features::FeatureVector,
        ) -> VerifyResult<ModalityResult> {
            Ok(ModalityResult {
                modality: self.modality,
                label: self.label,
                raw_score: None,
            })
        }
    }

    /// Always fails with a configurable error
    struct FailingClassifier {
        modality: Modality,
        fatal: bool,
    }

    impl Classifier for FailingClassifier {
        fn modality(&self) -> Modality {
            self.modality
        }

        fn dim(&self) -> usize {
            0
        }

        fn classify(
            &self,
            _features: &crate::logic::features::FeatureVector,
        ) -> VerifyResult<ModalityResult> {
            if self.fatal {
                Err(VerifyError::ModelUnavailable {
                    modality: self.modality,
                    reason: "parameters missing".to_string(),
                })
            } else {
                Err(VerifyError::DimensionMismatch {
                    expected: 13,
                    got: 0,
                })
            }
        }
    }

    fn fixed(modality: Modality, label: Label) -> Arc<dyn Classifier> {
        Arc::new(FixedClassifier { modality, label })
    }

    fn voice_sample() -> VoiceSample {
        let samples: Vec<f32> = (0..8000)
            .map(|i| (2.0 * std::f32::consts::PI * 330.0 * i as f32 / SAMPLE_RATE as f32).sin())
            .collect();
        VoiceSample::new(samples, SAMPLE_RATE, AudioFormat::Wav)
    }

    fn keystroke_sample() -> KeystrokeSample {
        let mut events = Vec::new();
        for i in 0..10 {
            let down = i as f64 * 0.15;
            events.push(KeyEvent::down(format!("k{}", i), down));
            events.push(KeyEvent::up(format!("k{}", i), down + 0.07));
        }
        KeystrokeSample::Events(events)
    }

    fn pipeline(voice: Label, keystroke: Label) -> VerificationPipeline {
        VerificationPipeline::new(
            fixed(Modality::Voice, voice),
            fixed(Modality::Keystroke, keystroke),
            &PipelineConfig::default(),
        )
    }

    #[test]
    fn test_human_human_verifies() {
        let outcome = pipeline(Label::Human, Label::Human)
            .verify(Some(&voice_sample()), Some(&keystroke_sample()))
            .unwrap();

        assert!(outcome.verified);
        assert_eq!(outcome.proof.voice_result, 1);
        assert_eq!(outcome.proof.keystroke_result, 1);
        assert!(outcome.proof.verified);
        assert_eq!(outcome.proof.hash.len(), 64);
        assert!(outcome.proof.verify_integrity());
    }

    #[test]
    fn test_bot_with_absent_modality_fails() {
        let outcome = pipeline(Label::Bot, Label::Bot)
            .verify(Some(&voice_sample()), None)
            .unwrap();

        assert!(!outcome.verified);
        assert_eq!(outcome.proof.voice_result, 0);
        assert_eq!(outcome.proof.keystroke_result, 0);
        assert!(!outcome.proof.verified);
        assert!(outcome.decision.keystroke_result.is_none());
    }

    #[test]
    fn test_no_samples_fails_closed() {
        let outcome = pipeline(Label::Human, Label::Human)
            .verify(None, None)
            .unwrap();

        assert!(!outcome.verified);
        assert_eq!(outcome.proof.voice_result, 0);
        assert_eq!(outcome.proof.keystroke_result, 0);
    }

    #[test]
    fn test_extraction_error_degrades_one_modality() {
        // Voice sample at the wrong rate: extraction fails, keystroke
        // alone decides
        let bad_voice = VoiceSample::new(vec![0.1; 800], 8_000, AudioFormat::Wav);
        let outcome = pipeline(Label::Human, Label::Human)
            .verify(Some(&bad_voice), Some(&keystroke_sample()))
            .unwrap();

        assert!(outcome.verified);
        assert!(outcome.decision.voice_result.is_none());
        assert_eq!(outcome.proof.voice_result, 0);
        assert_eq!(outcome.proof.keystroke_result, 1);
    }

    #[test]
    fn test_classification_error_degrades_one_modality() {
        let pipeline = VerificationPipeline::new(
            Arc::new(FailingClassifier {
                modality: Modality::Voice,
                fatal: false,
            }),
            fixed(Modality::Keystroke, Label::Bot),
            &PipelineConfig::default(),
        );

        let outcome = pipeline
            .verify(Some(&voice_sample()), Some(&keystroke_sample()))
            .unwrap();
        assert!(!outcome.verified);
        assert!(outcome.decision.voice_result.is_none());
    }

    #[test]
    fn test_model_unavailable_is_fatal() {
        let pipeline = VerificationPipeline::new(
            Arc::new(FailingClassifier {
                modality: Modality::Voice,
                fatal: true,
            }),
            fixed(Modality::Keystroke, Label::Human),
            &PipelineConfig::default(),
        );

        let err = pipeline
            .verify(Some(&voice_sample()), Some(&keystroke_sample()))
            .unwrap_err();
        assert!(matches!(err, VerifyError::ModelUnavailable { .. }));
    }

    #[test]
    fn test_from_store_with_trained_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path());

        // Voice boundary biased towards human; keystroke biased against
        store
            .save(&LinearClassifier::new(Modality::Voice, vec![0.0; 13], 1.0))
            .unwrap();
        store
            .save(&LinearClassifier::new(
                Modality::Keystroke,
                vec![0.0; 10],
                -1.0,
            ))
            .unwrap();

        let pipeline =
            VerificationPipeline::from_store(&store, &PipelineConfig::default()).unwrap();
        let outcome = pipeline
            .verify(Some(&voice_sample()), Some(&keystroke_sample()))
            .unwrap();

        assert!(outcome.verified);
        assert_eq!(outcome.proof.voice_result, 1);
        assert_eq!(outcome.proof.keystroke_result, 0);
    }

    #[test]
    fn test_from_store_missing_model_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path());

        let err =
            VerificationPipeline::from_store(&store, &PipelineConfig::default()).unwrap_err();
        assert!(matches!(err, VerifyError::ModelUnavailable { .. }));
    }
}
