//! Integration Tests for Feature Extraction Modules
//!
//! Both extractors exercised together, the way the orchestrator drives
//! them for a two-modality request.

#[cfg(test)]
mod integration_tests {
    use crate::constants::SAMPLE_RATE;
    use crate::logic::features::{
        FeatureVector, KeystrokeFeatureExtractor, MfccExtractor, KEYSTROKE_FEATURE_COUNT,
        VOICE_FEATURE_COUNT,
    };
    use crate::logic::sample::{AudioFormat, KeyEvent, KeystrokeSample, Modality, VoiceSample};

    fn voice_fixture() -> VoiceSample {
        // Two-tone chirp, half a second
        let samples: Vec<f32> = (0..(SAMPLE_RATE / 2) as usize)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                0.6 * (2.0 * std::f32::consts::PI * 200.0 * t).sin()
                    + 0.4 * (2.0 * std::f32::consts::PI * 950.0 * t).sin()
            })
            .collect();
        VoiceSample::new(samples, SAMPLE_RATE, AudioFormat::Wav)
    }

    fn keystroke_fixture() -> KeystrokeSample {
        let mut events = Vec::new();
        for i in 0..10 {
            let down = i as f64 * 0.18;
            events.push(KeyEvent::down(format!("k{}", i), down));
            events.push(KeyEvent::up(format!("k{}", i), down + 0.08 + i as f64 * 0.003));
        }
        KeystrokeSample::Events(events)
    }

    /// Both modalities extracted from one request's samples
    #[test]
    fn test_both_extractors_combined() {
        let voice = MfccExtractor::default().extract(&voice_fixture()).unwrap();
        let keys = KeystrokeFeatureExtractor::default()
            .extract(&keystroke_fixture())
            .unwrap();

        assert_eq!(voice.modality, Modality::Voice);
        assert_eq!(voice.len(), VOICE_FEATURE_COUNT);
        assert_eq!(keys.modality, Modality::Keystroke);
        assert_eq!(keys.len(), KEYSTROKE_FEATURE_COUNT);

        assert!(voice.values.iter().all(|v| v.is_finite()));
        // Human-plausible hold durations are strictly positive
        assert!(keys.values.iter().all(|&v| v > 0.0));
    }

    /// Extractor output lengths match what the default models expect
    #[test]
    fn test_vector_lengths_match_model_contract() {
        assert_eq!(FeatureVector::expected_len(Modality::Voice), 13);
        assert_eq!(FeatureVector::expected_len(Modality::Keystroke), 10);
    }

    /// The whole feature stage is deterministic across extractor instances
    #[test]
    fn test_extraction_deterministic_across_instances() {
        let sample = voice_fixture();
        let a = MfccExtractor::default().extract(&sample).unwrap();
        let b = MfccExtractor::new(SAMPLE_RATE).extract(&sample).unwrap();
        assert_eq!(a.values, b.values);
    }

    /// An error in one modality's input leaves the other untouched
    #[test]
    fn test_modalities_are_independent() {
        let bad_voice = VoiceSample::new(vec![], SAMPLE_RATE, AudioFormat::Wav);
        assert!(MfccExtractor::default().extract(&bad_voice).is_err());

        let keys = KeystrokeFeatureExtractor::default()
            .extract(&keystroke_fixture())
            .unwrap();
        assert_eq!(keys.len(), KEYSTROKE_FEATURE_COUNT);
    }
}
