//! Proof Module - Tamper-Evident Verification Records
//!
//! A proof record is a hash-sealed assertion of one verification
//! outcome, not a zero-knowledge circuit. The seal covers the canonical
//! serialization (JSON, keys sorted, hash excluded), so any mutation of
//! a sealed record is detectable by recomputation.

pub mod store;

pub use store::ProofStore;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::logic::decision::VerificationDecision;

/// Downstream wire contract: field names and types are frozen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofRecord {
    /// 1 = voice classified human, 0 = bot or absent
    pub voice_result: u8,
    /// 1 = keystroke classified human, 0 = bot or absent
    pub keystroke_result: u8,
    pub verified: bool,
    /// Unix seconds
    pub timestamp: i64,
    /// SHA-256 over the canonical serialization, hex encoded
    pub hash: String,
}

impl ProofRecord {
    /// Build and seal a record, stamping the current time
    pub fn generate(voice_result: u8, keystroke_result: u8) -> ProofRecord {
        Self::generate_at(
            voice_result,
            keystroke_result,
            chrono::Utc::now().timestamp(),
        )
    }

    /// Build and seal a record at an explicit timestamp.
    ///
    /// The verified flag is recomputed from the two integers with the
    /// same rule the decision engine applies: 1 on either side passes.
    pub fn generate_at(voice_result: u8, keystroke_result: u8, timestamp: i64) -> ProofRecord {
        let verified = voice_result == 1 || keystroke_result == 1;

        let mut record = ProofRecord {
            voice_result,
            keystroke_result,
            verified,
            timestamp,
            hash: String::new(),
        };
        record.hash = record.compute_hash();

        log::info!(
            "Proof generated: voice={}, keystroke={}, verified={}, hash={}...",
            record.voice_result,
            record.keystroke_result,
            record.verified,
            &record.hash[..8]
        );

        record
    }

    /// Seal a fused decision's labels (0 when a modality is absent)
    pub fn from_decision(decision: &VerificationDecision) -> ProofRecord {
        Self::generate(decision.voice_bit(), decision.keystroke_bit())
    }

    /// Canonical serialization: JSON object, keys in sorted order, hash
    /// field excluded
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut fields = serde_json::Map::new();
        // Inserted in sorted key order
        fields.insert(
            "keystroke_result".to_string(),
            serde_json::json!(self.keystroke_result),
        );
        fields.insert("timestamp".to_string(), serde_json::json!(self.timestamp));
        fields.insert("verified".to_string(), serde_json::json!(self.verified));
        fields.insert(
            "voice_result".to_string(),
            serde_json::json!(self.voice_result),
        );
        serde_json::Value::Object(fields).to_string().into_bytes()
    }

    /// SHA-256 of the canonical serialization, hex encoded
    pub fn compute_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.canonical_bytes());
        hex::encode(hasher.finalize())
    }

    /// Tamper-evidence check: does the stored seal match the fields?
    pub fn verify_integrity(&self) -> bool {
        self.hash == self.compute_hash()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_deterministic_at_fixed_timestamp() {
        let a = ProofRecord::generate_at(1, 1, 1_700_000_000);
        let b = ProofRecord::generate_at(1, 1, 1_700_000_000);
        assert_eq!(a, b);
        assert_eq!(a.hash, b.hash);
    }

    #[test]
    fn test_any_field_change_changes_hash() {
        let base = ProofRecord::generate_at(1, 1, 1_700_000_000);

        let flipped_voice = ProofRecord::generate_at(0, 1, 1_700_000_000);
        assert_ne!(base.hash, flipped_voice.hash);

        let flipped_keys = ProofRecord::generate_at(1, 0, 1_700_000_000);
        assert_ne!(base.hash, flipped_keys.hash);

        let later = ProofRecord::generate_at(1, 1, 1_700_000_001);
        assert_ne!(base.hash, later.hash);
    }

    #[test]
    fn test_hash_is_64_hex_chars() {
        let record = ProofRecord::generate(1, 0);
        assert_eq!(record.hash.len(), 64);
        assert!(record.hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_verified_follows_or_rule() {
        assert!(ProofRecord::generate_at(1, 1, 0).verified);
        assert!(ProofRecord::generate_at(1, 0, 0).verified);
        assert!(ProofRecord::generate_at(0, 1, 0).verified);
        assert!(!ProofRecord::generate_at(0, 0, 0).verified);
    }

    #[test]
    fn test_integrity_roundtrip() {
        let record = ProofRecord::generate_at(0, 1, 1_700_000_000);
        assert!(record.verify_integrity());
    }

    #[test]
    fn test_tampering_is_detected() {
        let mut record = ProofRecord::generate_at(0, 0, 1_700_000_000);
        assert!(record.verify_integrity());

        // A mutated record no longer matches its seal
        record.verified = true;
        assert!(!record.verify_integrity());
    }

    #[test]
    fn test_canonical_form_sorts_keys_and_excludes_hash() {
        let record = ProofRecord::generate_at(1, 0, 42);
        let canonical = String::from_utf8(record.canonical_bytes()).unwrap();
        assert_eq!(
            canonical,
            r#"{"keystroke_result":0,"timestamp":42,"verified":true,"voice_result":1}"#
        );
    }

    #[test]
    fn test_wire_shape() {
        let record = ProofRecord::generate_at(1, 1, 42);
        let value: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["voice_result"], 1);
        assert_eq!(value["keystroke_result"], 1);
        assert_eq!(value["verified"], true);
        assert_eq!(value["timestamp"], 42);
        assert!(value["hash"].is_string());
    }
}
