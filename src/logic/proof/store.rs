//! Proof Store
//!
//! Optional local persistence for sealed proof records: one
//! `proof-<timestamp>.json` per record under a base directory. Downstream
//! uploaders consume these files; the generator itself stays free of I/O.

use std::fs;
use std::path::{Path, PathBuf};

use crate::logic::error::VerifyResult;
use crate::logic::proof::ProofRecord;

pub struct ProofStore {
    base_dir: PathBuf,
}

impl ProofStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Persist a sealed record, returning the file path
    pub fn save(&self, proof: &ProofRecord) -> VerifyResult<PathBuf> {
        fs::create_dir_all(&self.base_dir)?;
        let path = self
            .base_dir
            .join(format!("proof-{}.json", proof.timestamp));
        fs::write(&path, serde_json::to_string_pretty(proof)?)?;
        log::info!("Proof saved to {}", path.display());
        Ok(path)
    }

    /// Read a persisted record back
    pub fn load(path: impl AsRef<Path>) -> VerifyResult<ProofRecord> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
