//! Model Store
//!
//! Named parameter store keyed by modality: one `<modality>_model.json`
//! per trained classifier under a base directory. A missing or corrupt
//! file is a loud `ModelUnavailable`, never a silent default - absence
//! means misconfiguration, not bad input.
//!
//! Loaded handles are cached for the store's lifetime and shared
//! read-only across requests.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::logic::error::{VerifyError, VerifyResult};
use crate::logic::model::classifier::LinearClassifier;
use crate::logic::sample::Modality;

pub struct ModelStore {
    dir: PathBuf,
    cache: RwLock<HashMap<Modality, Arc<LinearClassifier>>>,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the parameter file backing the given modality
    pub fn model_path(&self, modality: Modality) -> PathBuf {
        self.dir.join(format!("{}_model.json", modality))
    }

    /// Load (or fetch from cache) the classifier for a modality.
    ///
    /// Resolved once per store lifetime; the returned handle is
    /// `Send + Sync` and safe to share across concurrent requests.
    pub fn load(&self, modality: Modality) -> VerifyResult<Arc<LinearClassifier>> {
        if let Some(model) = self.cache.read().get(&modality) {
            return Ok(model.clone());
        }

        let path = self.model_path(modality);
        if !path.exists() {
            return Err(VerifyError::ModelUnavailable {
                modality,
                reason: format!("{} not found", path.display()),
            });
        }

        let raw = fs::read_to_string(&path).map_err(|e| VerifyError::ModelUnavailable {
            modality,
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let model: LinearClassifier =
            serde_json::from_str(&raw).map_err(|e| VerifyError::ModelUnavailable {
                modality,
                reason: format!("failed to parse {}: {}", path.display(), e),
            })?;

        if model.modality != modality {
            return Err(VerifyError::ModelUnavailable {
                modality,
                reason: format!(
                    "{} declares modality '{}'",
                    path.display(),
                    model.modality
                ),
            });
        }

        log::info!(
            "Loaded {} model from {} ({} weights)",
            modality,
            path.display(),
            model.weights.len()
        );

        let model = Arc::new(model);
        self.cache.write().insert(modality, model.clone());
        Ok(model)
    }

    /// Write a parameter file into the store (training/tooling side)
    pub fn save(&self, model: &LinearClassifier) -> VerifyResult<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.model_path(model.modality);
        fs::write(&path, serde_json::to_string_pretty(model)?)?;
        log::info!("Saved {} model to {}", model.modality, path.display());
        Ok(path)
    }
}
