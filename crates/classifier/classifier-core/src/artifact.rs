//! JSON model artifact.
//!
//! The artifact binds a fitted ensemble to the ordered feature names it was
//! trained on. Loading refuses any artifact whose feature order differs from
//! the schema compiled into this build.

use crate::booster::GradientBoostedClassifier;
use classifier_spi::{ClassifierError, Result};
use data_spi::FEATURE_COLUMNS;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind as IoErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Default artifact location, relative to the working directory. The
/// content is JSON regardless of the extension.
pub const DEFAULT_MODEL_PATH: &str = "models/kepler_model.pkl";

/// Serialized form of a trained classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Feature names in the order the model expects them
    pub feature_names: Vec<String>,
    /// Negative to positive count ratio of the training partition
    pub imbalance_ratio: f64,
    /// Fitted ensemble, including its hyperparameters
    pub model: GradientBoostedClassifier,
}

impl ModelArtifact {
    /// Wrap a fitted model with the current feature order.
    pub fn new(model: GradientBoostedClassifier, imbalance_ratio: f64) -> Self {
        Self {
            feature_names: FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect(),
            imbalance_ratio,
            model,
        }
    }

    /// Write the artifact, creating parent directories.
    ///
    /// The document is written to a sibling temporary file first and then
    /// renamed over `path`, so an existing artifact is never left half written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }

        let staging = staging_path(path);
        let written = self.write_staged(&staging, path);
        if written.is_err() {
            let _ = fs::remove_file(&staging);
        }
        written?;
        info!(path = %path.display(), trees = self.model.n_trees(), "model artifact saved");
        Ok(())
    }

    fn write_staged(&self, staging: &Path, path: &Path) -> Result<()> {
        let file = File::create(staging).map_err(|e| io_error(staging, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)
            .map_err(|e| ClassifierError::Serialization(e.to_string()))?;
        writer.flush().map_err(|e| io_error(staging, e))?;
        drop(writer);
        fs::rename(staging, path).map_err(|e| io_error(path, e))
    }

    /// Read and verify an artifact.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            IoErrorKind::NotFound => ClassifierError::MissingArtifact {
                path: path.to_path_buf(),
            },
            _ => io_error(path, e),
        })?;

        let artifact: ModelArtifact = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| ClassifierError::Serialization(e.to_string()))?;
        artifact.verify()?;
        Ok(artifact)
    }

    /// Check the feature order and the ensemble structure.
    pub fn verify(&self) -> Result<()> {
        if self.feature_names.iter().map(String::as_str).ne(FEATURE_COLUMNS.iter().copied()) {
            return Err(ClassifierError::FeatureMismatch {
                expected: FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect(),
                found: self.feature_names.clone(),
            });
        }
        self.model.validate()
    }

    pub fn into_classifier(self) -> GradientBoostedClassifier {
        self.model
    }
}

/// Load the classifier stored at `path`.
pub fn load_classifier(path: impl AsRef<Path>) -> Result<GradientBoostedClassifier> {
    ModelArtifact::load(path).map(ModelArtifact::into_classifier)
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn io_error(path: &Path, error: std::io::Error) -> ClassifierError {
    ClassifierError::Io {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}
