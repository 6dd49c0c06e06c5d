//! Lazily loaded, process-wide model handle.

use classifier_facade::{load_classifier, Classifier, ClassifierError, FeatureVector, Prediction};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Status line shown for label 1.
pub const CONFIRMED_STATUS: &str = "CONFIRMED EXOPLANET";

/// Status line shown for label 0.
pub const FALSE_POSITIVE_STATUS: &str = "FALSE POSITIVE";

/// Loads the artifact on first use and shares it for the life of the process.
///
/// A failed load is not cached, so training a model while the server is up
/// makes the next request succeed.
pub struct ModelHandle {
    path: PathBuf,
    cell: OnceCell<Arc<dyn Classifier>>,
}

impl ModelHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    /// A handle around an already constructed classifier.
    pub fn preloaded(model: Arc<dyn Classifier>) -> Self {
        Self {
            path: PathBuf::new(),
            cell: OnceCell::new_with(Some(model)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// The shared classifier, loading it if this is the first use.
    pub async fn get(&self) -> Result<Arc<dyn Classifier>, ClassifierError> {
        let model = self
            .cell
            .get_or_try_init(|| async {
                let path = self.path.clone();
                let loaded = tokio::task::spawn_blocking(move || load_classifier(&path))
                    .await
                    .map_err(|e| ClassifierError::Io {
                        path: self.path.clone(),
                        message: e.to_string(),
                    })?;
                match loaded {
                    Ok(model) => {
                        info!(path = %self.path.display(), "Model loaded");
                        Ok(Arc::new(model) as Arc<dyn Classifier>)
                    }
                    Err(e) => {
                        warn!(path = %self.path.display(), error = %e, "Model unavailable");
                        Err(e)
                    }
                }
            })
            .await?;
        Ok(Arc::clone(model))
    }
}

/// A prediction as presented to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionView {
    pub label: u8,
    pub decision: &'static str,
    pub class_name: &'static str,
    /// Probability of label 1.
    pub probability: f64,
    /// Probability assigned to the chosen class.
    pub confidence: f64,
}

impl From<Prediction> for PredictionView {
    fn from(prediction: Prediction) -> Self {
        Self {
            label: prediction.label,
            decision: if prediction.is_confirmed() {
                CONFIRMED_STATUS
            } else {
                FALSE_POSITIVE_STATUS
            },
            class_name: prediction.class_name(),
            probability: prediction.probability,
            confidence: prediction.confidence(),
        }
    }
}

/// Classify one observation with the shared model.
pub async fn predict_observation(
    handle: &ModelHandle,
    features: &FeatureVector,
) -> Result<PredictionView, ClassifierError> {
    let model = handle.get().await?;
    let prediction = model.predict(features)?;
    info!(
        label = prediction.label,
        probability = prediction.probability,
        "Observation classified"
    );
    Ok(prediction.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl Classifier for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn predict_proba(&self, _features: &FeatureVector) -> classifier_facade::Result<f64> {
            Ok(self.0)
        }
    }

    #[tokio::test]
    async fn test_preloaded_prediction() {
        let handle = ModelHandle::preloaded(Arc::new(Fixed(0.9)));
        assert!(handle.is_loaded());
        let view = predict_observation(&handle, &FeatureVector::zeros())
            .await
            .unwrap();
        assert_eq!(view.label, 1);
        assert_eq!(view.decision, CONFIRMED_STATUS);
        assert!((view.confidence - 0.9).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_false_positive_confidence() {
        let handle = ModelHandle::preloaded(Arc::new(Fixed(0.2)));
        let view = predict_observation(&handle, &FeatureVector::zeros())
            .await
            .unwrap();
        assert_eq!(view.label, 0);
        assert_eq!(view.decision, FALSE_POSITIVE_STATUS);
        assert!((view.confidence - 0.8).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_missing_artifact_is_not_cached() {
        let handle = ModelHandle::new("/nonexistent/kepler_model.pkl");
        let err = handle.get().await.err().expect("expected an error");
        assert!(matches!(err, ClassifierError::MissingArtifact { .. }));
        assert!(!handle.is_loaded());
    }
}
