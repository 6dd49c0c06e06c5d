//! Binary classification capability.

use crate::error::Result;
use crate::model::Prediction;
use data_spi::FeatureVector;

/// A trained binary classifier over the fixed KOI feature vector.
///
/// Implementations are immutable after construction and safe to share between
/// request handlers.
pub trait Classifier: Send + Sync {
    /// Short identifier of the model family.
    fn name(&self) -> &str;

    /// Probability of the positive class (confirmed planet).
    fn predict_proba(&self, features: &FeatureVector) -> Result<f64>;

    /// Class decision plus positive-class probability.
    fn predict(&self, features: &FeatureVector) -> Result<Prediction> {
        self.predict_proba(features).map(Prediction::from_probability)
    }
}
