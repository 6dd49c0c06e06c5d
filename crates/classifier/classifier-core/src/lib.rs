//! Classifier Core Implementations
//!
//! Gradient-boosted regression trees on the logistic loss with histogram split
//! finding, plus the JSON artifact codec used to hand a fitted model from the
//! training pipeline to the inference surfaces.

pub mod artifact;
pub mod binning;
pub mod booster;
pub mod tree;

pub use artifact::{load_classifier, ModelArtifact, DEFAULT_MODEL_PATH};
pub use binning::{BinnedMatrix, FeatureBins};
pub use booster::{sigmoid, GradientBoostedClassifier};
pub use tree::{Node, Tree};

// Re-export API types
pub use classifier_api::BoosterParams;
pub use classifier_spi::{Classifier, ClassifierError, Prediction, Result};
