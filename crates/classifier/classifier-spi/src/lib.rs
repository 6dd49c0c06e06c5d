//! Classifier Service Provider Interface
//!
//! Defines the binary classification capability the inference surfaces depend
//! on, the prediction model and the classifier error types.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::Classifier;
pub use error::{ClassifierError, Result};
pub use model::{Prediction, DECISION_THRESHOLD, NEGATIVE_CLASS_NAME, POSITIVE_CLASS_NAME};

pub use data_spi::{ErrorKind, FeatureVector};
