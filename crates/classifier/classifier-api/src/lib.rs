//! Classifier Consumer API
//!
//! Hyperparameters for the gradient-boosted tree classifier.

pub mod params;

pub use params::*;

// Re-export SPI types
pub use classifier_spi::{Classifier, ClassifierError, Prediction, Result};
