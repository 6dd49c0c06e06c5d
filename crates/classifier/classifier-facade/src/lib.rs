//! Classifier Facade
//!
//! Unified re-exports for the classifier module.
//!
//! - `classifier_spi` - The `Classifier` capability, `Prediction` and errors
//! - `classifier_api` - `BoosterParams`
//! - `classifier_core` - Gradient-boosted trees and the JSON artifact

// Re-export everything from SPI
pub use classifier_spi::*;

// Re-export everything from API
pub use classifier_api::*;

// Re-export everything from Core
pub use classifier_core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use classifier_api::BoosterParams;
    pub use classifier_core::{
        load_classifier, GradientBoostedClassifier, ModelArtifact, DEFAULT_MODEL_PATH,
    };
    pub use classifier_spi::{Classifier, ClassifierError, Prediction, Result};
}
