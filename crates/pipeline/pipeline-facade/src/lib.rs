//! Pipeline Facade
//!
//! High-level, simplified API for training the exoplanet classifier.
//!
//! # Example
//!
//! ```rust,ignore
//! use pipeline_facade::prelude::*;
//!
//! let report = TrainingPipeline::new(TrainingConfig::default()).run()?;
//! println!("{report}");
//! ```

// Re-export everything from pipeline-api
pub use pipeline_api::*;

// Re-export the runner from pipeline-core
pub use pipeline_core::{TrainingPipeline, TrainingReport};

/// Prelude module for convenient imports
pub mod prelude {
    pub use pipeline_api::{PipelineError, Result, Stage, TrainingConfig};
    pub use pipeline_core::{TrainingPipeline, TrainingReport};
    pub use pipeline_spi::ErrorKind;
}
