//! Pipeline API
//!
//! Configuration for a training run.

pub mod config;

pub use config::*;

// Re-export SPI types
pub use pipeline_spi::{ErrorKind, PipelineError, Result, Stage};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{PipelineError, Result, Stage, TrainingConfig};
}
