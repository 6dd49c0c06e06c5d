//! Pipeline Core
//!
//! The training pipeline and its report.

pub mod report;
pub mod runner;

pub use report::TrainingReport;
pub use runner::TrainingPipeline;

// Re-export SPI and API types
pub use pipeline_api::{TrainingConfig, DEFAULT_SEED, DEFAULT_TEST_RATIO};
pub use pipeline_spi::{ErrorKind, PipelineError, Result, Stage};
