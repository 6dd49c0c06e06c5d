//! Dataset Consumer API
//!
//! Configuration types, builders and named observation presets.

pub mod config;
pub mod presets;

pub use config::*;
pub use presets::*;

// Re-export SPI types
pub use data_spi::{
    DataError, DataSource, Dataset, ErrorKind, FeatureVector, LoadedDataset, Result,
    FEATURE_COLUMNS, FEATURE_COUNT,
};
