//! Dataset Facade
//!
//! Unified re-exports for the dataset module.
//!
//! This facade provides a single entry point for all dataset functionality:
//! - `data_spi` - Schema, models, errors and the data source trait
//! - `data_api` - Configuration types, builders and presets
//! - `data_core` - CSV source, cleaning and splitting
//!
//! # Example
//!
//! ```rust,ignore
//! use data_facade::prelude::*;
//!
//! let loaded = CsvDataSource::new(DatasetConfig::default()).load()?;
//! let (train, test) = split_dataset(&loaded.dataset, 0.2, 42)?;
//! println!("train={} test={}", train.len(), test.len());
//! ```

// Re-export everything from SPI
pub use data_spi::*;

// Re-export everything from API
pub use data_api::*;

// Re-export everything from Core
pub use data_core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use data_api::{find_preset, DatasetConfig, DatasetConfigBuilder, Preset, PRESETS};
    pub use data_core::{clean_records, split_dataset, train_test_split, CsvDataSource};
    pub use data_spi::{
        ClassCounts, CleaningSummary, DataError, DataSource, Dataset, ErrorKind, FeatureVector,
        LoadedDataset, Result, FEATURE_COLUMNS, FEATURE_COUNT, LABEL_COLUMN,
    };
}
