//! Dataset Service Provider Interface
//!
//! Defines the Kepler Object of Interest (KOI) schema, the cleaned dataset
//! model, error types and the data source contract.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::DataSource;
pub use error::{DataError, ErrorKind, Result};
pub use model::{
    is_missing, CleaningSummary, ClassCounts, Dataset, Disposition, FeatureVector, LoadedDataset,
    RawRecord, SplitIndices, CANDIDATE_LABEL, CONFIRMED_LABEL, FEATURE_COLUMNS, FEATURE_COUNT,
    LABEL_COLUMN, NA_VALUES,
};

// ============================================================================
// Tests
// ============================================================================
