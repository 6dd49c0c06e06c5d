//! Data models for the KOI dataset.

mod dataset;
mod disposition;
mod feature_vector;
mod schema;

pub use dataset::{ClassCounts, CleaningSummary, Dataset, LoadedDataset, RawRecord, SplitIndices};
pub use disposition::Disposition;
pub use feature_vector::FeatureVector;
pub use schema::{
    is_missing, CANDIDATE_LABEL, CONFIRMED_LABEL, FEATURE_COLUMNS, FEATURE_COUNT, LABEL_COLUMN,
    NA_VALUES,
};
