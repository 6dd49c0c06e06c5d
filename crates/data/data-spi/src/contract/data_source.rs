//! Data source trait definition.

use crate::error::Result;
use crate::model::LoadedDataset;

/// Trait for sources that produce a cleaned, labeled KOI dataset.
///
/// Implementations read raw records from some backing store and apply the
/// cleaning rules (drop missing, drop candidates, binarize labels).
pub trait DataSource: Send + Sync {
    /// Data source name.
    fn name(&self) -> &str;

    /// Load and clean the dataset.
    fn load(&self) -> Result<LoadedDataset>;
}
