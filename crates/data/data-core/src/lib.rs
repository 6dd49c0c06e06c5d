//! Dataset Core
//!
//! Implementations for reading, cleaning and partitioning the KOI table.

pub mod cleaning;
pub mod csv_source;
pub mod split;

pub use cleaning::clean_records;
pub use csv_source::CsvDataSource;
pub use split::{split_dataset, train_test_split};
