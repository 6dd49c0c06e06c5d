//! Dataset source configuration types.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the KOI cumulative table.
pub const DEFAULT_DATA_PATH: &str = "data/cumulative.csv";

/// Configuration for reading the KOI table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Path to the delimited table
    pub path: PathBuf,
    /// Field delimiter
    pub delimiter: u8,
    /// Lines starting with this byte are skipped (archive exports use `#`)
    pub comment: Option<u8>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
            delimiter: b',',
            comment: Some(b'#'),
        }
    }
}

impl DatasetConfig {
    /// Create a configuration for a comma-separated file.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Create a configuration for a tab-separated file.
    pub fn tsv(path: impl AsRef<Path>) -> Self {
        Self::new(path).with_delimiter(b'\t')
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set or clear the comment prefix.
    pub fn with_comment(mut self, comment: Option<u8>) -> Self {
        self.comment = comment;
        self
    }
}

/// Builder for DatasetConfig.
#[derive(Debug, Default)]
pub struct DatasetConfigBuilder {
    path: Option<PathBuf>,
    delimiter: Option<u8>,
    comment: Option<Option<u8>>,
}

impl DatasetConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path.
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the delimiter.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Set the comment prefix.
    pub fn comment(mut self, comment: Option<u8>) -> Self {
        self.comment = Some(comment);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> DatasetConfig {
        let defaults = DatasetConfig::default();
        DatasetConfig {
            path: self.path.unwrap_or(defaults.path),
            delimiter: self.delimiter.unwrap_or(defaults.delimiter),
            comment: self.comment.unwrap_or(defaults.comment),
        }
    }
}
