//! Delimited-table data source.

use data_api::DatasetConfig;
use data_spi::{
    DataError, DataSource, LoadedDataset, RawRecord, Result, FEATURE_COLUMNS, FEATURE_COUNT,
    LABEL_COLUMN,
};
use std::fs::File;
use std::io::{self, BufReader};
use tracing::{debug, info};

use crate::cleaning::clean_records;

/// Reads the KOI table from a CSV (or other delimited) file.
///
/// Only the 11 feature columns and the disposition column are read; they are
/// located by header name, so column order and extra columns do not matter.
#[derive(Debug, Clone)]
pub struct CsvDataSource {
    config: DatasetConfig,
}

impl CsvDataSource {
    pub fn new(config: DatasetConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    fn open(&self) -> Result<File> {
        File::open(&self.config.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DataError::MissingResource {
                path: self.config.path.clone(),
            },
            _ => DataError::ParseError(format!(
                "Failed to open {}: {}",
                self.config.path.display(),
                e
            )),
        })
    }

    fn read_records(&self) -> Result<Vec<RawRecord>> {
        let file = self.open()?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .comment(self.config.comment)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let headers = reader
            .headers()
            .map_err(|e| DataError::ParseError(format!("Failed to read headers: {}", e)))?
            .clone();

        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DataError::MissingColumn(name.to_string()))
        };

        let mut feature_idx = [0usize; FEATURE_COUNT];
        for (slot, name) in feature_idx.iter_mut().zip(FEATURE_COLUMNS.iter()) {
            *slot = find(name)?;
        }
        let label_idx = find(LABEL_COLUMN)?;
        debug!(?feature_idx, label_idx, "resolved KOI columns");

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result.map_err(|e| DataError::ParseError(e.to_string()))?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            let cell = |idx: usize| row.get(idx).unwrap_or("").to_string();

            records.push(RawRecord {
                line,
                features: feature_idx.map(|idx| cell(idx)),
                disposition: cell(label_idx),
            });
        }

        Ok(records)
    }
}

impl Default for CsvDataSource {
    fn default() -> Self {
        Self::new(DatasetConfig::default())
    }
}

impl DataSource for CsvDataSource {
    fn name(&self) -> &str {
        "csv"
    }

    fn load(&self) -> Result<LoadedDataset> {
        info!("Loading KOI table from {}", self.config.path.display());
        let records = self.read_records()?;
        let loaded = clean_records(records)?;
        info!("Cleaned dataset: {}", loaded.summary);
        Ok(loaded)
    }
}
