//! Cleaning rules applied to raw KOI rows.
//!
//! Per row, in order:
//! 1. drop if any loaded cell is missing
//! 2. drop if the disposition is `CANDIDATE`
//! 3. label 1 for `CONFIRMED`, 0 otherwise

use data_spi::{
    is_missing, ClassCounts, CleaningSummary, DataError, Dataset, Disposition, FeatureVector,
    LoadedDataset, RawRecord, Result, FEATURE_COLUMNS, FEATURE_COUNT,
};

/// Apply the cleaning rules to raw records.
///
/// Fails only when a present feature cell is not numeric.
pub fn clean_records<I>(records: I) -> Result<LoadedDataset>
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut summary = CleaningSummary::default();
    let mut features = Vec::new();
    let mut labels = Vec::new();

    for record in records {
        summary.rows_read += 1;

        let any_missing = record.features.iter().any(|c| is_missing(c.trim()))
            || is_missing(record.disposition.trim());
        if any_missing {
            summary.dropped_missing += 1;
            continue;
        }

        let label = match Disposition::parse(&record.disposition).label() {
            Some(label) => label,
            None => {
                summary.dropped_candidates += 1;
                continue;
            }
        };

        features.push(parse_features(&record)?);
        labels.push(label);
    }

    summary.classes = ClassCounts::from_labels(&labels);
    let dataset = Dataset::new(features, labels)?;

    Ok(LoadedDataset { dataset, summary })
}

fn parse_features(record: &RawRecord) -> Result<FeatureVector> {
    let mut values = [0.0; FEATURE_COUNT];
    for (i, cell) in record.features.iter().enumerate() {
        values[i] = cell
            .trim()
            .parse::<f64>()
            .map_err(|_| DataError::InvalidValue {
                line: record.line,
                column: FEATURE_COLUMNS[i].to_string(),
                value: cell.clone(),
            })?;
    }
    Ok(FeatureVector::new(values))
}
