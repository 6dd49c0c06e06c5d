//! Cleaned dataset and bookkeeping types.

use serde::{Deserialize, Serialize};

use super::feature_vector::FeatureVector;
use super::schema::FEATURE_COUNT;
use crate::error::{DataError, Result};

/// One raw row as read from the table, before cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line number in the source, for diagnostics.
    pub line: u64,
    /// Feature cells in model order.
    pub features: [String; FEATURE_COUNT],
    /// Disposition cell.
    pub disposition: String,
}

/// Per-class sample counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassCounts {
    /// Samples labeled 0.
    pub negative: usize,
    /// Samples labeled 1.
    pub positive: usize,
}

impl ClassCounts {
    /// Count the classes of a label vector.
    pub fn from_labels(labels: &[u8]) -> Self {
        let positive = labels.iter().filter(|&&l| l == 1).count();
        Self {
            negative: labels.len() - positive,
            positive,
        }
    }

    /// Total number of samples.
    pub fn total(&self) -> usize {
        self.negative + self.positive
    }

    /// Ratio of negatives to positives, used as the positive class weight.
    ///
    /// Fails when either class is empty, since the weight would be zero or
    /// undefined.
    pub fn imbalance_ratio(&self) -> Result<f64> {
        if self.negative == 0 || self.positive == 0 {
            return Err(DataError::DegenerateClasses {
                negative: self.negative,
                positive: self.positive,
            });
        }
        Ok(self.negative as f64 / self.positive as f64)
    }
}

/// What cleaning did to the raw table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// Data rows read from the source.
    pub rows_read: usize,
    /// Rows dropped because a loaded column was missing.
    pub dropped_missing: usize,
    /// Rows dropped because the disposition was `CANDIDATE`.
    pub dropped_candidates: usize,
    /// Class counts of the surviving rows.
    pub classes: ClassCounts,
}

impl CleaningSummary {
    /// Rows that survived cleaning.
    pub fn rows_kept(&self) -> usize {
        self.classes.total()
    }
}

impl std::fmt::Display for CleaningSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "read={} dropped_missing={} dropped_candidates={} kept={} (confirmed={} false_positive={})",
            self.rows_read,
            self.dropped_missing,
            self.dropped_candidates,
            self.rows_kept(),
            self.classes.positive,
            self.classes.negative,
        )
    }
}

/// Cleaned feature matrix `X` and binary label vector `y`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    features: Vec<FeatureVector>,
    labels: Vec<u8>,
}

impl Dataset {
    /// Build a dataset. Labels must be 0 or 1 and match the row count.
    pub fn new(features: Vec<FeatureVector>, labels: Vec<u8>) -> Result<Self> {
        if features.len() != labels.len() {
            return Err(DataError::InvalidParameter {
                name: "labels".to_string(),
                reason: format!(
                    "{} labels for {} feature rows",
                    labels.len(),
                    features.len()
                ),
            });
        }
        if let Some(bad) = labels.iter().find(|&&l| l > 1) {
            return Err(DataError::InvalidParameter {
                name: "labels".to_string(),
                reason: format!("label {} is not binary", bad),
            });
        }
        Ok(Self { features, labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn features(&self) -> &[FeatureVector] {
        &self.features
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    pub fn class_counts(&self) -> ClassCounts {
        ClassCounts::from_labels(&self.labels)
    }

    /// Rows at the given indices, in the given order.
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            features: indices.iter().map(|&i| self.features[i]).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }
}

/// Output of a [`DataSource`](crate::DataSource).
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub summary: CleaningSummary,
}

/// Row indices of a train/test partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imbalance_ratio_fixture() {
        let mut labels = vec![0u8; 80];
        labels.extend(vec![1u8; 20]);
        let counts = ClassCounts::from_labels(&labels);
        assert_eq!(counts.negative, 80);
        assert_eq!(counts.positive, 20);
        assert_eq!(counts.imbalance_ratio().unwrap(), 4.0);
    }

    #[test]
    fn test_imbalance_ratio_degenerate() {
        let no_positive = ClassCounts { negative: 5, positive: 0 };
        assert!(matches!(
            no_positive.imbalance_ratio(),
            Err(DataError::DegenerateClasses { negative: 5, positive: 0 })
        ));
        let no_negative = ClassCounts { negative: 0, positive: 5 };
        assert!(no_negative.imbalance_ratio().is_err());
        assert!(ClassCounts::default().imbalance_ratio().is_err());
    }

    #[test]
    fn test_dataset_rejects_non_binary_labels() {
        let rows = vec![FeatureVector::zeros(); 2];
        assert!(Dataset::new(rows.clone(), vec![0, 2]).is_err());
        assert!(Dataset::new(rows.clone(), vec![0]).is_err());
        assert!(Dataset::new(rows, vec![0, 1]).is_ok());
    }

    #[test]
    fn test_subset_preserves_order() {
        let rows: Vec<FeatureVector> = (0..4)
            .map(|i| FeatureVector::new([i as f64; FEATURE_COUNT]))
            .collect();
        let ds = Dataset::new(rows, vec![0, 1, 0, 1]).unwrap();
        let sub = ds.subset(&[3, 0]);
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.features()[0][0], 3.0);
        assert_eq!(sub.labels(), &[1, 0]);
    }

    #[test]
    fn test_summary_display() {
        let summary = CleaningSummary {
            rows_read: 10,
            dropped_missing: 2,
            dropped_candidates: 3,
            classes: ClassCounts { negative: 3, positive: 2 },
        };
        assert_eq!(summary.rows_kept(), 5);
        assert!(summary.to_string().contains("kept=5"));
    }
}
