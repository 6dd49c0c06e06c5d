//! Per-feature histogram binning.
//!
//! Each feature is quantised into at most `max_bins` bins separated by sorted,
//! strictly increasing cut points. A value's bin is the number of cuts that are
//! `<= value`, so splitting at bin boundary `k` is the same as the raw rule
//! `value < cuts[k - 1]`. Trees store that raw threshold, which keeps
//! prediction independent of the binning.

use data_spi::{FeatureVector, FEATURE_COUNT};

/// Cut points for every feature, fitted on a training matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureBins {
    cuts: Vec<Vec<f64>>,
}

impl FeatureBins {
    /// Fit cut points on `rows` with at most `max_bins` bins per feature.
    ///
    /// Non-finite values never become cuts; they fall into the outermost bins.
    pub fn fit(rows: &[FeatureVector], max_bins: usize) -> Self {
        let max_bins = max_bins.max(2);
        let cuts = (0..FEATURE_COUNT)
            .map(|feature| {
                let mut values: Vec<f64> = rows
                    .iter()
                    .map(|row| row[feature])
                    .filter(|v| v.is_finite())
                    .collect();
                values.sort_by(f64::total_cmp);
                values.dedup();
                feature_cuts(&values, max_bins)
            })
            .collect();
        Self { cuts }
    }

    /// Number of bins for a feature.
    pub fn n_bins(&self, feature: usize) -> usize {
        self.cuts[feature].len() + 1
    }

    /// Cut points of a feature.
    pub fn cuts(&self, feature: usize) -> &[f64] {
        &self.cuts[feature]
    }

    /// Bin index of a raw value.
    pub fn bin(&self, feature: usize, value: f64) -> u16 {
        self.cuts[feature].partition_point(|&cut| cut <= value) as u16
    }

    /// Raw threshold equivalent to a split at bin boundary `k` (`k >= 1`).
    pub fn threshold(&self, feature: usize, k: usize) -> f64 {
        self.cuts[feature][k - 1]
    }

    /// Quantise a matrix column by column.
    pub fn transform(&self, rows: &[FeatureVector]) -> BinnedMatrix {
        let columns = (0..FEATURE_COUNT)
            .map(|feature| rows.iter().map(|row| self.bin(feature, row[feature])).collect())
            .collect();
        BinnedMatrix {
            columns,
            n_rows: rows.len(),
        }
    }
}

/// Cut points between sorted unique values.
///
/// With few unique values every gap gets a cut; otherwise cuts sit at evenly
/// spaced ranks of the unique values.
fn feature_cuts(unique: &[f64], max_bins: usize) -> Vec<f64> {
    if unique.len() < 2 {
        return Vec::new();
    }

    let gaps: Vec<usize> = if unique.len() <= max_bins {
        (1..unique.len()).collect()
    } else {
        (1..max_bins).map(|i| i * unique.len() / max_bins).collect()
    };

    let mut cuts: Vec<f64> = Vec::with_capacity(gaps.len());
    for idx in gaps {
        let (lo, hi) = (unique[idx - 1], unique[idx]);
        let mid = lo + (hi - lo) / 2.0;
        // Rounding can collapse the midpoint onto `lo`; `hi` keeps the gap.
        let cut = if mid.is_finite() && mid > lo { mid } else { hi };
        if cuts.last().map_or(true, |&last| cut > last) {
            cuts.push(cut);
        }
    }
    cuts
}

/// Column-major matrix of bin indices.
#[derive(Debug, Clone)]
pub struct BinnedMatrix {
    columns: Vec<Vec<u16>>,
    n_rows: usize,
}

impl BinnedMatrix {
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Bin indices of one feature for every row.
    pub fn column(&self, feature: usize) -> &[u16] {
        &self.columns[feature]
    }
}
