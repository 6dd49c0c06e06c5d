//! Gradient-boosted tree classifier on the logistic loss.

use crate::binning::FeatureBins;
use crate::tree::{Tree, TreeGrower};
use classifier_api::BoosterParams;
use classifier_spi::{Classifier, ClassifierError, Result};
use data_spi::{Dataset, FeatureVector, FEATURE_COUNT};
use rand::seq::index;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Floor on per-row hessians so saturated rows never divide by zero.
const MIN_HESSIAN: f64 = 1e-16;

/// Logistic function.
pub fn sigmoid(margin: f64) -> f64 {
    1.0 / (1.0 + (-margin).exp())
}

/// Binary classifier built from an additive ensemble of regression trees.
///
/// The raw score starts at a margin of 0 (probability 0.5) and every tree adds
/// its leaf weight. Positive rows carry `scale_pos_weight` on both gradient and
/// hessian, which is how class imbalance is corrected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostedClassifier {
    params: BoosterParams,
    base_margin: f64,
    trees: Vec<Tree>,
}

impl GradientBoostedClassifier {
    /// Fit an ensemble on a dataset.
    pub fn fit(params: &BoosterParams, dataset: &Dataset) -> Result<Self> {
        params.validate()?;
        if dataset.is_empty() {
            return Err(ClassifierError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }

        let rows = dataset.features();
        let labels = dataset.labels();
        let n = rows.len();

        let bins = FeatureBins::fit(rows, params.max_bins);
        let matrix = bins.transform(rows);
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);

        let n_rows_per_tree = ((n as f64 * params.subsample).round() as usize).clamp(1, n);
        let n_features_per_tree =
            ((FEATURE_COUNT as f64 * params.colsample_bytree).floor() as usize).clamp(1, FEATURE_COUNT);

        let base_margin = 0.0;
        let mut margins = vec![base_margin; n];
        let mut grad = vec![0.0; n];
        let mut hess = vec![0.0; n];
        let mut trees = Vec::with_capacity(params.n_estimators);

        for round in 0..params.n_estimators {
            for i in 0..n {
                let p = sigmoid(margins[i]);
                let y = f64::from(labels[i]);
                let weight = if labels[i] == 1 {
                    params.scale_pos_weight
                } else {
                    1.0
                };
                grad[i] = (p - y) * weight;
                hess[i] = (p * (1.0 - p)).max(MIN_HESSIAN) * weight;
            }

            let sample_rows = sorted_sample(&mut rng, n, n_rows_per_tree);
            let features = sorted_sample(&mut rng, FEATURE_COUNT, n_features_per_tree);

            let tree = TreeGrower {
                bins: &bins,
                matrix: &matrix,
                grad: &grad,
                hess: &hess,
                features: &features,
                params,
            }
            .grow(&sample_rows);

            for (margin, row) in margins.iter_mut().zip(rows) {
                *margin += tree.predict(row.values());
            }
            if round % 100 == 0 {
                debug!(round, leaves = tree.n_leaves(), "boosting round");
            }
            trees.push(tree);
        }

        Ok(Self {
            params: *params,
            base_margin,
            trees,
        })
    }

    pub fn params(&self) -> &BoosterParams {
        &self.params
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Raw additive score before the logistic link.
    pub fn margin(&self, features: &FeatureVector) -> Result<f64> {
        if !features.is_finite() {
            return Err(ClassifierError::InvalidInput(
                "all features must be finite numbers".to_string(),
            ));
        }
        let row = features.values();
        Ok(self.base_margin + self.trees.iter().map(|t| t.predict(row)).sum::<f64>())
    }

    /// Check a decoded ensemble.
    pub fn validate(&self) -> Result<()> {
        self.params.validate()?;
        if !self.base_margin.is_finite() {
            return Err(ClassifierError::Corrupt(
                "base margin is not finite".to_string(),
            ));
        }
        if self.trees.is_empty() {
            return Err(ClassifierError::Corrupt("ensemble has no trees".to_string()));
        }
        self.trees.iter().try_for_each(Tree::validate)
    }
}

impl Classifier for GradientBoostedClassifier {
    fn name(&self) -> &str {
        "gradient-boosted-trees"
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<f64> {
        self.margin(features).map(sigmoid)
    }
}

/// `amount` distinct indices from `0..length`, ascending.
fn sorted_sample(rng: &mut ChaCha8Rng, length: usize, amount: usize) -> Vec<usize> {
    if amount >= length {
        return (0..length).collect();
    }
    let mut picked = index::sample(rng, length, amount).into_vec();
    picked.sort_unstable();
    picked
}
