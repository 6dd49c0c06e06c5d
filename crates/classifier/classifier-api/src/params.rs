//! Booster hyperparameters.

use classifier_spi::{ClassifierError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on histogram bins per feature.
pub const MAX_BINS_LIMIT: usize = 1024;

/// Hyperparameters of the gradient-boosted tree classifier.
///
/// Defaults follow the conventional XGBoost defaults; the search overrides the
/// tuned subset per candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoosterParams {
    /// Number of boosting rounds (trees)
    pub n_estimators: usize,
    /// Shrinkage applied to every leaf weight
    pub learning_rate: f64,
    /// Maximum tree depth (root is depth 0)
    pub max_depth: usize,
    /// Fraction of rows drawn, without replacement, for each tree
    pub subsample: f64,
    /// Fraction of features drawn for each tree
    pub colsample_bytree: f64,
    /// Minimum loss reduction required to split a node
    pub gamma: f64,
    /// Minimum hessian mass in each child
    pub min_child_weight: f64,
    /// L2 regularisation on leaf weights
    pub reg_lambda: f64,
    /// Histogram bins per feature
    pub max_bins: usize,
    /// Gradient and hessian multiplier for positive rows
    pub scale_pos_weight: f64,
    /// Seed for row and column sampling
    pub seed: u64,
}

impl Default for BoosterParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            learning_rate: 0.3,
            max_depth: 6,
            subsample: 1.0,
            colsample_bytree: 1.0,
            gamma: 0.0,
            min_child_weight: 1.0,
            reg_lambda: 1.0,
            max_bins: 256,
            scale_pos_weight: 1.0,
            seed: 42,
        }
    }
}

impl BoosterParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_n_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_subsample(mut self, subsample: f64) -> Self {
        self.subsample = subsample;
        self
    }

    pub fn with_colsample_bytree(mut self, colsample_bytree: f64) -> Self {
        self.colsample_bytree = colsample_bytree;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_min_child_weight(mut self, min_child_weight: f64) -> Self {
        self.min_child_weight = min_child_weight;
        self
    }

    pub fn with_reg_lambda(mut self, reg_lambda: f64) -> Self {
        self.reg_lambda = reg_lambda;
        self
    }

    pub fn with_max_bins(mut self, max_bins: usize) -> Self {
        self.max_bins = max_bins;
        self
    }

    /// Set the positive-class weight, usually `negatives / positives`.
    pub fn with_scale_pos_weight(mut self, scale_pos_weight: f64) -> Self {
        self.scale_pos_weight = scale_pos_weight;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check every field against its admissible range.
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(ClassifierError::invalid_parameter(
                "n_estimators",
                "must be at least 1",
            ));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(ClassifierError::invalid_parameter(
                "learning_rate",
                format!("must be positive, got {}", self.learning_rate),
            ));
        }
        if !unit_interval(self.subsample) {
            return Err(ClassifierError::invalid_parameter(
                "subsample",
                format!("must be in (0, 1], got {}", self.subsample),
            ));
        }
        if !unit_interval(self.colsample_bytree) {
            return Err(ClassifierError::invalid_parameter(
                "colsample_bytree",
                format!("must be in (0, 1], got {}", self.colsample_bytree),
            ));
        }
        if !(self.gamma >= 0.0 && self.gamma.is_finite()) {
            return Err(ClassifierError::invalid_parameter(
                "gamma",
                format!("must be non-negative, got {}", self.gamma),
            ));
        }
        if !(self.min_child_weight >= 0.0 && self.min_child_weight.is_finite()) {
            return Err(ClassifierError::invalid_parameter(
                "min_child_weight",
                format!("must be non-negative, got {}", self.min_child_weight),
            ));
        }
        if !(self.reg_lambda >= 0.0 && self.reg_lambda.is_finite()) {
            return Err(ClassifierError::invalid_parameter(
                "reg_lambda",
                format!("must be non-negative, got {}", self.reg_lambda),
            ));
        }
        if !(2..=MAX_BINS_LIMIT).contains(&self.max_bins) {
            return Err(ClassifierError::invalid_parameter(
                "max_bins",
                format!("must be in [2, {}], got {}", MAX_BINS_LIMIT, self.max_bins),
            ));
        }
        if !(self.scale_pos_weight > 0.0 && self.scale_pos_weight.is_finite()) {
            return Err(ClassifierError::invalid_parameter(
                "scale_pos_weight",
                format!("must be positive, got {}", self.scale_pos_weight),
            ));
        }
        Ok(())
    }
}

fn unit_interval(value: f64) -> bool {
    value > 0.0 && value <= 1.0
}

impl fmt::Display for BoosterParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n_estimators={} learning_rate={} max_depth={} subsample={} colsample_bytree={} \
             gamma={} min_child_weight={}",
            self.n_estimators,
            self.learning_rate,
            self.max_depth,
            self.subsample,
            self.colsample_bytree,
            self.gamma,
            self.min_child_weight
        )
    }
}
