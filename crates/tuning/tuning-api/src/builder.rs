//! Search configuration builder.

use crate::{ParamGrid, SearchConfig};
use tuning_spi::Objective;

/// Builder for the randomized search configuration.
#[derive(Debug, Clone, Default)]
pub struct SearchBuilder {
    config: SearchConfig,
}

impl SearchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Grid Methods ==========

    /// Set the candidate values for the number of trees.
    pub fn n_estimators(mut self, values: &[usize]) -> Self {
        self.config.grid.n_estimators = values.to_vec();
        self
    }

    /// Set the candidate learning rates.
    pub fn learning_rate(mut self, values: &[f64]) -> Self {
        self.config.grid.learning_rate = values.to_vec();
        self
    }

    /// Set the candidate tree depths.
    pub fn max_depth(mut self, values: &[usize]) -> Self {
        self.config.grid.max_depth = values.to_vec();
        self
    }

    /// Set the candidate row subsampling fractions.
    pub fn subsample(mut self, values: &[f64]) -> Self {
        self.config.grid.subsample = values.to_vec();
        self
    }

    /// Set the candidate column subsampling fractions.
    pub fn colsample_bytree(mut self, values: &[f64]) -> Self {
        self.config.grid.colsample_bytree = values.to_vec();
        self
    }

    /// Set the candidate minimum split losses.
    pub fn gamma(mut self, values: &[f64]) -> Self {
        self.config.grid.gamma = values.to_vec();
        self
    }

    /// Set the candidate minimum child hessian masses.
    pub fn min_child_weight(mut self, values: &[f64]) -> Self {
        self.config.grid.min_child_weight = values.to_vec();
        self
    }

    /// Replace the whole grid.
    pub fn grid(mut self, grid: ParamGrid) -> Self {
        self.config.grid = grid;
        self
    }

    // ========== Configuration Methods ==========

    /// Number of distinct configurations to sample.
    pub fn iterations(mut self, n_iter: usize) -> Self {
        self.config.n_iter = n_iter;
        self
    }

    /// Use stratified K-fold cross-validation.
    pub fn k_fold(mut self, folds: usize) -> Self {
        self.config.folds = folds;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    pub fn objective(mut self, objective: Objective) -> Self {
        self.config.objective = objective;
        self
    }

    // ========== Build ==========

    /// Total configurations in the grid.
    pub fn total_combinations(&self) -> usize {
        use tuning_spi::ParameterSpace;
        self.config.grid.combinations()
    }

    pub fn build(self) -> SearchConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_match_config() {
        assert_eq!(SearchBuilder::new().build(), SearchConfig::default());
        assert_eq!(SearchBuilder::new().total_combinations(), 3888);
    }

    #[test]
    fn test_builder_small_grid() {
        let config = SearchBuilder::new()
            .n_estimators(&[10, 20])
            .learning_rate(&[0.3])
            .max_depth(&[2, 3])
            .subsample(&[1.0])
            .colsample_bytree(&[1.0])
            .gamma(&[0.0])
            .min_child_weight(&[1.0])
            .iterations(3)
            .k_fold(3)
            .seed(7)
            .workers(2)
            .build();

        assert_eq!(config.n_iter, 3);
        assert_eq!(config.folds, 3);
        assert_eq!(config.seed, 7);
        assert_eq!(config.workers, 2);
        assert_eq!(config.grid.max_depth, vec![2, 3]);
        assert!(config.validate().is_ok());
    }
}
