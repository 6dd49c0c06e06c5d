//! Search configuration and the booster parameter grid.

use classifier_api::BoosterParams;
use serde::{Deserialize, Serialize};
use tuning_spi::{Objective, ParameterSpace, Result, TuningError};

/// Discrete grid over the tuned booster hyperparameters.
///
/// Indices decode in mixed radix with `min_child_weight` varying fastest and
/// `n_estimators` slowest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamGrid {
    pub n_estimators: Vec<usize>,
    pub learning_rate: Vec<f64>,
    pub max_depth: Vec<usize>,
    pub subsample: Vec<f64>,
    pub colsample_bytree: Vec<f64>,
    pub gamma: Vec<f64>,
    pub min_child_weight: Vec<f64>,
}

impl Default for ParamGrid {
    fn default() -> Self {
        Self {
            n_estimators: vec![500, 1000, 1500],
            learning_rate: vec![0.01, 0.05, 0.1],
            max_depth: vec![6, 8, 10, 12],
            subsample: vec![0.6, 0.8, 1.0],
            colsample_bytree: vec![0.6, 0.8, 1.0],
            gamma: vec![0.0, 0.1, 0.5, 1.0],
            min_child_weight: vec![1.0, 3.0, 5.0],
        }
    }
}

impl ParamGrid {
    /// A grid holding exactly one configuration.
    pub fn single(params: &BoosterParams) -> Self {
        Self {
            n_estimators: vec![params.n_estimators],
            learning_rate: vec![params.learning_rate],
            max_depth: vec![params.max_depth],
            subsample: vec![params.subsample],
            colsample_bytree: vec![params.colsample_bytree],
            gamma: vec![params.gamma],
            min_child_weight: vec![params.min_child_weight],
        }
    }

    fn axis_lengths(&self) -> [usize; 7] {
        [
            self.n_estimators.len(),
            self.learning_rate.len(),
            self.max_depth.len(),
            self.subsample.len(),
            self.colsample_bytree.len(),
            self.gamma.len(),
            self.min_child_weight.len(),
        ]
    }

    /// Fail when any axis is empty.
    pub fn validate(&self) -> Result<()> {
        const NAMES: [&str; 7] = [
            "n_estimators",
            "learning_rate",
            "max_depth",
            "subsample",
            "colsample_bytree",
            "gamma",
            "min_child_weight",
        ];
        for (name, len) in NAMES.iter().zip(self.axis_lengths()) {
            if len == 0 {
                return Err(TuningError::InvalidConfig(format!(
                    "grid axis '{name}' has no values"
                )));
            }
        }
        Ok(())
    }
}

impl ParameterSpace for ParamGrid {
    fn combinations(&self) -> usize {
        self.axis_lengths().iter().product()
    }

    fn candidate(&self, index: usize, base: &BoosterParams) -> BoosterParams {
        let mut digits = [0usize; 7];
        let mut rest = index;
        for (digit, len) in digits.iter_mut().zip(self.axis_lengths()).rev() {
            *digit = rest % len;
            rest /= len;
        }

        BoosterParams {
            n_estimators: self.n_estimators[digits[0]],
            learning_rate: self.learning_rate[digits[1]],
            max_depth: self.max_depth[digits[2]],
            subsample: self.subsample[digits[3]],
            colsample_bytree: self.colsample_bytree[digits[4]],
            gamma: self.gamma[digits[5]],
            min_child_weight: self.min_child_weight[digits[6]],
            ..*base
        }
    }
}

/// Number of worker threads used when none is configured.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Randomized search configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Distinct configurations to sample
    pub n_iter: usize,
    /// Stratified cross-validation folds
    pub folds: usize,
    /// Seed of the candidate sampler
    pub seed: u64,
    /// Worker threads for (configuration x fold) tasks
    pub workers: usize,
    /// Ranking score
    pub objective: Objective,
    /// Space the candidates are drawn from
    pub grid: ParamGrid,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            n_iter: 50,
            folds: 5,
            seed: 42,
            workers: default_workers(),
            objective: Objective::F1,
            grid: ParamGrid::default(),
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_n_iter(mut self, n_iter: usize) -> Self {
        self.n_iter = n_iter;
        self
    }

    pub fn with_folds(mut self, folds: usize) -> Self {
        self.folds = folds;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    pub fn with_grid(mut self, grid: ParamGrid) -> Self {
        self.grid = grid;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_iter == 0 {
            return Err(TuningError::InvalidConfig("n_iter must be > 0".into()));
        }
        if self.folds < 2 {
            return Err(TuningError::InvalidConfig("folds must be >= 2".into()));
        }
        if self.workers == 0 {
            return Err(TuningError::InvalidConfig("workers must be > 0".into()));
        }
        self.grid.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_size() {
        assert_eq!(ParamGrid::default().combinations(), 3888);
    }

    #[test]
    fn test_grid_decoding_extremes() {
        let grid = ParamGrid::default();
        let base = BoosterParams::default().with_scale_pos_weight(4.0).with_seed(9);

        let first = grid.candidate(0, &base);
        assert_eq!(first.n_estimators, 500);
        assert_eq!(first.learning_rate, 0.01);
        assert_eq!(first.max_depth, 6);
        assert_eq!(first.min_child_weight, 1.0);
        assert_eq!(first.scale_pos_weight, 4.0);
        assert_eq!(first.seed, 9);

        let last = grid.candidate(3887, &base);
        assert_eq!(last.n_estimators, 1500);
        assert_eq!(last.learning_rate, 0.1);
        assert_eq!(last.max_depth, 12);
        assert_eq!(last.subsample, 1.0);
        assert_eq!(last.colsample_bytree, 1.0);
        assert_eq!(last.gamma, 1.0);
        assert_eq!(last.min_child_weight, 5.0);
    }

    #[test]
    fn test_fastest_axis_is_min_child_weight() {
        let grid = ParamGrid::default();
        let base = BoosterParams::default();
        assert_eq!(grid.candidate(1, &base).min_child_weight, 3.0);
        assert_eq!(grid.candidate(3, &base).gamma, 0.1);
        assert_eq!(grid.candidate(3, &base).min_child_weight, 1.0);
    }

    #[test]
    fn test_every_index_decodes_uniquely() {
        let grid = ParamGrid {
            n_estimators: vec![10, 20],
            max_depth: vec![2, 3, 4],
            ..ParamGrid::single(&BoosterParams::default())
        };
        let base = BoosterParams::default();
        let decoded: Vec<(usize, usize)> = (0..grid.combinations())
            .map(|i| {
                let p = grid.candidate(i, &base);
                (p.n_estimators, p.max_depth)
            })
            .collect();
        assert_eq!(decoded.len(), 6);
        let mut unique = decoded.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 6);
    }

    #[test]
    fn test_single_grid() {
        let params = BoosterParams::default().with_max_depth(3);
        let grid = ParamGrid::single(&params);
        assert_eq!(grid.combinations(), 1);
        assert_eq!(grid.candidate(0, &params), params);
    }

    #[test]
    fn test_search_config_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.n_iter, 50);
        assert_eq!(config.folds, 5);
        assert_eq!(config.seed, 42);
        assert!(config.workers >= 1);
        assert_eq!(config.objective, Objective::F1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_search_config_validation() {
        assert!(SearchConfig::new().with_n_iter(0).validate().is_err());
        assert!(SearchConfig::new().with_folds(1).validate().is_err());
        assert!(SearchConfig::new().with_workers(0).validate().is_err());

        let mut grid = ParamGrid::default();
        grid.gamma.clear();
        let err = SearchConfig::new().with_grid(grid).validate().unwrap_err();
        assert!(err.to_string().contains("gamma"));
    }
}
