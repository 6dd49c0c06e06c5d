//! Training run configuration.

use classifier_api::BoosterParams;
use classifier_core::DEFAULT_MODEL_PATH;
use data_api::DatasetConfig;
use pipeline_spi::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tuning_api::SearchConfig;

/// Fraction of rows held out for the final evaluation.
pub const DEFAULT_TEST_RATIO: f64 = 0.2;

/// Seed shared by the split, the candidate sampler and the booster.
pub const DEFAULT_SEED: u64 = 42;

/// Everything a training run needs.
///
/// `seed` overrides the seeds inside `search` and `booster` when the run
/// starts, so one value drives every source of randomness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Input table
    pub dataset: DatasetConfig,
    /// Output artifact
    pub model_path: PathBuf,
    /// Held-out fraction in (0, 1)
    pub test_ratio: f64,
    pub seed: u64,
    pub search: SearchConfig,
    /// Values for the booster fields the search does not tune
    pub booster: BoosterParams,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            test_ratio: DEFAULT_TEST_RATIO,
            seed: DEFAULT_SEED,
            search: SearchConfig::default(),
            booster: BoosterParams::default(),
        }
    }
}

impl TrainingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the dataset from `path` with default CSV settings.
    pub fn with_data_path(mut self, path: impl AsRef<Path>) -> Self {
        self.dataset.path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_dataset(mut self, dataset: DatasetConfig) -> Self {
        self.dataset = dataset;
        self
    }

    pub fn with_model_path(mut self, path: impl AsRef<Path>) -> Self {
        self.model_path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_test_ratio(mut self, test_ratio: f64) -> Self {
        self.test_ratio = test_ratio;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn with_booster(mut self, booster: BoosterParams) -> Self {
        self.booster = booster;
        self
    }

    /// Search configuration with the run seed applied.
    pub fn seeded_search(&self) -> SearchConfig {
        self.search.clone().with_seed(self.seed)
    }

    /// Base booster parameters with the run seed applied.
    pub fn seeded_booster(&self) -> BoosterParams {
        self.booster.with_seed(self.seed)
    }

    /// Check settings that can be rejected before any data is read.
    pub fn validate(&self) -> Result<()> {
        if !(self.test_ratio > 0.0 && self.test_ratio < 1.0) {
            return Err(PipelineError::InvalidParameter {
                name: "test_ratio".to_string(),
                reason: format!("must be in (0, 1), got {}", self.test_ratio),
            });
        }
        if self.model_path.as_os_str().is_empty() {
            return Err(PipelineError::InvalidParameter {
                name: "model_path".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        self.search.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline_spi::ErrorKind;

    #[test]
    fn test_defaults() {
        let config = TrainingConfig::default();
        assert_eq!(config.dataset.path, PathBuf::from("data/cumulative.csv"));
        assert_eq!(config.model_path, PathBuf::from("models/kepler_model.pkl"));
        assert_eq!(config.test_ratio, 0.2);
        assert_eq!(config.seed, 42);
        assert_eq!(config.search.n_iter, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_seed_reaches_search_and_booster() {
        let config = TrainingConfig::new()
            .with_search(SearchConfig::default().with_seed(1))
            .with_booster(BoosterParams::default().with_seed(2))
            .with_seed(7);
        assert_eq!(config.seeded_search().seed, 7);
        assert_eq!(config.seeded_booster().seed, 7);
    }

    #[test]
    fn test_rejects_bad_ratio() {
        for ratio in [0.0, 1.0, -0.1, f64::NAN] {
            let err = TrainingConfig::new().with_test_ratio(ratio).validate().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration);
        }
    }

    #[test]
    fn test_rejects_bad_search() {
        let config = TrainingConfig::new().with_search(SearchConfig::default().with_folds(1));
        assert!(matches!(config.validate(), Err(PipelineError::Tuning(_))));
    }

    #[test]
    fn test_paths() {
        let config = TrainingConfig::new()
            .with_data_path("fixtures/koi.csv")
            .with_model_path("out/model.json");
        assert_eq!(config.dataset.path, PathBuf::from("fixtures/koi.csv"));
        assert_eq!(config.model_path, PathBuf::from("out/model.json"));
    }
}
