//! Training pipeline runner.

use crate::report::TrainingReport;
use classifier_core::{GradientBoostedClassifier, ModelArtifact};
use classifier_spi::Classifier;
use data_core::{split_dataset, CsvDataSource};
use data_spi::{DataError, DataSource, LoadedDataset};
use pipeline_api::TrainingConfig;
use pipeline_spi::{Result, Stage};
use tracing::info;
use tuning_core::{ClassificationReport, RandomizedSearch};

/// End-to-end training: load, split, weight, search, refit, evaluate, persist.
///
/// Every stage must succeed before the artifact is written, so a failed run
/// leaves any existing artifact untouched.
#[derive(Debug, Clone)]
pub struct TrainingPipeline {
    config: TrainingConfig,
}

impl TrainingPipeline {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Run on the configured CSV table.
    pub fn run(&self) -> Result<TrainingReport> {
        let source = CsvDataSource::new(self.config.dataset.clone());
        self.run_with_source(&source)
    }

    /// Run on any data source.
    pub fn run_with_source(&self, source: &dyn DataSource) -> Result<TrainingReport> {
        self.config.validate()?;
        info!(stage = %Stage::Load, source = source.name(), "loading dataset");
        let loaded = source.load()?;
        self.run_on(loaded)
    }

    /// Run on an already loaded dataset.
    pub fn run_on(&self, loaded: LoadedDataset) -> Result<TrainingReport> {
        self.config.validate()?;
        let LoadedDataset { dataset, summary } = loaded;
        info!(stage = %Stage::Load, %summary, "dataset ready");
        if dataset.is_empty() {
            return Err(DataError::Empty.into());
        }

        let (train, test) = split_dataset(&dataset, self.config.test_ratio, self.config.seed)?;
        info!(
            stage = %Stage::Split,
            train = train.len(),
            test = test.len(),
            "train/test split"
        );

        let imbalance_ratio = train.class_counts().imbalance_ratio()?;
        info!(stage = %Stage::Weight, ratio = imbalance_ratio, "class imbalance ratio");
        let base = self
            .config
            .seeded_booster()
            .with_scale_pos_weight(imbalance_ratio);

        let search = RandomizedSearch::new(self.config.seeded_search()).run(&train, &base)?;
        info!(
            stage = %Stage::Search,
            score = search.best_score,
            params = %search.best_params,
            "best configuration selected"
        );

        let model = GradientBoostedClassifier::fit(&search.best_params, &train)?;
        info!(stage = %Stage::Refit, trees = model.n_trees(), "refit on training partition");

        let predicted = test
            .features()
            .iter()
            .map(|row| model.predict(row).map(|p| p.label))
            .collect::<classifier_spi::Result<Vec<u8>>>()?;
        let evaluation = ClassificationReport::from_labels(&predicted, test.labels());
        info!(
            stage = %Stage::Evaluate,
            accuracy = evaluation.accuracy,
            f1 = evaluation.positive_f1(),
            "held-out evaluation"
        );

        ModelArtifact::new(model, imbalance_ratio).save(&self.config.model_path)?;
        info!(
            stage = %Stage::Persist,
            path = %self.config.model_path.display(),
            "artifact written"
        );

        Ok(TrainingReport {
            cleaning: summary,
            train_rows: train.len(),
            test_rows: test.len(),
            imbalance_ratio,
            search,
            evaluation,
            artifact_path: self.config.model_path.clone(),
        })
    }
}
