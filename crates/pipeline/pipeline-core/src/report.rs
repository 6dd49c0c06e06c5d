//! Training run summary.

use classifier_api::BoosterParams;
use data_spi::CleaningSummary;
use std::fmt;
use std::path::PathBuf;
use tuning_core::ClassificationReport;
use tuning_spi::SearchResult;

/// What a successful training run produced.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub cleaning: CleaningSummary,
    pub train_rows: usize,
    pub test_rows: usize,
    /// Negative to positive ratio of the training partition
    pub imbalance_ratio: f64,
    pub search: SearchResult,
    /// Held-out evaluation of the refitted model
    pub evaluation: ClassificationReport,
    pub artifact_path: PathBuf,
}

impl TrainingReport {
    pub fn best_params(&self) -> &BoosterParams {
        &self.search.best_params
    }
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset: {}", self.cleaning)?;
        writeln!(
            f,
            "Split: {} training rows, {} test rows",
            self.train_rows, self.test_rows
        )?;
        writeln!(f, "Class weight (scale_pos_weight): {:.4}", self.imbalance_ratio)?;
        writeln!(
            f,
            "Best parameters ({} {:.4} over {} fits): {}",
            self.search.objective,
            self.search.best_score,
            self.search.evaluations,
            self.search.best_params
        )?;
        writeln!(f)?;
        writeln!(f, "--- Model Evaluation Report ---")?;
        write!(f, "{}", self.evaluation)?;
        writeln!(f)?;
        write!(f, "Model saved to {}", self.artifact_path.display())
    }
}
