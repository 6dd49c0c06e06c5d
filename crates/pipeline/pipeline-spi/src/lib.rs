//! Pipeline Service Provider Interface
//!
//! Defines the training stages and the error type every stage reports through.

use classifier_spi::ClassifierError;
use data_spi::DataError;
use thiserror::Error;
use tuning_spi::TuningError;

pub use data_spi::ErrorKind;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while training
#[derive(Error, Debug, Clone)]
pub enum PipelineError {
    /// Loading, cleaning or splitting the dataset failed
    #[error(transparent)]
    Data(#[from] DataError),

    /// Fitting or persisting the classifier failed
    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    /// Cross-validated search failed
    #[error(transparent)]
    Tuning(#[from] TuningError),

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl PipelineError {
    /// Failure category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Data(e) => e.kind(),
            PipelineError::Classifier(e) => e.kind(),
            PipelineError::Tuning(e) => e.kind(),
            PipelineError::InvalidParameter { .. } => ErrorKind::Configuration,
        }
    }
}

/// Training stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Load,
    Split,
    Weight,
    Search,
    Refit,
    Evaluate,
    Persist,
}

impl Stage {
    pub const ALL: [Stage; 7] = [
        Stage::Load,
        Stage::Split,
        Stage::Weight,
        Stage::Search,
        Stage::Refit,
        Stage::Evaluate,
        Stage::Persist,
    ];

    /// Name of this stage
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::Split => "split",
            Stage::Weight => "weight",
            Stage::Search => "search",
            Stage::Refit => "refit",
            Stage::Evaluate => "evaluate",
            Stage::Persist => "persist",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_kind_passes_through() {
        let missing: PipelineError = DataError::MissingResource {
            path: PathBuf::from("data/cumulative.csv"),
        }
        .into();
        assert_eq!(missing.kind(), ErrorKind::MissingResource);
        assert_eq!(
            missing.to_string(),
            "Dataset not found: data/cumulative.csv"
        );

        let degenerate: PipelineError = DataError::DegenerateClasses {
            negative: 10,
            positive: 0,
        }
        .into();
        assert_eq!(degenerate.kind(), ErrorKind::DataIntegrity);

        let nested: PipelineError = TuningError::from(DataError::Empty).into();
        assert_eq!(nested.kind(), ErrorKind::DataIntegrity);
    }

    #[test]
    fn test_invalid_parameter() {
        let error = PipelineError::InvalidParameter {
            name: "test_ratio".to_string(),
            reason: "must be in (0, 1)".to_string(),
        };
        assert_eq!(error.kind(), ErrorKind::Configuration);
        assert!(error.to_string().contains("test_ratio"));
    }

    #[test]
    fn test_persist_is_last_stage() {
        assert_eq!(Stage::ALL.last(), Some(&Stage::Persist));
        assert_eq!(Stage::Search.to_string(), "search");
    }
}
