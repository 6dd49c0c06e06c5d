//! Hyperparameter Tuning Service Provider Interface
//!
//! Defines the search space, cross-validation and scoring contracts together
//! with the search result types.

use classifier_api::BoosterParams;
use classifier_spi::ClassifierError;
use data_spi::{DataError, ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Tuning errors.
#[derive(Debug, Clone, Error)]
pub enum TuningError {
    #[error("Insufficient data: required {required}, got {got}")]
    InsufficientData { required: usize, got: usize },

    #[error("Class {label} has {members} members, fewer than {folds} folds")]
    ClassTooSmall {
        label: u8,
        members: usize,
        folds: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error(transparent)]
    Data(#[from] DataError),
}

impl TuningError {
    /// Failure category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TuningError::InsufficientData { .. } | TuningError::ClassTooSmall { .. } => {
                ErrorKind::DataIntegrity
            }
            TuningError::InvalidConfig(_) | TuningError::WorkerPool(_) => {
                ErrorKind::Configuration
            }
            TuningError::Classifier(e) => e.kind(),
            TuningError::Data(e) => e.kind(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TuningError>;

// ============================================================================
// Objective Functions
// ============================================================================

/// Score used to rank candidates. Higher is always better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Objective {
    /// F1 of the positive class.
    #[default]
    F1,
    /// Precision of the positive class.
    Precision,
    /// Recall of the positive class.
    Recall,
    /// Fraction of correct decisions.
    Accuracy,
}

impl Objective {
    pub fn name(&self) -> &'static str {
        match self {
            Objective::F1 => "f1",
            Objective::Precision => "precision",
            Objective::Recall => "recall",
            Objective::Accuracy => "accuracy",
        }
    }
}

impl std::fmt::Display for Objective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Validation Strategies
// ============================================================================

/// Row indices of one cross-validation fold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Trait for cross-validation strategies over labeled rows.
pub trait Validator: Send + Sync {
    /// Generate fold splits for the given labels.
    fn splits(&self, labels: &[u8]) -> Result<Vec<FoldSplit>>;

    /// Number of folds produced.
    fn n_splits(&self) -> usize;
}

// ============================================================================
// Search Space
// ============================================================================

/// An enumerable space of booster configurations.
pub trait ParameterSpace: Send + Sync {
    /// Total number of configurations.
    fn combinations(&self) -> usize;

    /// Configuration at `index`, applied on top of `base`.
    ///
    /// Fields the space does not tune are taken from `base` unchanged.
    fn candidate(&self, index: usize, base: &BoosterParams) -> BoosterParams;
}

// ============================================================================
// Search Results
// ============================================================================

/// Cross-validated score of one sampled configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    /// Position in the space the configuration was decoded from.
    pub grid_index: usize,
    pub params: BoosterParams,
    /// One score per fold, in fold order.
    pub fold_scores: Vec<f64>,
    pub mean_score: f64,
}

/// Outcome of a randomized search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Best configuration. Ties go to the earliest sampled candidate.
    pub best_params: BoosterParams,
    pub best_score: f64,
    /// Position of the best candidate in `candidates`.
    pub best_candidate: usize,
    pub objective: Objective,
    /// Every evaluated candidate in sampling order.
    pub candidates: Vec<CandidateScore>,
    /// Total (configuration x fold) fits performed.
    pub evaluations: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_objective_default_is_f1() {
        assert_eq!(Objective::default(), Objective::F1);
        assert_eq!(Objective::F1.to_string(), "f1");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            TuningError::ClassTooSmall {
                label: 1,
                members: 3,
                folds: 5
            }
            .kind(),
            ErrorKind::DataIntegrity
        );
        assert_eq!(
            TuningError::InvalidConfig("n_iter must be > 0".into()).kind(),
            ErrorKind::Configuration
        );
        let wrapped: TuningError = ClassifierError::invalid_parameter("gamma", "negative").into();
        assert_eq!(wrapped.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_class_too_small_message() {
        let error = TuningError::ClassTooSmall {
            label: 1,
            members: 3,
            folds: 5,
        };
        assert_eq!(error.to_string(), "Class 1 has 3 members, fewer than 5 folds");
    }

    #[test]
    fn test_transparent_wrapping_keeps_message() {
        let inner = DataError::Empty;
        let message = inner.to_string();
        let wrapped: TuningError = inner.into();
        assert_eq!(wrapped.to_string(), message);
    }

    struct TwoPoint;

    impl ParameterSpace for TwoPoint {
        fn combinations(&self) -> usize {
            2
        }

        fn candidate(&self, index: usize, base: &BoosterParams) -> BoosterParams {
            base.with_max_depth(2 + index)
        }
    }

    #[test]
    fn test_parameter_space_keeps_base_fields() {
        let base = BoosterParams::default().with_scale_pos_weight(4.0);
        let candidate = TwoPoint.candidate(1, &base);
        assert_eq!(candidate.max_depth, 3);
        assert_eq!(candidate.scale_pos_weight, 4.0);
    }
}
