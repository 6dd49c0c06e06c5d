//! Classifier error types.

use data_spi::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while fitting, predicting with, or persisting a classifier.
#[derive(Debug, Clone, Error)]
pub enum ClassifierError {
    /// Model artifact file does not exist
    #[error("Model artifact not found: {}", path.display())]
    MissingArtifact { path: PathBuf },

    /// Prediction input is unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Too few rows to fit
    #[error("Insufficient data: need at least {required} rows, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid hyperparameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Stored feature order differs from the expected schema
    #[error("Feature mismatch: expected [{}], found [{}]", expected.join(", "), found.join(", "))]
    FeatureMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Artifact content is not a valid model
    #[error("Corrupt model artifact: {0}")]
    Corrupt(String),

    /// Artifact could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Filesystem failure while reading or writing an artifact
    #[error("I/O error on {}: {message}", path.display())]
    Io { path: PathBuf, message: String },
}

impl ClassifierError {
    /// Failure category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClassifierError::MissingArtifact { .. } => ErrorKind::MissingResource,
            ClassifierError::InvalidInput(_)
            | ClassifierError::InsufficientData { .. }
            | ClassifierError::FeatureMismatch { .. }
            | ClassifierError::Corrupt(_)
            | ClassifierError::Serialization(_) => ErrorKind::DataIntegrity,
            ClassifierError::InvalidParameter { .. } | ClassifierError::Io { .. } => {
                ErrorKind::Configuration
            }
        }
    }

    /// Shorthand for an [`ClassifierError::InvalidParameter`].
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        ClassifierError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for classifier operations.
pub type Result<T> = std::result::Result<T, ClassifierError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_artifact_error() {
        let error = ClassifierError::MissingArtifact {
            path: PathBuf::from("models/kepler_model.pkl"),
        };
        assert_eq!(
            error.to_string(),
            "Model artifact not found: models/kepler_model.pkl"
        );
        assert_eq!(error.kind(), ErrorKind::MissingResource);
    }

    #[test]
    fn test_feature_mismatch_error() {
        let error = ClassifierError::FeatureMismatch {
            expected: vec!["koi_period".to_string(), "koi_duration".to_string()],
            found: vec!["koi_duration".to_string(), "koi_period".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Feature mismatch: expected [koi_period, koi_duration], found [koi_duration, koi_period]"
        );
        assert_eq!(error.kind(), ErrorKind::DataIntegrity);
    }

    #[test]
    fn test_invalid_parameter_helper() {
        let error = ClassifierError::invalid_parameter("subsample", "must be in (0, 1]");
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'subsample': must be in (0, 1]"
        );
        assert_eq!(error.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_insufficient_data_error() {
        let error = ClassifierError::InsufficientData {
            required: 1,
            actual: 0,
        };
        assert_eq!(
            error.to_string(),
            "Insufficient data: need at least 1 rows, got 0"
        );
    }

    #[test]
    fn test_io_error_kind() {
        let error = ClassifierError::Io {
            path: PathBuf::from("/readonly/model.json"),
            message: "permission denied".to_string(),
        };
        assert!(error.to_string().contains("permission denied"));
        assert_eq!(error.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_error_implements_std_error() {
        fn assert_std_error<E: std::error::Error>() {}
        assert_std_error::<ClassifierError>();
    }
}
