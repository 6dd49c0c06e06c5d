//! Data error types.

use std::path::PathBuf;
use thiserror::Error;

/// Broad failure category shared by every layer of the workspace.
///
/// Callers use it to pick a diagnostic without matching on each concrete
/// error variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An input dataset or model artifact is absent.
    MissingResource,
    /// The data cannot support the requested operation (empty or degenerate
    /// partitions, schema mismatch, unparsable cells).
    DataIntegrity,
    /// An operator-supplied setting is invalid or an output could not be written.
    Configuration,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::MissingResource => write!(f, "missing resource"),
            ErrorKind::DataIntegrity => write!(f, "data integrity"),
            ErrorKind::Configuration => write!(f, "configuration"),
        }
    }
}

/// Dataset errors.
#[derive(Debug, Clone, Error)]
pub enum DataError {
    /// Source file does not exist
    #[error("Dataset not found: {}", path.display())]
    MissingResource { path: PathBuf },

    /// A required column is absent from the header
    #[error("Required column '{0}' not found in header")]
    MissingColumn(String),

    /// A non-missing feature cell is not numeric
    #[error("Invalid value '{value}' in column '{column}' at line {line}")]
    InvalidValue {
        line: u64,
        column: String,
        value: String,
    },

    /// Failed to read or parse the delimited table
    #[error("Parse error: {0}")]
    ParseError(String),

    /// No rows survived cleaning
    #[error("No rows left after cleaning")]
    Empty,

    /// One class has no members, so class weighting is undefined
    #[error("Degenerate label distribution: {negative} negative, {positive} positive")]
    DegenerateClasses { negative: usize, positive: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl DataError {
    /// Failure category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DataError::MissingResource { .. } => ErrorKind::MissingResource,
            DataError::MissingColumn(_)
            | DataError::InvalidValue { .. }
            | DataError::ParseError(_)
            | DataError::Empty
            | DataError::DegenerateClasses { .. } => ErrorKind::DataIntegrity,
            DataError::InvalidParameter { .. } => ErrorKind::Configuration,
        }
    }
}

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_resource_error() {
        let error = DataError::MissingResource {
            path: PathBuf::from("data/cumulative.csv"),
        };
        assert_eq!(error.to_string(), "Dataset not found: data/cumulative.csv");
        assert_eq!(error.kind(), ErrorKind::MissingResource);
    }

    #[test]
    fn test_missing_column_error() {
        let error = DataError::MissingColumn("koi_prad".to_string());
        assert_eq!(
            error.to_string(),
            "Required column 'koi_prad' not found in header"
        );
        assert_eq!(error.kind(), ErrorKind::DataIntegrity);
    }

    #[test]
    fn test_invalid_value_error() {
        let error = DataError::InvalidValue {
            line: 42,
            column: "koi_depth".to_string(),
            value: "deep".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid value 'deep' in column 'koi_depth' at line 42"
        );
    }

    #[test]
    fn test_degenerate_classes_error() {
        let error = DataError::DegenerateClasses {
            negative: 80,
            positive: 0,
        };
        assert_eq!(
            error.to_string(),
            "Degenerate label distribution: 80 negative, 0 positive"
        );
        assert_eq!(error.kind(), ErrorKind::DataIntegrity);
    }

    #[test]
    fn test_invalid_parameter_error() {
        let error = DataError::InvalidParameter {
            name: "test_ratio".to_string(),
            reason: "must be in (0, 1)".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'test_ratio': must be in (0, 1)"
        );
        assert_eq!(error.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_error_is_clone() {
        let error = DataError::Empty;
        let cloned = error.clone();
        assert_eq!(error.to_string(), cloned.to_string());
    }

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::MissingResource.to_string(), "missing resource");
        assert_eq!(ErrorKind::DataIntegrity.to_string(), "data integrity");
        assert_eq!(ErrorKind::Configuration.to_string(), "configuration");
    }
}
