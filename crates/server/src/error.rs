//! Server and API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use classifier_facade::{ClassifierError, ErrorKind};
use serde::Serialize;
use thiserror::Error;

/// Startup failures.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid PORT '{0}': expected a number between 0 and 65535")]
    InvalidPort(String),

    #[error("Invalid listen address '{0}'")]
    InvalidAddress(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A failed API request.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
        }
    }
}

impl From<ClassifierError> for ApiError {
    fn from(error: ClassifierError) -> Self {
        let status = match (&error, error.kind()) {
            (_, ErrorKind::MissingResource) => StatusCode::SERVICE_UNAVAILABLE,
            (ClassifierError::InvalidInput(_), _) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_status_mapping() {
        let missing: ApiError = ClassifierError::MissingArtifact {
            path: PathBuf::from("models/kepler_model.pkl"),
        }
        .into();
        assert_eq!(missing.status, StatusCode::SERVICE_UNAVAILABLE);

        let invalid: ApiError = ClassifierError::InvalidInput("NaN".into()).into();
        assert_eq!(invalid.status, StatusCode::UNPROCESSABLE_ENTITY);

        let corrupt: ApiError = ClassifierError::Corrupt("no trees".into()).into();
        assert_eq!(corrupt.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
