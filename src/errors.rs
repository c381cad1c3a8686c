use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use async_graphql::ErrorExtensions;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid session state: {0}")]
    InvalidSessionState(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Generation error: {0}")]
    GenerationError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::InvalidFormat(_) => "INVALID_FORMAT",
            AppError::InvalidSessionState(_) => "INVALID_SESSION_STATE",
            AppError::StorageError(_) => "STORAGE_ERROR",
            AppError::GenerationError(_) => "GENERATION_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidFormat(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidSessionState(_) => StatusCode::CONFLICT,
            AppError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::GenerationError(_) => StatusCode::BAD_GATEWAY,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
        })
    }
}
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::StorageError(err.to_string())
    }
}
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(format!("JSON serialization error: {}", err))
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::GenerationError(err.to_string())
    }
}
impl From<async_graphql::Error> for AppError {
    fn from(err: async_graphql::Error) -> Self {
        AppError::InternalError(err.message)
    }
}
impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_err, e| {
            e.set("code", self.error_code());
        })
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::NotFound("test".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::ValidationError("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidFormat("test".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::InvalidSessionState("test".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::GenerationError("test".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::NotFound("quiz".into());
        assert_eq!(err.to_string(), "Not found: quiz");

        let err = AppError::InvalidFormat("missing field `questions`".into());
        assert_eq!(err.to_string(), "Invalid format: missing field `questions`");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::InvalidSessionState("x".into()).error_code(),
            "INVALID_SESSION_STATE"
        );
        assert_eq!(AppError::StorageError("x".into()).error_code(), "STORAGE_ERROR");
    }

    #[test]
    fn test_io_error_maps_to_storage_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::StorageError(_)));
    }
}
