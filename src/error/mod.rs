//! Error handling module.
//!
//! This module provides unified error handling with proper HTTP status code mapping
//! and standardized API error responses.

pub mod codes;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub use codes::ErrorCode;

use crate::random::GeneratorError;

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// Resource already exists.
    #[error("Resource already exists: {0}")]
    ResourceExists(String),

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Generation constraints are inconsistent.
    #[error("Invalid constraint: {0}")]
    InvalidConstraint(String),

    /// Imported value could not be decoded.
    #[error("Import failed: {0}")]
    ImportFailed(String),

    /// Secure random source failed.
    #[error("Entropy unavailable: {0}")]
    EntropyUnavailable(String),

    /// Password hashing failed.
    #[error("Hash generation failed: {0}")]
    HashFailed(String),

    /// Storage backend error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::ResourceNotFound(_) => ErrorCode::RESOURCE_NOT_FOUND,
            Self::ResourceExists(_) => ErrorCode::RESOURCE_EXISTS,
            Self::Unauthorized(_) => ErrorCode::UNAUTHORIZED,
            Self::BadRequest(_) => ErrorCode::BAD_REQUEST,
            Self::InvalidConstraint(_) => ErrorCode::INVALID_CONSTRAINT,
            Self::ImportFailed(_) => ErrorCode::IMPORT_FAILED,
            Self::EntropyUnavailable(_) => ErrorCode::ENTROPY_UNAVAILABLE,
            Self::HashFailed(_) => ErrorCode::HASH_FAILED,
            Self::Storage(_) => ErrorCode::STORAGE_ERROR,
            Self::Internal(_) => ErrorCode::INTERNAL_ERROR,
        }
    }

    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            Self::ResourceExists(_) => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) | Self::InvalidConstraint(_) | Self::ImportFailed(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::EntropyUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::HashFailed(_) | Self::Storage(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<GeneratorError> for AppError {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::InvalidConstraint(msg) => Self::InvalidConstraint(msg),
            GeneratorError::EntropyUnavailable(msg) => Self::EntropyUnavailable(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let category = error_code.category();
        let code = error_code.as_i32();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(
                error_code = code,
                category = %category,
                status = %status,
                message = %message,
                "Request failed"
            );
        } else {
            tracing::warn!(
                error_code = code,
                category = %category,
                status = %status,
                message = %message,
                "Request rejected"
            );
        }

        let body = Json(json!({
            "code": code,
            "message": message,
            "data": null
        }));

        (status, body).into_response()
    }
}

/// Storage-specific error type.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Lock acquisition failed.
    #[error("Failed to acquire lock: {0}")]
    LockFailed(String),

    /// File I/O error.
    #[error("File I/O error: {0}")]
    FileIO(String),

    /// Backend is not reachable.
    #[error("Storage unavailable")]
    Unavailable,
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::FileIO(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias using `StorageError`.
pub type StorageResult<T> = std::result::Result<T, StorageError>;
