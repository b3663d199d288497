//! Comprehensive error handling for the Academia API
//!
//! This module provides a unified error type hierarchy using thiserror,
//! with HTTP status mapping via Axum's IntoResponse trait and GraphQL
//! error extensions that carry a stable `code` to the client.

use async_graphql::ErrorExtensions;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Generic message sent to clients in place of server-side fault details
const INTERNAL_ERROR_MESSAGE: &str = "An error occurred: internal error";

/// Storage error code for unique index violations
const DUPLICATE_KEY_CODE: i32 = 11000;

/// API error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for client-side handling
    pub code: &'static str,
    /// Human-readable error message
    pub message: String,
}

/// Main API error type
#[derive(Error, Debug)]
pub enum ApiError {
    // ========== Query Argument Errors ==========
    /// Malformed filter argument
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// Malformed sort argument
    #[error("invalid sort: {0}")]
    InvalidSort(String),

    /// Malformed pagination argument
    #[error("invalid pagination: {0}")]
    InvalidPagination(String),

    /// Identifier that is not a valid document id
    #[error("invalid id: {0}")]
    InvalidId(String),

    /// Missing required input field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    // ========== Resource Errors ==========
    /// No matching active row
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// A row with the same name (case-insensitive) already exists
    #[error("{resource_type} name already exists: {name}")]
    DuplicateName {
        resource_type: &'static str,
        name: String,
    },

    /// A referenced row does not exist or is deleted
    #[error("{field} not found: {id}")]
    ReferenceNotFound { field: &'static str, id: String },

    // ========== Storage Errors ==========
    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Document could not be decoded into a record
    #[error("serialization error: {0}")]
    Deserialization(#[from] bson::de::Error),

    /// Record could not be encoded into a document
    #[error("serialization error: {0}")]
    Serialization(#[from] bson::ser::Error),

    // ========== Configuration Errors ==========
    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    // ========== Internal Errors ==========
    /// Internal server error (catch-all for unexpected errors)
    #[error("internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            Self::InvalidFilter(_)
            | Self::InvalidSort(_)
            | Self::InvalidPagination(_)
            | Self::InvalidId(_)
            | Self::MissingField(_) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            Self::NotFound { .. } => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::DuplicateName { .. } => StatusCode::CONFLICT,

            // 422 Unprocessable Entity
            Self::ReferenceNotFound { .. } => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            Self::Database(_)
            | Self::Deserialization(_)
            | Self::Serialization(_)
            | Self::Configuration(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for client-side handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidFilter(_) => "INVALID_FILTER",
            Self::InvalidSort(_) => "INVALID_SORT",
            Self::InvalidPagination(_) => "INVALID_PAGINATION",
            Self::InvalidId(_) => "INVALID_ID",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::DuplicateName { .. } => "DUPLICATE_NAME",
            Self::ReferenceNotFound { .. } => "REFERENCE_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Deserialization(_) | Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Create a not found error for a specific resource
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// Create a duplicate name error for a specific resource
    pub fn duplicate_name(resource_type: &'static str, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            resource_type,
            name: name.into(),
        }
    }

    /// Whether this wraps a unique index violation raised by the store
    pub fn is_duplicate_key(&self) -> bool {
        use mongodb::error::{ErrorKind, WriteFailure};

        let Self::Database(err) = self else {
            return false;
        };
        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
                write_error.code == DUPLICATE_KEY_CODE
            }
            ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
            _ => false,
        }
    }

    /// Message safe to show to clients
    ///
    /// Server-side faults are replaced by a generic message; client errors
    /// keep their text so the offending value reaches the caller.
    pub fn client_message(&self) -> String {
        if self.status_code().is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }

    /// Log the error with appropriate severity based on status code
    pub fn log(&self) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Server error occurred"
            );
        } else {
            tracing::debug!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Client error"
            );
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        self.log();

        async_graphql::Error::new(self.client_message()).extend_with(|_, extensions| {
            extensions.set("code", self.error_code());
            match self {
                Self::NotFound { resource_type, .. }
                | Self::DuplicateName { resource_type, .. } => {
                    extensions.set("entity", *resource_type)
                }
                Self::ReferenceNotFound { field, id } => {
                    extensions.set("field", *field);
                    extensions.set("id", id.as_str());
                }
                _ => {}
            }
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status_code();
        let error_response = ErrorResponse {
            code: self.error_code(),
            message: self.client_message(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Convert an [`ApiError`] into a GraphQL error carrying its code
pub fn to_graphql_error(error: ApiError) -> async_graphql::Error {
    error.extend()
}

// ========== Conversion Implementations ==========

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ApiError>() {
            Ok(api_err) => api_err,
            Err(err) => Self::Internal(err.to_string()),
        }
    }
}

impl From<academia_shared_config::ConfigError> for ApiError {
    fn from(err: academia_shared_config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}
