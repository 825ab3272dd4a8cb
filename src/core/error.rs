//! Typed error handling for the admin API
//!
//! Every failure a handler can produce is an [`AdminError`]. Each variant maps to
//! an HTTP status and a stable error code, and renders as a JSON body of the
//! form `{ "error": "...", "code": "..." }`.
//!
//! # Error Categories
//!
//! - [`AdminError::Validation`]: missing or malformed request input (400)
//! - [`AdminError::NotFound`]: unknown record id (404)
//! - [`AdminError::Unauthorized`]: missing session or rejected credentials (401)
//! - [`AdminError::Upstream`]: non-OK answer from the backend (upstream status, else 502)
//! - [`AdminError::Config`]: configuration loading and validation (500)
//! - [`AdminError::Internal`]: anything unexpected (500)
//!
//! # Example
//!
//! ```rust,ignore
//! async fn fetch(store: &dyn RecordStore<User>, id: u64) -> AdminResult<User> {
//!     store.get(id).await?.ok_or(AdminError::not_found("user", id))
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type of the admin API
#[derive(Debug, Error)]
pub enum AdminError {
    /// Request input could not be used
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A record with the given id does not exist
    #[error("{resource} with id '{id}' not found")]
    NotFound { resource: String, id: u64 },

    /// Missing session cookie or credentials rejected by the backend
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// The upstream backend answered with a non-OK status
    #[error("Upstream request failed with status {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Unexpected failures
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Error code for programmatic handling
    pub code: &'static str,
}

impl AdminError {
    /// Shorthand for [`AdminError::NotFound`]
    pub fn not_found(resource: &str, id: u64) -> Self {
        AdminError::NotFound {
            resource: resource.to_string(),
            id,
        }
    }

    /// Shorthand for [`AdminError::Unauthorized`]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        AdminError::Unauthorized {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AdminError::Validation(_) => StatusCode::BAD_REQUEST,
            AdminError::NotFound { .. } => StatusCode::NOT_FOUND,
            AdminError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AdminError::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            AdminError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AdminError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AdminError::Validation(e) => e.error_code(),
            AdminError::NotFound { .. } => "NOT_FOUND",
            AdminError::Unauthorized { .. } => "UNAUTHORIZED",
            AdminError::Upstream { .. } => "UPSTREAM_ERROR",
            AdminError::Config(_) => "CONFIG_ERROR",
            AdminError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            code: self.error_code(),
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to request input
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required query parameter is absent
    #[error("Missing required parameter '{name}'")]
    MissingParameter { name: String },

    /// A required query parameter could not be parsed
    #[error("Invalid value '{value}' for parameter '{name}'")]
    InvalidParameter { name: String, value: String },

    /// A path id is not a positive integer
    #[error("Invalid id '{value}'")]
    InvalidId { value: String },

    /// The request body could not be decoded
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::MissingParameter { .. } => "MISSING_PARAMETER",
            ValidationError::InvalidParameter { .. } => "INVALID_PARAMETER",
            ValidationError::InvalidId { .. } => "INVALID_ID",
            ValidationError::InvalidBody { .. } => "INVALID_BODY",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        AdminError::Internal(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for AdminError {
    fn from(err: serde_yaml::Error) -> Self {
        AdminError::Config(ConfigError::ParseError {
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for AdminError {
    fn from(err: std::io::Error) -> Self {
        AdminError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<reqwest::Error> for AdminError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => AdminError::Upstream {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => AdminError::Upstream {
                status: StatusCode::BAD_GATEWAY.as_u16(),
                message: err.to_string(),
            },
        }
    }
}

impl From<anyhow::Error> for AdminError {
    fn from(err: anyhow::Error) -> Self {
        AdminError::Internal(err.to_string())
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for admin operations
pub type AdminResult<T> = Result<T, AdminError>;
