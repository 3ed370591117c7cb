//! Error types for the PetFriends client
//!
//! HTTP error statuses are normally handed back untouched inside an
//! [`ApiResponse`](crate::http::ApiResponse). The status-mapped variants below
//! are only produced when a caller explicitly asks for a typed result via
//! [`ApiResponse::into_result`](crate::http::ApiResponse::into_result) or one
//! of the typed shortcuts such as [`Auth::login`](crate::resources::Auth::login).

use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail with a PetFriends client error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the PetFriends client.
#[derive(Debug, Error)]
pub enum Error {
    /// Service rejected the payload (400).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Bad credentials or API key (403).
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Unknown pet or endpoint (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Payload failed validation (422).
    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    /// Internal server error (500+).
    #[error("Internal server error (status {status}): {message}")]
    InternalServerError {
        /// HTTP status code
        status: u16,
        /// Error message or raw body
        message: String,
    },

    /// Generic API error for status codes not covered above.
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message or raw body
        message: String,
    },

    /// Response body did not have the expected shape.
    #[error("Failed to parse API response: {0}")]
    ResponseValidation(String),

    /// Network or connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request timeout.
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP client configuration or initialization error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic I/O error (reading photo files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing required configuration.
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    /// Configuration value present but malformed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid HTTP header name.
    #[error("Invalid HTTP header name: {0}")]
    InvalidHeaderName(String),

    /// Invalid HTTP header value.
    #[error("Invalid HTTP header value: {0}")]
    InvalidHeaderValue(String),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        /// Context description
        context: String,
        /// Underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Other errors not covered by specific variants.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create an API error from an HTTP response status and body.
    ///
    /// PetFriends answers errors with either a JSON object carrying a
    /// `message` or `error` field, or with a bare HTML/text page. Both are
    /// reduced to a message string.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .unwrap_or_else(|| body.trim().to_string());

        match status {
            400 => Error::BadRequest(message),
            403 => Error::PermissionDenied(message),
            404 => Error::NotFound(message),
            422 => Error::UnprocessableEntity(message),
            s if s >= 500 => Error::InternalServerError { status, message },
            _ => Error::ApiError { status, message },
        }
    }

    /// HTTP status carried by a status-mapped error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::BadRequest(_) => Some(400),
            Error::PermissionDenied(_) => Some(403),
            Error::NotFound(_) => Some(404),
            Error::UnprocessableEntity(_) => Some(422),
            Error::InternalServerError { status, .. } | Error::ApiError { status, .. } => {
                Some(*status)
            }
            Error::WithContext { source, .. } => {
                source.downcast_ref::<Error>().and_then(Error::status)
            }
            _ => None,
        }
    }

    /// Add context to an error.
    pub fn context<C>(self, context: C) -> Self
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        Error::WithContext {
            context: context.to_string(),
            source: Box::new(self),
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}
