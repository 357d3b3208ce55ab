//! # API Error Types
//!
//! Error taxonomy for the REST client.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       API Error Categories                              │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Service             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Transport      │  │  Unauthorized           │ │
//! │  │                 │  │  Timeout        │  │  ServiceRejected (4xx)  │ │
//! │  │                 │  │                 │  │  ServiceError (5xx)     │ │
//! │  └─────────────────┘  └─────────────────┘  │  InvalidResponse        │ │
//! │                                            └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Degradation Policy
//! The raw error is logged for diagnostics; what the user sees comes from
//! [`ApiError::user_message`], which collapses transport and server
//! failures into one friendly string and passes backend rejection messages
//! through verbatim.

use thiserror::Error;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// REST client error type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid client configuration (bad base URL, zero timeout).
    #[error("Invalid API configuration: {0}")]
    InvalidConfig(String),

    /// Could not reach the backend (DNS, refused connection, TLS).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The request exceeded the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The backend rejected the bearer token (or none was sent).
    #[error("Not authorized")]
    Unauthorized,

    /// The backend rejected the request (4xx) with a message.
    #[error("Request rejected ({status}): {message}")]
    ServiceRejected { status: u16, message: String },

    /// The backend failed (5xx).
    #[error("Service error (status {status})")]
    ServiceError { status: u16 },

    /// The response body did not match the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Input rejected before any network call was made.
    #[error("Validation error: {0}")]
    Validation(#[from] ecostore_core::ValidationError),
}

impl ApiError {
    /// Whether retrying this request could possibly succeed.
    ///
    /// Only used for idempotent GETs; writes are never retried.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ApiError::Transport(_) | ApiError::Timeout | ApiError::ServiceError { .. }
        )
    }

    /// The string shown to the user.
    ///
    /// Backend rejections carry their own wording; everything else
    /// degrades to a generic friendly message (the raw cause is already
    /// logged).
    pub fn user_message(&self) -> String {
        match self {
            ApiError::ServiceRejected { message, .. } => message.clone(),
            ApiError::Validation(err) => err.to_string(),
            ApiError::Unauthorized => "Please log in and try again.".to_string(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
