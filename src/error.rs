//! Error types shared by the request layer, the providers and the stores.
//!
//! Every failure a user can see is a [`NewsError`]. Only
//! [`NewsError::Network`] is considered transient: the retry wrapper in
//! [`crate::api`] retries it, everything else is surfaced as-is.

use thiserror::Error;

/// Errors produced while fetching, decoding or persisting news data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NewsError {
    /// Search text failed validation before any request was made.
    #[error("Search query must be at least {min} characters")]
    InvalidQuery { min: usize },

    /// The provider answered 429.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The provider rejected the API key (401/403).
    #[error("Unauthorized (HTTP {status})")]
    Unauthorized { status: u16 },

    /// The provider rejected the request parameters (400).
    #[error("Bad request")]
    BadRequest,

    /// The provider failed on its side (5xx).
    #[error("Server error (HTTP {status})")]
    ServerError { status: u16 },

    /// Any other non-success status.
    #[error("Request failed with status {status}")]
    Http { status: u16 },

    /// A 2xx body that carried `status: "error"`.
    #[error("{code}: {message}")]
    Api { code: String, message: String },

    /// Connection, timeout or truncated-body failure. Retried.
    #[error("Network error: {0}")]
    Network(String),

    /// The body was complete but did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Local key-value storage failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl NewsError {
    /// Whether the request layer should retry after this error.
    pub fn is_transient(&self) -> bool {
        matches!(self, NewsError::Network(_))
    }

    /// Short machine-readable code, mirrored in log fields.
    pub fn code(&self) -> &'static str {
        match self {
            NewsError::InvalidQuery { .. } => "INVALID_QUERY",
            NewsError::RateLimited => "RATE_LIMIT",
            NewsError::Unauthorized { .. } => "UNAUTHORIZED",
            NewsError::BadRequest => "BAD_REQUEST",
            NewsError::ServerError { .. } => "SERVER_ERROR",
            NewsError::Http { .. } => "HTTP_ERROR",
            NewsError::Api { .. } => "API_ERROR",
            NewsError::Network(_) => "NETWORK_ERROR",
            NewsError::Decode(_) => "DECODE_ERROR",
            NewsError::Storage(_) => "STORAGE_ERROR",
            NewsError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Message shown to the reader in the status line.
    pub fn user_message(&self) -> String {
        match self {
            NewsError::InvalidQuery { min } => {
                format!("Search query must be at least {min} characters")
            }
            NewsError::RateLimited => "Rate limit exceeded. Please try again later.".to_string(),
            NewsError::Unauthorized { .. } => {
                "Invalid API key. Please check your configuration.".to_string()
            }
            NewsError::BadRequest => {
                "Invalid request. Please check your search query.".to_string()
            }
            NewsError::ServerError { .. } => {
                "News service is temporarily unavailable. Please try again.".to_string()
            }
            NewsError::Http { status } => format!("Request failed with status {status}"),
            NewsError::Api { message, .. } => message.clone(),
            NewsError::Network(_) => {
                "Could not reach the news service. Check your connection.".to_string()
            }
            NewsError::Decode(_) => "The news service sent an unexpected response.".to_string(),
            NewsError::Storage(_) => "Local storage is unavailable.".to_string(),
            NewsError::Config(msg) => format!("Configuration problem: {msg}"),
        }
    }

    /// Map a non-success HTTP status to its typed error.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => NewsError::BadRequest,
            401 | 403 => NewsError::Unauthorized { status },
            429 => NewsError::RateLimited,
            s if s >= 500 => NewsError::ServerError { status: s },
            s => NewsError::Http { status: s },
        }
    }
}

impl From<reqwest::Error> for NewsError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => NewsError::from_status(status.as_u16()),
            None => NewsError::Network(e.to_string()),
        }
    }
}
