//! Error types for the Semantic Scholar CLI.
//!
//! Uses `thiserror` for structured error handling with automatic `From`
//! implementations. Every variant maps to a distinct process exit code.

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// Identifier cannot be placed in a URL path or request body.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Server rejected the request (non-429 error status, surfaced verbatim).
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Retry budget exhausted on repeated 429 responses.
    #[error("rate limit exceeded after {attempts} attempts")]
    RateLimitExceeded {
        /// Total requests made, including the initial one.
        attempts: u32,
    },

    /// Network-level failure (connection, DNS, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    /// Response body was not valid JSON or had an unexpected shape.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.into())
    }
}

impl ClientError {
    /// Create an invalid identifier error.
    #[must_use]
    pub fn invalid_identifier(input: impl Into<String>) -> Self {
        Self::InvalidIdentifier(input.into())
    }

    /// Create an API error from a status code and body.
    #[must_use]
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api { status, body: body.into() }
    }

    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Api { .. } | Self::Parse(_) => 1,
            Self::InvalidIdentifier(_) => 2,
            Self::RateLimitExceeded { .. } => 3,
            Self::Transport(_) => 4,
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
