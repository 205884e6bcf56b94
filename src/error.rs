//! Typed error hierarchy for the a11y-checker crate.
//!
//! The auditing API reports most failures as ordinary HTTP responses, and
//! those never reach this type: a 404 or a 503 comes back from
//! [`A11yClient::dispatch`](crate::client::A11yClient::dispatch) as an
//! [`ApiResponse`](crate::response::ApiResponse) carrying the status and the
//! best-effort-parsed body. `A11yError` covers everything that leaves the
//! caller without a response to inspect:
//!
//! - `Transport` wraps `reqwest::Error` for failures that produce no HTTP
//!   response at all (DNS, refused connection, TLS, timeout, truncated body).
//! - `InvalidBaseUrl` and `Config` are raised while building a client.
//! - `Encode` wraps query-string encoding failures.
//! - `Parse` wraps `serde_json::Error` when a caller asks for a typed view of
//!   a response body via [`ApiResponse::deserialize`](crate::response::ApiResponse::deserialize).

/// Unified error type for all a11y-checker library operations.
#[derive(Debug, thiserror::Error)]
pub enum A11yError {
    /// The request did not produce an HTTP response.
    ///
    /// No status code is available. The wrapped `reqwest::Error` carries the
    /// transport diagnostics; see [`A11yError::is_timeout`] and
    /// [`A11yError::is_connect`] for the common cases.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The configured base URL could not be parsed.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// The client builder was given a value it cannot use.
    #[error("invalid client configuration: {message}")]
    Config {
        /// What was rejected and why.
        message: String,
    },

    /// Request parameters could not be encoded as a query string.
    #[error("failed to encode request parameters: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    /// A response body did not match the shape the caller asked for.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl A11yError {
    /// Returns `true` when the request timed out before a response arrived.
    pub fn is_timeout(&self) -> bool {
        matches!(self, A11yError::Transport(e) if e.is_timeout())
    }

    /// Returns `true` when the connection to the service could not be opened.
    pub fn is_connect(&self) -> bool {
        matches!(self, A11yError::Transport(e) if e.is_connect())
    }
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, A11yError>;
