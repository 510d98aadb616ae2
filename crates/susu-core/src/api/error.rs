//! Structured API errors.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Categories of API errors for consistent error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// HTTP status error (4xx, 5xx) surfaced from a business endpoint.
    HttpStatus,
    /// Request or refresh timeout.
    Timeout,
    /// Connection-level failure (DNS, TLS, reset).
    Transport,
    /// Failed to parse a response body.
    Parse,
    /// The credential refresh failed; the session has been invalidated.
    Refresh,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::HttpStatus => write!(f, "http_status"),
            ApiErrorKind::Timeout => write!(f, "timeout"),
            ApiErrorKind::Transport => write!(f, "transport"),
            ApiErrorKind::Parse => write!(f, "parse"),
            ApiErrorKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// Structured error from the API layer with kind and details.
///
/// Cloneable by design: a single refresh failure fans out to every request
/// queued behind that refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error category
    pub kind: ApiErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// HTTP status code, when one was received
    pub status: Option<u16>,
    /// Optional additional details (e.g., raw error body)
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            details: None,
        }
    }

    /// Creates an HTTP status error, extracting the backend's
    /// `{"detail": ...}` message when the body carries one.
    pub fn http_status(status: u16, body: &str) -> Self {
        let message = match extract_detail(body) {
            Some(detail) => format!("HTTP {status}: {detail}"),
            None => format!("HTTP {status}"),
        };
        Self {
            kind: ApiErrorKind::HttpStatus,
            message,
            status: Some(status),
            details: (!body.is_empty()).then(|| body.to_string()),
        }
    }

    /// Creates a transport error from a reqwest failure.
    pub fn transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::timeout(err.to_string());
        }
        Self::new(ApiErrorKind::Transport, err.to_string())
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Timeout, message)
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Parse, message)
    }

    /// Creates a refresh error wrapping the underlying failure.
    pub fn refresh(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Refresh, message)
    }

    /// Returns true if this error means the caller must re-authenticate.
    pub fn requires_login(&self) -> bool {
        self.kind == ApiErrorKind::Refresh || self.status == Some(401)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

fn extract_detail(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    match json.get("detail")? {
        Value::String(s) => Some(s.clone()),
        // Validation errors arrive as a list of objects; flatten to text.
        other => Some(other.to_string()),
    }
}
