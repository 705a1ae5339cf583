//! API Error Types
//!
//! Failures talking to the monitoring API. The `Display` text is what the
//! dashboard shows in its error view and resolve notifications, so variants
//! are not classified any further by the controller.

use serde::Deserialize;
use thiserror::Error;

/// Errors returned by a [`DashboardApi`](super::DashboardApi)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// The body was not the expected JSON
    #[error("Parse error: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Error body the backend sends with non-success statuses.
///
/// Route guards answer `{"error": ...}`; handlers that fail internally answer
/// `{"success": false, "message": ...}`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message)
    }
}

impl ApiError {
    /// Build a status error, preferring the server's `error` or `message` field
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    "Unknown error".to_string()
                } else {
                    body.trim().to_string()
                }
            });
        ApiError::Status { status, message }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
