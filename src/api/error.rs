//! API Error Types
//!
//! Errors raised while talking to the Notes backend. Display strings are
//! what the user sees in notices, so a backend-provided message wins over a
//! generic status line.

use thiserror::Error;

/// Errors that can occur when calling the Notes API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure (connection refused, DNS, reset)
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// 404 from the backend
    #[error("{}", describe_status(404, message.as_deref()))]
    NotFound { message: Option<String> },

    /// Any other non-2xx status
    #[error("{}", describe_status(*status, message.as_deref()))]
    Status { status: u16, message: Option<String> },

    /// Response body did not match the expected shape
    #[error("Unexpected response: {0}")]
    Schema(String),

    /// HTTP client could not be constructed
    #[error("Client setup failed: {0}")]
    Setup(String),
}

impl ApiError {
    /// Build the error for a non-2xx status
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let message = message.filter(|m| !m.trim().is_empty());
        if status == 404 {
            ApiError::NotFound { message }
        } else {
            ApiError::Status { status, message }
        }
    }

    /// HTTP status, when the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Schema(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Schema(err.to_string())
    }
}

fn describe_status(status: u16, message: Option<&str>) -> String {
    match message {
        Some(message) => message.to_string(),
        None => format!("HTTP error! status: {}", status),
    }
}
