//! Unified error types for the API client.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Unified error type for the API client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// The configured base URL is not an absolute http(s) URL.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The underlying HTTP client could not be built.
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    /// Network unreachable, connection reset or timeout exceeded.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The remote answered with a non-2xx status.
    #[error("http {status}: {body}")]
    Status {
        /// Response status.
        status: StatusCode,
        /// JSON error payload, when the remote sent one.
        payload: Option<Value>,
        /// Raw response body.
        body: String,
    },

    /// The response body could not be read.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] reqwest::Error),

    /// JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Build a status error from a response body, keeping the JSON payload if any.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        let payload = serde_json::from_str(&body).ok();
        Self::Status {
            status,
            payload,
            body,
        }
    }

    /// Status code of the failed response, if the remote answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) | Self::Decode(e) => e.status(),
            _ => None,
        }
    }

    /// Remote error payload, if present.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Status { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    /// Whether the request was aborted by the client timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) | Self::Decode(e) if e.is_timeout())
    }

    /// The remote error payload rendered as JSON, or the error message.
    pub fn detail(&self) -> String {
        match self.payload() {
            Some(payload) => payload.to_string(),
            None => self.to_string(),
        }
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ApiError>;
