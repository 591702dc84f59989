use crate::domain::validation::ValidationError;
use thiserror::Error;

/// Errors surfaced by the backend client and the services built on it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, DNS or timeout failure below HTTP.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// 401 that survived the refresh-and-replay attempt.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Any other non-success status; `message` is the backend's own text when present.
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },
    #[error("failed to encode request body for {endpoint}: {source}")]
    Encode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    /// Input rejected before dispatch.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("not logged in; run 'quiz-admin auth login' first")]
    NotLoggedIn,
    #[error("token storage failed: {0}")]
    TokenStorage(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Build a status error from a response body, preferring the backend's `message` field
    pub fn from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    "An error occurred".to_string()
                } else {
                    body.trim().to_string()
                }
            });

        if status == 401 {
            ApiError::Unauthorized(message)
        } else {
            ApiError::Status { status, message }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
