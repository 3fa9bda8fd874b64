//! Error mapping for Discord REST responses

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use warden_core::EnforcementError;

/// Failure constructing the client
#[derive(Debug, Error)]
pub enum DiscordError {
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Bot token contains characters not allowed in a header")]
    InvalidToken,

    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Error payload returned by the Discord API
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: u64,
}

impl ApiErrorBody {
    /// Best-effort decode; an unreadable body yields an empty message
    pub(crate) fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    fn describe(&self, status: StatusCode) -> String {
        if self.message.is_empty() {
            format!("HTTP {status}")
        } else {
            format!("HTTP {status}: {} ({})", self.message, self.code)
        }
    }
}

/// Map a non-success status to the enforcement error taxonomy
///
/// Rate limiting and server-side failures are transient; any other client
/// error is a refusal.
pub(crate) fn classify(status: StatusCode, body: &ApiErrorBody) -> EnforcementError {
    let detail = body.describe(status);
    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        EnforcementError::Transport(detail)
    } else {
        EnforcementError::Rejected(detail)
    }
}

pub(crate) fn transport(operation: &str, err: &reqwest::Error) -> EnforcementError {
    if err.is_timeout() {
        EnforcementError::Transport(format!("{operation}: request timed out"))
    } else {
        EnforcementError::Transport(format!("{operation}: {err}"))
    }
}
