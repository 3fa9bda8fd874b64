//! Errors reported by the enforcement client and audit sink

use thiserror::Error;

/// Failure talking to the chat platform
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnforcementError {
    /// The guild no longer exists or the bot was removed from it
    #[error("Guild unreachable: {0}")]
    GuildUnreachable(String),

    /// The platform refused the request (missing permission, role hierarchy)
    #[error("Request rejected by platform: {0}")]
    Rejected(String),

    /// Network or server-side failure; the call may succeed if repeated
    #[error("Transport error: {0}")]
    Transport(String),
}

impl EnforcementError {
    /// Whether retrying the same call later could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
