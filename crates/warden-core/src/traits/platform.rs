//! Platform collaborators
//!
//! The chat platform is reached only through these traits so that the
//! reconciler and services can be driven by fakes in tests.

use async_trait::async_trait;

use crate::error::EnforcementError;
use crate::value_objects::{ChannelId, GuildId, UserId};

/// Result type for platform calls
pub type EnforcementResult<T> = Result<T, EnforcementError>;

/// Applies and reverses sanctions on the remote platform
#[async_trait]
pub trait EnforcementClient: Send + Sync {
    /// Confirm the guild is still reachable
    ///
    /// Returns `EnforcementError::GuildUnreachable` when it is not.
    async fn resolve_guild(&self, guild_id: &GuildId) -> EnforcementResult<()>;

    /// Whether the user is currently banned in the guild
    async fn is_sanctioned(&self, guild_id: &GuildId, user_id: &UserId) -> EnforcementResult<bool>;

    /// Ban the user
    async fn apply_sanction(&self, guild_id: &GuildId, user_id: &UserId, reason: &str) -> EnforcementResult<()>;

    /// Lift the user's ban
    async fn lift_sanction(&self, guild_id: &GuildId, user_id: &UserId, reason: &str) -> EnforcementResult<()>;
}

/// Posts audit entries to a guild channel
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn post(&self, guild_id: &GuildId, channel_id: &ChannelId, text: &str) -> EnforcementResult<()>;
}
