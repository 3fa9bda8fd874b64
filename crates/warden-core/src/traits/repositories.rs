//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every mutating method maps to a single atomic
//! statement (or one transaction where noted), and no implementation keeps a
//! cached copy of rows between calls.

use async_trait::async_trait;

use crate::entities::{GuildConfig, LeaderboardEntry, Punishment, PunishmentKey, Wallet};
use crate::error::DomainError;
use crate::value_objects::{ChannelId, DayKey, GuildId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Wallet Repository
// ============================================================================

/// Balances after a completed transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub from_balance: i64,
    pub to_balance: i64,
}

#[async_trait]
pub trait WalletRepository: Send + Sync {
    /// Create a zero-balance wallet if absent; no-op otherwise
    async fn ensure(&self, guild_id: &GuildId, user_id: &UserId) -> RepoResult<()>;

    /// Load a wallet, creating it first if needed
    async fn find(&self, guild_id: &GuildId, user_id: &UserId) -> RepoResult<Wallet>;

    /// Current balance, creating the wallet first if needed
    async fn balance(&self, guild_id: &GuildId, user_id: &UserId) -> RepoResult<i64>;

    /// Apply `balance += delta` atomically and return the new balance
    ///
    /// No sufficiency check: the result may go negative.
    async fn add_balance(&self, guild_id: &GuildId, user_id: &UserId, delta: i64) -> RepoResult<i64>;

    /// Day on which the daily reward was last granted
    async fn last_daily_claim(&self, guild_id: &GuildId, user_id: &UserId) -> RepoResult<Option<DayKey>>;

    /// Record the day on which the daily reward was granted
    async fn set_last_daily_claim(&self, guild_id: &GuildId, user_id: &UserId, day: DayKey) -> RepoResult<()>;

    /// Credit `reward` and stamp `day` in one statement, unless `day` is already stamped
    ///
    /// Returns the new balance, or `None` when the reward was already granted on `day`.
    async fn claim_daily(
        &self,
        guild_id: &GuildId,
        user_id: &UserId,
        day: DayKey,
        reward: i64,
    ) -> RepoResult<Option<i64>>;

    /// Move `amount` between two wallets of the same guild in one transaction
    ///
    /// Fails with `DomainError::InsufficientFunds` (and changes nothing) if the
    /// source balance is below `amount`.
    async fn transfer(
        &self,
        guild_id: &GuildId,
        from: &UserId,
        to: &UserId,
        amount: i64,
    ) -> RepoResult<Transfer>;

    /// Highest balances in a guild, descending
    async fn top_balances(&self, guild_id: &GuildId, limit: i64) -> RepoResult<Vec<LeaderboardEntry>>;
}

// ============================================================================
// Punishment Repository
// ============================================================================

#[async_trait]
pub trait PunishmentRepository: Send + Sync {
    /// Insert, or overwrite `until_ms`/`reason`/`created_by` and reset attempts
    async fn upsert(&self, punishment: &Punishment) -> RepoResult<()>;

    /// Delete the row; returns whether one existed
    async fn remove(&self, key: &PunishmentKey) -> RepoResult<bool>;

    /// Load a single row
    async fn find(&self, key: &PunishmentKey) -> RepoResult<Option<Punishment>>;

    /// Every row with `until_ms <= now_ms`, across all guilds
    async fn due(&self, now_ms: i64) -> RepoResult<Vec<Punishment>>;

    /// Delete the row only if it still carries `until_ms`
    ///
    /// Returns `false` when the row is gone or was re-issued since it was read.
    async fn resolve(&self, key: &PunishmentKey, until_ms: i64) -> RepoResult<bool>;

    /// Increment the failed-attempt counter if the row still carries `until_ms`
    ///
    /// Returns the new count, or `None` when the row is gone or was re-issued.
    async fn record_failed_attempt(&self, key: &PunishmentKey, until_ms: i64) -> RepoResult<Option<u32>>;
}

// ============================================================================
// Guild Config Repository
// ============================================================================

#[async_trait]
pub trait GuildConfigRepository: Send + Sync {
    /// Upsert the audit-log destination; `None` clears it
    async fn set_log_channel(&self, guild_id: &GuildId, channel_id: Option<&ChannelId>) -> RepoResult<()>;

    /// The guild's configuration row, if one was ever written
    async fn find(&self, guild_id: &GuildId) -> RepoResult<Option<GuildConfig>>;

    /// Audit-log destination, if configured
    async fn log_channel(&self, guild_id: &GuildId) -> RepoResult<Option<ChannelId>>;
}
