//! Ledger service
//!
//! Wallet lifecycle and money movement. `add_balance` is a mechanical
//! accumulator with no sufficiency check; policy (positive amounts, no
//! self-transfer, enough funds) lives in `transfer`.

use tracing::{info, instrument};
use warden_core::{DayKey, DomainError, GuildId, LeaderboardEntry, Transfer, UserId};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Rows returned when no limit is requested
pub const DEFAULT_LEADERBOARD_LIMIT: i64 = 10;
/// Upper bound on rows returned by one leaderboard query
pub const MAX_LEADERBOARD_LIMIT: i64 = 100;

/// A granted daily reward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyClaim {
    pub day: DayKey,
    pub reward: i64,
    pub balance: i64,
}

/// Ledger service
pub struct LedgerService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LedgerService<'a> {
    /// Create a new LedgerService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a zero-balance wallet if absent
    #[instrument(skip(self))]
    pub async fn ensure_wallet(&self, guild_id: &GuildId, user_id: &UserId) -> ServiceResult<()> {
        Ok(self.ctx.wallet_repo().ensure(guild_id, user_id).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_balance(&self, guild_id: &GuildId, user_id: &UserId) -> ServiceResult<i64> {
        Ok(self.ctx.wallet_repo().balance(guild_id, user_id).await?)
    }

    /// Apply `balance += delta` and return the new balance; may go negative
    #[instrument(skip(self))]
    pub async fn add_balance(&self, guild_id: &GuildId, user_id: &UserId, delta: i64) -> ServiceResult<i64> {
        let balance = self.ctx.wallet_repo().add_balance(guild_id, user_id, delta).await?;
        info!(guild_id = %guild_id, user_id = %user_id, delta, balance, "Balance adjusted");
        Ok(balance)
    }

    #[instrument(skip(self))]
    pub async fn last_daily_claim(&self, guild_id: &GuildId, user_id: &UserId) -> ServiceResult<Option<DayKey>> {
        Ok(self.ctx.wallet_repo().last_daily_claim(guild_id, user_id).await?)
    }

    #[instrument(skip(self))]
    pub async fn set_last_daily_claim(&self, guild_id: &GuildId, user_id: &UserId, day: DayKey) -> ServiceResult<()> {
        Ok(self.ctx.wallet_repo().set_last_daily_claim(guild_id, user_id, day).await?)
    }

    /// Whether the daily reward was already granted on the current day
    #[instrument(skip(self))]
    pub async fn has_claimed_today(&self, guild_id: &GuildId, user_id: &UserId) -> ServiceResult<bool> {
        let today = self.ctx.clock().today();
        Ok(self.last_daily_claim(guild_id, user_id).await? == Some(today))
    }

    /// Grant the daily reward once per UTC calendar day
    ///
    /// # Errors
    /// `DomainError::DailyAlreadyClaimed` when the reward was granted today.
    #[instrument(skip(self))]
    pub async fn claim_daily(&self, guild_id: &GuildId, user_id: &UserId) -> ServiceResult<DailyClaim> {
        let day = self.ctx.clock().today();
        let reward = self.ctx.policy().daily_reward;

        let balance = self
            .ctx
            .wallet_repo()
            .claim_daily(guild_id, user_id, day, reward)
            .await?
            .ok_or(DomainError::DailyAlreadyClaimed)?;

        info!(guild_id = %guild_id, user_id = %user_id, %day, reward, balance, "Daily reward granted");
        self.ctx
            .audit()
            .record(guild_id, &format!("daily {reward} to <@{user_id}> (bal={balance})"))
            .await;

        Ok(DailyClaim { day, reward, balance })
    }

    /// Move `amount` from one wallet to another in one transaction
    #[instrument(skip(self))]
    pub async fn transfer(
        &self,
        guild_id: &GuildId,
        from: &UserId,
        to: &UserId,
        amount: i64,
    ) -> ServiceResult<Transfer> {
        if amount <= 0 {
            return Err(DomainError::InvalidAmount.into());
        }
        if from == to {
            return Err(DomainError::SelfTransfer.into());
        }

        let transfer = self.ctx.wallet_repo().transfer(guild_id, from, to, amount).await?;

        info!(guild_id = %guild_id, from = %from, to = %to, amount, "Transfer completed");
        self.ctx
            .audit()
            .record(guild_id, &format!("pay {amount} <@{from}> -> <@{to}>"))
            .await;

        Ok(transfer)
    }

    /// Highest balances in the guild; `limit` is clamped to `1..=100`
    #[instrument(skip(self))]
    pub async fn top_balances(&self, guild_id: &GuildId, limit: Option<i64>) -> ServiceResult<Vec<LeaderboardEntry>> {
        let limit = limit
            .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
            .clamp(1, MAX_LEADERBOARD_LIMIT);
        Ok(self.ctx.wallet_repo().top_balances(guild_id, limit).await?)
    }
}
