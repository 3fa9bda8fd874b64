//! SQLite implementation of WalletRepository

use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, instrument};

use warden_core::{
    DayKey, DomainError, GuildId, LeaderboardEntry, RepoResult, Transfer, UserId, Wallet,
    WalletRepository,
};

use crate::models::{LeaderboardRowModel, WalletModel};

use super::error::map_db_error;

const ENSURE: &str = "INSERT OR IGNORE INTO wallets (guild_id, user_id, balance) VALUES (?, ?, 0)";

// SQLite turns an overflowing integer sum into a REAL and stores it, so every
// credit is guarded by the range `balance` must sit in beforehand.
const CREDIT: &str = r"
    UPDATE wallets SET balance = balance + ?
    WHERE guild_id = ? AND user_id = ? AND balance BETWEEN ? AND ?
    RETURNING balance
";

/// Range of balances that can absorb `delta` without leaving i64
fn headroom(delta: i64) -> (i64, i64) {
    if delta >= 0 {
        (i64::MIN, i64::MAX - delta)
    } else {
        (i64::MIN - delta, i64::MAX)
    }
}

/// SQLite implementation of WalletRepository
#[derive(Clone)]
pub struct SqliteWalletRepository {
    pool: SqlitePool,
}

impl SqliteWalletRepository {
    /// Create a new SqliteWalletRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn ensure_in(
        tx: &mut Transaction<'_, Sqlite>,
        guild_id: &GuildId,
        user_id: &UserId,
    ) -> RepoResult<()> {
        sqlx::query(ENSURE)
            .bind(guild_id.as_str())
            .bind(user_id.as_str())
            .execute(&mut **tx)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}

#[async_trait]
impl WalletRepository for SqliteWalletRepository {
    #[instrument(skip(self))]
    async fn ensure(&self, guild_id: &GuildId, user_id: &UserId) -> RepoResult<()> {
        sqlx::query(ENSURE)
            .bind(guild_id.as_str())
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find(&self, guild_id: &GuildId, user_id: &UserId) -> RepoResult<Wallet> {
        self.ensure(guild_id, user_id).await?;

        let model = sqlx::query_as::<_, WalletModel>(
            r"
            SELECT guild_id, user_id, balance, last_daily
            FROM wallets
            WHERE guild_id = ? AND user_id = ?
            ",
        )
        .bind(guild_id.as_str())
        .bind(user_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Wallet::from(model))
    }

    #[instrument(skip(self))]
    async fn balance(&self, guild_id: &GuildId, user_id: &UserId) -> RepoResult<i64> {
        self.ensure(guild_id, user_id).await?;

        sqlx::query_scalar::<_, i64>("SELECT balance FROM wallets WHERE guild_id = ? AND user_id = ?")
            .bind(guild_id.as_str())
            .bind(user_id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn add_balance(&self, guild_id: &GuildId, user_id: &UserId, delta: i64) -> RepoResult<i64> {
        self.ensure(guild_id, user_id).await?;

        let (low, high) = headroom(delta);
        sqlx::query_scalar::<_, i64>(CREDIT)
            .bind(delta)
            .bind(guild_id.as_str())
            .bind(user_id.as_str())
            .bind(low)
            .bind(high)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?
            .ok_or(DomainError::BalanceOverflow)
    }

    #[instrument(skip(self))]
    async fn last_daily_claim(&self, guild_id: &GuildId, user_id: &UserId) -> RepoResult<Option<DayKey>> {
        Ok(self.find(guild_id, user_id).await?.last_daily_claim)
    }

    #[instrument(skip(self))]
    async fn set_last_daily_claim(&self, guild_id: &GuildId, user_id: &UserId, day: DayKey) -> RepoResult<()> {
        self.ensure(guild_id, user_id).await?;

        sqlx::query("UPDATE wallets SET last_daily = ? WHERE guild_id = ? AND user_id = ?")
            .bind(day.to_canonical())
            .bind(guild_id.as_str())
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn claim_daily(
        &self,
        guild_id: &GuildId,
        user_id: &UserId,
        day: DayKey,
        reward: i64,
    ) -> RepoResult<Option<i64>> {
        self.ensure(guild_id, user_id).await?;

        let canonical = day.to_canonical();
        let (low, high) = headroom(reward);
        // Gate and credit in one statement: two racing claims cannot both match
        let granted = sqlx::query_scalar::<_, i64>(
            r"
            UPDATE wallets
            SET balance = balance + ?, last_daily = ?
            WHERE guild_id = ? AND user_id = ?
              AND (last_daily IS NULL OR last_daily <> ?)
              AND balance BETWEEN ? AND ?
            RETURNING balance
            ",
        )
        .bind(reward)
        .bind(&canonical)
        .bind(guild_id.as_str())
        .bind(user_id.as_str())
        .bind(&canonical)
        .bind(low)
        .bind(high)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        if granted.is_some() {
            return Ok(granted);
        }

        // No row matched: either claimed today or the reward does not fit
        if self.last_daily_claim(guild_id, user_id).await? == Some(day) {
            Ok(None)
        } else {
            Err(DomainError::BalanceOverflow)
        }
    }

    #[instrument(skip(self))]
    async fn transfer(
        &self,
        guild_id: &GuildId,
        from: &UserId,
        to: &UserId,
        amount: i64,
    ) -> RepoResult<Transfer> {
        if amount <= 0 {
            return Err(DomainError::InvalidAmount);
        }

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        Self::ensure_in(&mut tx, guild_id, from).await?;
        Self::ensure_in(&mut tx, guild_id, to).await?;

        let debited = sqlx::query_scalar::<_, i64>(
            r"
            UPDATE wallets SET balance = balance - ?
            WHERE guild_id = ? AND user_id = ? AND balance >= ?
            RETURNING balance
            ",
        )
        .bind(amount)
        .bind(guild_id.as_str())
        .bind(from.as_str())
        .bind(amount)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let Some(from_balance) = debited else {
            let balance = sqlx::query_scalar::<_, i64>(
                "SELECT balance FROM wallets WHERE guild_id = ? AND user_id = ?",
            )
            .bind(guild_id.as_str())
            .bind(from.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

            tx.rollback().await.map_err(map_db_error)?;
            debug!(balance, amount, "Transfer rejected");
            return Err(DomainError::InsufficientFunds {
                balance,
                requested: amount,
            });
        };

        let (low, high) = headroom(amount);
        let credited = sqlx::query_scalar::<_, i64>(CREDIT)
            .bind(amount)
            .bind(guild_id.as_str())
            .bind(to.as_str())
            .bind(low)
            .bind(high)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let Some(to_balance) = credited else {
            tx.rollback().await.map_err(map_db_error)?;
            debug!(amount, "Transfer rejected, recipient balance would overflow");
            return Err(DomainError::BalanceOverflow);
        };

        tx.commit().await.map_err(map_db_error)?;

        Ok(Transfer {
            from_balance,
            to_balance,
        })
    }

    #[instrument(skip(self))]
    async fn top_balances(&self, guild_id: &GuildId, limit: i64) -> RepoResult<Vec<LeaderboardEntry>> {
        let rows = sqlx::query_as::<_, LeaderboardRowModel>(
            r"
            SELECT user_id, balance
            FROM wallets
            WHERE guild_id = ?
            ORDER BY balance DESC, user_id ASC
            LIMIT ?
            ",
        )
        .bind(guild_id.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(LeaderboardEntry::from).collect())
    }
}
