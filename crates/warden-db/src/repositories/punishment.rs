//! SQLite implementation of PunishmentRepository

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::instrument;

use warden_core::{Punishment, PunishmentKey, PunishmentRepository, RepoResult};

use crate::mappers::PunishmentInsert;
use crate::models::PunishmentModel;

use super::error::map_db_error;

/// SQLite implementation of PunishmentRepository
#[derive(Clone)]
pub struct SqlitePunishmentRepository {
    pool: SqlitePool,
}

impl SqlitePunishmentRepository {
    /// Create a new SqlitePunishmentRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PunishmentRepository for SqlitePunishmentRepository {
    #[instrument(skip(self, punishment), fields(key = %punishment.key(), until_ms = punishment.until_ms))]
    async fn upsert(&self, punishment: &Punishment) -> RepoResult<()> {
        let row = PunishmentInsert::new(punishment);

        sqlx::query(
            r"
            INSERT INTO punishments (guild_id, user_id, type, until_ms, reason, created_by, attempts)
            VALUES (?, ?, ?, ?, ?, ?, 0)
            ON CONFLICT (guild_id, user_id, type) DO UPDATE SET
              until_ms = excluded.until_ms,
              reason = excluded.reason,
              created_by = excluded.created_by,
              attempts = 0
            ",
        )
        .bind(row.guild_id)
        .bind(row.user_id)
        .bind(row.kind)
        .bind(row.until_ms)
        .bind(row.reason)
        .bind(row.created_by)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, key), fields(key = %key))]
    async fn remove(&self, key: &PunishmentKey) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM punishments WHERE guild_id = ? AND user_id = ? AND type = ?")
            .bind(key.guild_id.as_str())
            .bind(key.user_id.as_str())
            .bind(key.kind.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, key), fields(key = %key))]
    async fn find(&self, key: &PunishmentKey) -> RepoResult<Option<Punishment>> {
        let model = sqlx::query_as::<_, PunishmentModel>(
            r"
            SELECT guild_id, user_id, type, until_ms, reason, created_by, attempts
            FROM punishments
            WHERE guild_id = ? AND user_id = ? AND type = ?
            ",
        )
        .bind(key.guild_id.as_str())
        .bind(key.user_id.as_str())
        .bind(key.kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(model.map(Punishment::from))
    }

    #[instrument(skip(self))]
    async fn due(&self, now_ms: i64) -> RepoResult<Vec<Punishment>> {
        let rows = sqlx::query_as::<_, PunishmentModel>(
            r"
            SELECT guild_id, user_id, type, until_ms, reason, created_by, attempts
            FROM punishments
            WHERE until_ms <= ?
            ORDER BY until_ms, guild_id, user_id, type
            ",
        )
        .bind(now_ms)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Punishment::from).collect())
    }

    #[instrument(skip(self, key), fields(key = %key))]
    async fn resolve(&self, key: &PunishmentKey, until_ms: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM punishments
            WHERE guild_id = ? AND user_id = ? AND type = ? AND until_ms = ?
            ",
        )
        .bind(key.guild_id.as_str())
        .bind(key.user_id.as_str())
        .bind(key.kind.as_str())
        .bind(until_ms)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, key), fields(key = %key))]
    async fn record_failed_attempt(&self, key: &PunishmentKey, until_ms: i64) -> RepoResult<Option<u32>> {
        let attempts = sqlx::query_scalar::<_, i64>(
            r"
            UPDATE punishments SET attempts = attempts + 1
            WHERE guild_id = ? AND user_id = ? AND type = ? AND until_ms = ?
            RETURNING attempts
            ",
        )
        .bind(key.guild_id.as_str())
        .bind(key.user_id.as_str())
        .bind(key.kind.as_str())
        .bind(until_ms)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(attempts.map(|n| u32::try_from(n).unwrap_or(u32::MAX)))
    }
}
