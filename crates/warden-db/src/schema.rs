//! Schema creation and upgrade
//!
//! Table and column names match databases written by earlier deployments, so
//! an existing `data.sqlite` opens without conversion. Columns added since
//! then are appended in place.

use sqlx::SqlitePool;
use tracing::{info, instrument};

const CREATE_TABLES: [&str; 3] = [
    r"
    CREATE TABLE IF NOT EXISTS wallets (
      guild_id   TEXT NOT NULL,
      user_id    TEXT NOT NULL,
      balance    INTEGER NOT NULL DEFAULT 0,
      last_daily TEXT,
      PRIMARY KEY (guild_id, user_id)
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS config (
      guild_id       TEXT PRIMARY KEY,
      log_channel_id TEXT
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS punishments (
      guild_id   TEXT NOT NULL,
      user_id    TEXT NOT NULL,
      type       TEXT NOT NULL,
      until_ms   INTEGER NOT NULL,
      reason     TEXT,
      created_by TEXT,
      attempts   INTEGER NOT NULL DEFAULT 0,
      PRIMARY KEY (guild_id, user_id, type)
    )
    ",
];

const CREATE_INDEXES: [&str; 2] = [
    "CREATE INDEX IF NOT EXISTS idx_punishments_until_ms ON punishments (until_ms)",
    "CREATE INDEX IF NOT EXISTS idx_wallets_guild_balance ON wallets (guild_id, balance DESC)",
];

/// Create missing tables and bring older databases up to date
///
/// Idempotent; safe to run on every start.
#[instrument(skip(pool))]
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in CREATE_TABLES {
        sqlx::query(statement).execute(pool).await?;
    }

    if !has_column(pool, "punishments", "attempts").await? {
        info!("Adding punishments.attempts column");
        sqlx::query("ALTER TABLE punishments ADD COLUMN attempts INTEGER NOT NULL DEFAULT 0")
            .execute(pool)
            .await?;
    }

    for statement in CREATE_INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}

async fn has_column(pool: &SqlitePool, table: &str, column: &str) -> Result<bool, sqlx::Error> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM pragma_table_info(?) WHERE name = ?")
            .bind(table)
            .bind(column)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::create_memory_pool;

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let pool = create_memory_pool().await.unwrap();
        migrate(&pool).await.unwrap();
        migrate(&pool).await.unwrap();

        assert!(has_column(&pool, "wallets", "last_daily").await.unwrap());
        assert!(has_column(&pool, "punishments", "attempts").await.unwrap());
    }

    #[tokio::test]
    async fn test_upgrades_legacy_punishments_table() {
        let pool = create_memory_pool().await.unwrap();
        sqlx::query(
            r"
            CREATE TABLE punishments (
              guild_id TEXT NOT NULL,
              user_id TEXT NOT NULL,
              type TEXT NOT NULL,
              until_ms INTEGER NOT NULL,
              reason TEXT,
              created_by TEXT,
              PRIMARY KEY (guild_id, user_id, type)
            )
            ",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO punishments (guild_id, user_id, type, until_ms) VALUES ('g', 'u', 'ban', 5)")
            .execute(&pool)
            .await
            .unwrap();

        assert!(!has_column(&pool, "punishments", "attempts").await.unwrap());
        migrate(&pool).await.unwrap();
        assert!(has_column(&pool, "punishments", "attempts").await.unwrap());

        let attempts: i64 = sqlx::query_scalar("SELECT attempts FROM punishments")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(attempts, 0);
    }
}
