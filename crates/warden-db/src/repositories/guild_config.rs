//! SQLite implementation of GuildConfigRepository

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::instrument;

use warden_core::{ChannelId, GuildConfig, GuildConfigRepository, GuildId, RepoResult};

use crate::models::GuildConfigModel;

use super::error::map_db_error;

/// SQLite implementation of GuildConfigRepository
#[derive(Clone)]
pub struct SqliteGuildConfigRepository {
    pool: SqlitePool,
}

impl SqliteGuildConfigRepository {
    /// Create a new SqliteGuildConfigRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GuildConfigRepository for SqliteGuildConfigRepository {
    #[instrument(skip(self))]
    async fn set_log_channel(&self, guild_id: &GuildId, channel_id: Option<&ChannelId>) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO config (guild_id, log_channel_id) VALUES (?, ?)
            ON CONFLICT (guild_id) DO UPDATE SET log_channel_id = excluded.log_channel_id
            ",
        )
        .bind(guild_id.as_str())
        .bind(channel_id.map(ChannelId::as_str))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find(&self, guild_id: &GuildId) -> RepoResult<Option<GuildConfig>> {
        let model = sqlx::query_as::<_, GuildConfigModel>(
            "SELECT guild_id, log_channel_id FROM config WHERE guild_id = ?",
        )
        .bind(guild_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(model.map(GuildConfig::from))
    }

    #[instrument(skip(self))]
    async fn log_channel(&self, guild_id: &GuildId) -> RepoResult<Option<ChannelId>> {
        Ok(self
            .find(guild_id)
            .await?
            .and_then(|config| config.log_channel_id))
    }
}
