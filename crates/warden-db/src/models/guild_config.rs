//! Guild config database model

use sqlx::FromRow;

/// Database model for config table
#[derive(Debug, Clone, FromRow)]
pub struct GuildConfigModel {
    pub guild_id: String,
    pub log_channel_id: Option<String>,
}
