//! Punishment database model

use sqlx::FromRow;

/// Database model for punishments table
#[derive(Debug, Clone, FromRow)]
pub struct PunishmentModel {
    pub guild_id: String,
    pub user_id: String,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub until_ms: i64,
    pub reason: Option<String>,
    pub created_by: Option<String>,
    pub attempts: i64,
}
