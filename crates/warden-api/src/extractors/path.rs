//! Path parameter extractors
//!
//! Raw path segments are deserialized as strings and parsed into typed
//! identifiers on access, so a malformed id yields a 400 with the field name.

use serde::Deserialize;
use warden_core::{GuildId, PunishmentKey, PunishmentKind, UserId};

use crate::response::ApiError;

fn guild_id(raw: &str) -> Result<GuildId, ApiError> {
    GuildId::parse(raw).map_err(|e| ApiError::invalid_path(format!("guild_id: {e}")))
}

fn user_id(raw: &str) -> Result<UserId, ApiError> {
    UserId::parse(raw).map_err(|e| ApiError::invalid_path(format!("user_id: {e}")))
}

/// `/guilds/:guild_id/...`
#[derive(Debug, Deserialize)]
pub struct GuildPath {
    pub guild_id: String,
}

impl GuildPath {
    pub fn guild_id(&self) -> Result<GuildId, ApiError> {
        guild_id(&self.guild_id)
    }
}

/// `/guilds/:guild_id/{wallets,bans}/:user_id`
#[derive(Debug, Deserialize)]
pub struct WalletPath {
    pub guild_id: String,
    pub user_id: String,
}

impl WalletPath {
    /// Parse both identifiers
    pub fn ids(&self) -> Result<(GuildId, UserId), ApiError> {
        Ok((guild_id(&self.guild_id)?, user_id(&self.user_id)?))
    }
}

/// `/guilds/:guild_id/punishments/:user_id/:kind`
#[derive(Debug, Deserialize)]
pub struct PunishmentPath {
    pub guild_id: String,
    pub user_id: String,
    pub kind: String,
}

impl PunishmentPath {
    pub fn key(&self) -> Result<PunishmentKey, ApiError> {
        let kind = self.kind.trim();
        if kind.is_empty() {
            return Err(ApiError::invalid_path("kind must not be empty"));
        }
        Ok(PunishmentKey::new(
            guild_id(&self.guild_id)?,
            user_id(&self.user_id)?,
            PunishmentKind::from(kind),
        ))
    }
}
