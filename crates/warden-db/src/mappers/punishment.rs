//! Punishment entity <-> model mapper

use warden_core::{GuildId, Punishment, PunishmentKind, UserId};

use crate::models::PunishmentModel;

impl From<PunishmentModel> for Punishment {
    fn from(model: PunishmentModel) -> Self {
        Punishment {
            guild_id: GuildId::from_stored(model.guild_id),
            user_id: UserId::from_stored(model.user_id),
            kind: PunishmentKind::from(model.kind),
            until_ms: model.until_ms,
            reason: model.reason,
            created_by: model.created_by.map(UserId::from_stored),
            attempts: u32::try_from(model.attempts).unwrap_or(u32::MAX),
        }
    }
}

/// Borrowed column values for an insert or upsert
pub struct PunishmentInsert<'a> {
    pub guild_id: &'a str,
    pub user_id: &'a str,
    pub kind: &'a str,
    pub until_ms: i64,
    pub reason: Option<&'a str>,
    pub created_by: Option<&'a str>,
}

impl<'a> PunishmentInsert<'a> {
    pub fn new(punishment: &'a Punishment) -> Self {
        Self {
            guild_id: punishment.guild_id.as_str(),
            user_id: punishment.user_id.as_str(),
            kind: punishment.kind.as_str(),
            until_ms: punishment.until_ms,
            reason: punishment.reason.as_deref(),
            created_by: punishment.created_by.as_ref().map(UserId::as_str),
        }
    }
}
