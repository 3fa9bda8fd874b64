//! Punishment service
//!
//! CRUD over time-bounded sanctions plus the two moderator actions that
//! touch the platform: issuing a (possibly temporary) ban and revoking one.

use tracing::{info, instrument, warn};
use warden_core::{
    is_zero_duration, parse_duration_ms, DomainError, GuildId, Punishment, PunishmentKey, PunishmentKind, UserId,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const DEFAULT_BAN_REASON: &str = "No reason given";
const MANUAL_UNBAN_REASON: &str = "manual unban";

/// Result of issuing a ban
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedBan {
    pub reason: String,
    /// Expiry of a temporary ban; `None` for a permanent one
    pub until_ms: Option<i64>,
}

/// Result of revoking a ban
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevokeOutcome {
    /// The platform accepted the unban
    pub lifted: bool,
    /// A stored temporary-ban record existed and was deleted
    pub record_removed: bool,
}

/// Punishment service
pub struct PunishmentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PunishmentService<'a> {
    /// Create a new PunishmentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // =========================================================================
    // Registry
    // =========================================================================

    /// Record a sanction, replacing any existing one of the same kind
    #[instrument(skip(self, reason))]
    pub async fn add(
        &self,
        guild_id: &GuildId,
        user_id: &UserId,
        kind: PunishmentKind,
        until_ms: i64,
        reason: Option<&str>,
        created_by: Option<&UserId>,
    ) -> ServiceResult<Punishment> {
        let key = PunishmentKey::new(guild_id.clone(), user_id.clone(), kind);
        let mut punishment = Punishment::new(key, until_ms);
        if let Some(reason) = reason {
            punishment = punishment.with_reason(reason);
        }
        if let Some(actor) = created_by {
            punishment = punishment.with_created_by(actor.clone());
        }

        self.ctx.punishment_repo().upsert(&punishment).await?;
        info!(key = %punishment.key(), until_ms, "Punishment recorded");
        Ok(punishment)
    }

    /// Delete a sanction record; absent records are not an error
    #[instrument(skip(self, key), fields(key = %key))]
    pub async fn remove(&self, key: &PunishmentKey) -> ServiceResult<bool> {
        Ok(self.ctx.punishment_repo().remove(key).await?)
    }

    #[instrument(skip(self, key), fields(key = %key))]
    pub async fn find(&self, key: &PunishmentKey) -> ServiceResult<Punishment> {
        self.ctx
            .punishment_repo()
            .find(key)
            .await?
            .ok_or_else(|| DomainError::PunishmentNotFound(key.to_string()).into())
    }

    /// Every record due at `now_ms`, across all guilds
    #[instrument(skip(self))]
    pub async fn due(&self, now_ms: i64) -> ServiceResult<Vec<Punishment>> {
        Ok(self.ctx.punishment_repo().due(now_ms).await?)
    }

    // =========================================================================
    // Moderator actions
    // =========================================================================

    /// Parse a ban duration token and check it against the configured ceiling
    ///
    /// A zero-length token (`0`, `0d`) means no expiry and yields `None`.
    pub fn parse_duration(&self, token: &str) -> ServiceResult<Option<i64>> {
        if is_zero_duration(token) {
            return Ok(None);
        }
        let duration_ms = parse_duration_ms(token)
            .ok_or_else(|| DomainError::InvalidDuration(token.to_string()))?;

        let max_ms = self.ctx.policy().max_sanction_duration_ms;
        if duration_ms > max_ms {
            return Err(DomainError::DurationTooLong { max_ms }.into());
        }
        Ok(Some(duration_ms))
    }

    fn require_dangerous_enabled(&self, guild_id: &GuildId) -> ServiceResult<()> {
        if self.ctx.safety().is_enabled(guild_id) {
            Ok(())
        } else {
            Err(DomainError::DangerousCommandsDisabled.into())
        }
    }

    /// Ban a user, recording an expiry when a duration is given
    ///
    /// Nothing is stored if the platform refuses the ban.
    #[instrument(skip(self, reason))]
    pub async fn issue_ban(
        &self,
        guild_id: &GuildId,
        target_id: &UserId,
        actor_id: &UserId,
        duration: Option<&str>,
        reason: Option<&str>,
    ) -> ServiceResult<IssuedBan> {
        self.require_dangerous_enabled(guild_id)?;

        let duration_ms = match duration {
            Some(token) => self.parse_duration(token)?,
            None => None,
        };
        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_BAN_REASON)
            .to_string();

        self.ctx
            .enforcement()
            .apply_sanction(guild_id, target_id, &reason)
            .await
            .map_err(ServiceError::Platform)?;

        let until_ms = match duration_ms {
            Some(duration_ms) => {
                let until_ms = self.ctx.clock().now_ms().saturating_add(duration_ms);
                self.add(
                    guild_id,
                    target_id,
                    PunishmentKind::Ban,
                    until_ms,
                    Some(&reason),
                    Some(actor_id),
                )
                .await?;
                Some(until_ms)
            }
            None => None,
        };

        info!(guild_id = %guild_id, user_id = %target_id, actor_id = %actor_id, ?until_ms, "User banned");

        let span = match duration {
            Some(token) if until_ms.is_some() => format!("dur={}", token.trim()),
            _ => "permanent".to_string(),
        };
        self.ctx
            .audit()
            .record(
                guild_id,
                &format!("BAN <@{target_id}> {span} reason: {reason} by <@{actor_id}>"),
            )
            .await;

        Ok(IssuedBan { reason, until_ms })
    }

    /// Lift a ban and forget any stored expiry
    ///
    /// The stored record is removed even when the platform call fails: the
    /// user may simply not be banned any more.
    #[instrument(skip(self))]
    pub async fn revoke_ban(
        &self,
        guild_id: &GuildId,
        target_id: &UserId,
        actor_id: &UserId,
    ) -> ServiceResult<RevokeOutcome> {
        self.require_dangerous_enabled(guild_id)?;

        let lifted = match self
            .ctx
            .enforcement()
            .lift_sanction(guild_id, target_id, MANUAL_UNBAN_REASON)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!(guild_id = %guild_id, user_id = %target_id, error = %e, "Manual unban failed");
                false
            }
        };

        let key = PunishmentKey::ban(guild_id.clone(), target_id.clone());
        let record_removed = self.remove(&key).await?;

        info!(guild_id = %guild_id, user_id = %target_id, actor_id = %actor_id, lifted, record_removed, "Ban revoked");

        let text = if lifted {
            format!("UNBAN manual <@{target_id}> by <@{actor_id}>")
        } else {
            format!("UNBAN manual <@{target_id}> by <@{actor_id}> failed (not banned or not permitted)")
        };
        self.ctx.audit().record(guild_id, &text).await;

        Ok(RevokeOutcome {
            lifted,
            record_removed,
        })
    }
}
