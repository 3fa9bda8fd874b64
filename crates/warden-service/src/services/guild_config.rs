//! Guild configuration service
//!
//! Audit-log destination (persisted) and the dangerous-commands switch
//! (process memory).

use tracing::{info, instrument};
use warden_core::{ChannelId, GuildId, UserId};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct GuildConfigService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GuildConfigService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Set or clear the audit-log channel
    #[instrument(skip(self))]
    pub async fn set_log_channel(&self, guild_id: &GuildId, channel_id: Option<&ChannelId>) -> ServiceResult<()> {
        self.ctx.config_repo().set_log_channel(guild_id, channel_id).await?;
        info!(guild_id = %guild_id, channel_id = ?channel_id.map(ChannelId::as_str), "Log channel updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_log_channel(&self, guild_id: &GuildId) -> ServiceResult<Option<ChannelId>> {
        Ok(self.ctx.config_repo().log_channel(guild_id).await?)
    }

    pub fn is_dangerous_enabled(&self, guild_id: &GuildId) -> bool {
        self.ctx.safety().is_enabled(guild_id)
    }

    /// Flip the dangerous-commands switch for one guild
    #[instrument(skip(self))]
    pub async fn set_dangerous_enabled(
        &self,
        guild_id: &GuildId,
        enabled: bool,
        actor_id: Option<&UserId>,
    ) -> ServiceResult<bool> {
        let previous = self.ctx.safety().set(guild_id, enabled);
        info!(guild_id = %guild_id, enabled, previous, "Dangerous commands switch updated");

        let mode = if enabled { "on" } else { "off" };
        let text = match actor_id {
            Some(actor) => format!("danger={mode} by <@{actor}>"),
            None => format!("danger={mode}"),
        };
        self.ctx.audit().record(guild_id, &text).await;

        Ok(previous)
    }
}
