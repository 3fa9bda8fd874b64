//! Audit log relay
//!
//! Posts short human-readable entries to the guild's configured log channel.
//! Nothing is posted when no channel is configured, and failures never reach
//! the caller: the action being audited has already happened.

use std::sync::Arc;

use tracing::{debug, warn};
use warden_core::{AuditSink, GuildConfigRepository, GuildId};

#[derive(Clone)]
pub struct AuditLogger {
    configs: Arc<dyn GuildConfigRepository>,
    sink: Arc<dyn AuditSink>,
}

impl AuditLogger {
    pub fn new(configs: Arc<dyn GuildConfigRepository>, sink: Arc<dyn AuditSink>) -> Self {
        Self { configs, sink }
    }

    pub async fn record(&self, guild_id: &GuildId, text: &str) {
        let channel_id = match self.configs.log_channel(guild_id).await {
            Ok(Some(channel_id)) => channel_id,
            Ok(None) => {
                debug!(guild_id = %guild_id, "No log channel configured, audit entry dropped");
                return;
            }
            Err(e) => {
                warn!(guild_id = %guild_id, error = %e, "Failed to read log channel");
                return;
            }
        };

        if let Err(e) = self.sink.post(guild_id, &channel_id, text).await {
            warn!(guild_id = %guild_id, channel_id = %channel_id, error = %e, "Failed to post audit entry");
        }
    }
}

impl std::fmt::Debug for AuditLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditLogger").finish_non_exhaustive()
    }
}
