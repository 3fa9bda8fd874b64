//! Per-guild settings

use crate::value_objects::{ChannelId, GuildId};

/// Guild configuration row (at most one per guild)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildConfig {
    pub guild_id: GuildId,
    pub log_channel_id: Option<ChannelId>,
}
