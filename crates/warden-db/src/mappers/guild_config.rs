//! GuildConfig entity <-> model mapper

use warden_core::{ChannelId, GuildConfig, GuildId};

use crate::models::GuildConfigModel;

impl From<GuildConfigModel> for GuildConfig {
    fn from(model: GuildConfigModel) -> Self {
        GuildConfig {
            guild_id: GuildId::from_stored(model.guild_id),
            // Older rows may hold an empty string where no channel was set
            log_channel_id: model
                .log_channel_id
                .filter(|raw| !raw.is_empty())
                .map(ChannelId::from_stored),
        }
    }
}
