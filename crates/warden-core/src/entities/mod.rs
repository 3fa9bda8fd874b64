//! Domain entities - core business objects

mod guild_config;
mod punishment;
mod wallet;

pub use guild_config::GuildConfig;
pub use punishment::{Punishment, PunishmentKey, PunishmentKind};
pub use wallet::{LeaderboardEntry, Wallet};
