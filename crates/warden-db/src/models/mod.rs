//! Database models - SQLx-compatible structs for SQLite tables

mod guild_config;
mod punishment;
mod wallet;

pub use guild_config::GuildConfigModel;
pub use punishment::PunishmentModel;
pub use wallet::{LeaderboardRowModel, WalletModel};
