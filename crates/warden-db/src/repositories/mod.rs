//! Repository implementations
//!
//! SQLite implementations of the repository traits defined in warden-core.
//! Each repository handles database operations for a specific domain entity.

mod error;
mod guild_config;
mod punishment;
mod wallet;

pub use guild_config::SqliteGuildConfigRepository;
pub use punishment::SqlitePunishmentRepository;
pub use wallet::SqliteWalletRepository;
