//! Entity to model mappers
//!
//! Conversions between domain entities (warden-core) and database models.
//! Stored identifiers are trusted as-is; they were validated on the way in.

mod guild_config;
mod punishment;
mod wallet;

pub use punishment::PunishmentInsert;
