//! # warden-discord
//!
//! Discord bot API adapter: applies and lifts guild bans and posts audit-log
//! messages. Implements [`warden_core::EnforcementClient`] and
//! [`warden_core::AuditSink`].

pub mod client;
pub mod error;

pub use client::{DiscordClient, DiscordClientConfig};
pub use error::DiscordError;
