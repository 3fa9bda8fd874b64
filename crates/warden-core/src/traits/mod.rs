//! Ports - repository traits and platform collaborators

mod platform;
mod repositories;

pub use platform::{AuditSink, EnforcementClient, EnforcementResult};
pub use repositories::{
    GuildConfigRepository, PunishmentRepository, RepoResult, Transfer, WalletRepository,
};
