//! # warden-core
//!
//! Domain layer containing entities, value objects, repository traits, and the
//! platform ports (enforcement client, audit sink, clock).
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod clock;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use clock::{Clock, ManualClock, SystemClock};
pub use entities::{GuildConfig, LeaderboardEntry, Punishment, PunishmentKey, PunishmentKind, Wallet};
pub use error::{DomainError, EnforcementError};
pub use traits::{
    AuditSink, EnforcementClient, EnforcementResult, GuildConfigRepository, PunishmentRepository,
    RepoResult, Transfer, WalletRepository,
};
pub use value_objects::{
    is_zero_duration, parse_duration_ms, ChannelId, DayKey, GuildId, IdParseError, UserId,
    MAX_SANCTION_DURATION_MS,
};
