//! Business logic services
//!
//! Services borrow a `ServiceContext` for the duration of one operation; the
//! reconciler owns clones of the collaborators it needs and runs on its own task.

pub mod audit;
pub mod context;
pub mod error;
pub mod guild_config;
pub mod ledger;
pub mod punishment;
pub mod reconciler;
pub mod safety;

pub use audit::AuditLogger;
pub use context::{ServiceContext, ServiceContextBuilder, ServicePolicy};
pub use error::{ServiceError, ServiceResult};
pub use guild_config::GuildConfigService;
pub use ledger::{DailyClaim, LedgerService};
pub use punishment::{IssuedBan, PunishmentService, RevokeOutcome};
pub use reconciler::{Reconciler, ReconcilerHandle, ReconcilerSettings, SweepReport};
pub use safety::SafetySwitch;
