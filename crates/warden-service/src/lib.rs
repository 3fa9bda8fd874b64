//! # warden-service
//!
//! Application layer: the ledger, the punishment registry, guild settings,
//! the audit logger and the reconciliation loop that lifts expired sanctions.

pub mod dto;
pub mod services;
pub mod testing;

pub use services::{
    AuditLogger, DailyClaim, GuildConfigService, IssuedBan, LedgerService, PunishmentService,
    Reconciler, ReconcilerHandle, ReconcilerSettings, RevokeOutcome, SafetySwitch, ServiceContext,
    ServiceContextBuilder, ServiceError, ServicePolicy, ServiceResult, SweepReport,
};

pub use dto::{
    AdjustBalanceRequest, BalanceResponse, BanResponse, DailyClaimResponse, HealthChecks,
    HealthResponse, IssueBanRequest, LeaderboardEntryResponse, LeaderboardQuery,
    LeaderboardResponse, LogChannelResponse, PunishmentResponse, ReadinessResponse,
    RevokeBanQuery, RevokeBanResponse, SafetySwitchResponse, SetDangerousRequest,
    SetLogChannelRequest, TransferRequest, TransferResponse,
};
