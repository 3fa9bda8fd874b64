//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs

pub mod requests;
pub mod responses;

pub use requests::{
    AdjustBalanceRequest, IssueBanRequest, LeaderboardQuery, RevokeBanQuery, SetDangerousRequest,
    SetLogChannelRequest, TransferRequest,
};

pub use responses::{
    BalanceResponse, BanResponse, DailyClaimResponse, HealthChecks, HealthResponse,
    LeaderboardEntryResponse, LeaderboardResponse, LogChannelResponse, PunishmentResponse,
    ReadinessResponse, RevokeBanResponse, SafetySwitchResponse, TransferResponse,
};
