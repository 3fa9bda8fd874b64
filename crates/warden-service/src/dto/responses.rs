//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use serde::Serialize;
use warden_core::{ChannelId, GuildId, LeaderboardEntry, Punishment, Transfer, UserId};

use crate::services::{DailyClaim, IssuedBan, RevokeOutcome};

// ============================================================================
// Wallet Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct BalanceResponse {
    pub guild_id: String,
    pub user_id: String,
    pub balance: i64,
}

impl BalanceResponse {
    pub fn new(guild_id: &GuildId, user_id: &UserId, balance: i64) -> Self {
        Self {
            guild_id: guild_id.to_string(),
            user_id: user_id.to_string(),
            balance,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyClaimResponse {
    pub user_id: String,
    /// UTC day the reward was granted for, `YYYY-MM-DD`
    pub day: String,
    pub reward: i64,
    pub balance: i64,
}

impl DailyClaimResponse {
    pub fn new(user_id: &UserId, claim: DailyClaim) -> Self {
        Self {
            user_id: user_id.to_string(),
            day: claim.day.to_canonical(),
            reward: claim.reward,
            balance: claim.balance,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferResponse {
    pub from_user_id: String,
    pub to_user_id: String,
    pub amount: i64,
    pub from_balance: i64,
    pub to_balance: i64,
}

impl TransferResponse {
    pub fn new(from: &UserId, to: &UserId, amount: i64, transfer: Transfer) -> Self {
        Self {
            from_user_id: from.to_string(),
            to_user_id: to.to_string(),
            amount,
            from_balance: transfer.from_balance,
            to_balance: transfer.to_balance,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntryResponse {
    /// 1-based position
    pub rank: usize,
    pub user_id: String,
    pub balance: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardResponse {
    pub guild_id: String,
    pub entries: Vec<LeaderboardEntryResponse>,
}

impl LeaderboardResponse {
    pub fn new(guild_id: &GuildId, entries: Vec<LeaderboardEntry>) -> Self {
        Self {
            guild_id: guild_id.to_string(),
            entries: entries
                .into_iter()
                .enumerate()
                .map(|(idx, entry)| LeaderboardEntryResponse {
                    rank: idx + 1,
                    user_id: entry.user_id.into_inner(),
                    balance: entry.balance,
                })
                .collect(),
        }
    }
}

// ============================================================================
// Config Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LogChannelResponse {
    pub guild_id: String,
    pub channel_id: Option<String>,
}

impl LogChannelResponse {
    pub fn new(guild_id: &GuildId, channel_id: Option<ChannelId>) -> Self {
        Self {
            guild_id: guild_id.to_string(),
            channel_id: channel_id.map(ChannelId::into_inner),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SafetySwitchResponse {
    pub guild_id: String,
    pub enabled: bool,
    /// State before a toggle; absent on reads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<bool>,
}

impl SafetySwitchResponse {
    pub fn new(guild_id: &GuildId, enabled: bool, previous: Option<bool>) -> Self {
        Self {
            guild_id: guild_id.to_string(),
            enabled,
            previous,
        }
    }
}

// ============================================================================
// Punishment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PunishmentResponse {
    pub guild_id: String,
    pub user_id: String,
    pub kind: String,
    pub until_ms: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    pub attempts: u32,
}

impl From<Punishment> for PunishmentResponse {
    fn from(p: Punishment) -> Self {
        Self {
            guild_id: p.guild_id.into_inner(),
            user_id: p.user_id.into_inner(),
            kind: p.kind.into(),
            until_ms: p.until_ms,
            reason: p.reason,
            created_by: p.created_by.map(UserId::into_inner),
            attempts: p.attempts,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BanResponse {
    pub guild_id: String,
    pub user_id: String,
    pub reason: String,
    /// Present for temporary bans
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until_ms: Option<i64>,
}

impl BanResponse {
    pub fn new(guild_id: &GuildId, user_id: &UserId, ban: IssuedBan) -> Self {
        Self {
            guild_id: guild_id.to_string(),
            user_id: user_id.to_string(),
            reason: ban.reason,
            until_ms: ban.until_ms,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RevokeBanResponse {
    pub guild_id: String,
    pub user_id: String,
    pub lifted: bool,
    pub record_removed: bool,
}

impl RevokeBanResponse {
    pub fn new(guild_id: &GuildId, user_id: &UserId, outcome: RevokeOutcome) -> Self {
        Self {
            guild_id: guild_id.to_string(),
            user_id: user_id.to_string(),
            lifted: outcome.lifted,
            record_removed: outcome.record_removed,
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}
