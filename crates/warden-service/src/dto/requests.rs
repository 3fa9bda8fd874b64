//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Identifier fields stay strings here and are parsed into typed ids by the
//! handlers.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Wallet Requests
// ============================================================================

/// Unchecked balance adjustment (reward, fine, correction)
///
/// The magnitude is capped at 10^12 so repeated adjustments cannot overflow
/// the stored integer in practice.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdjustBalanceRequest {
    #[validate(range(min = -1_000_000_000_000_i64, max = 1_000_000_000_000_i64, message = "Delta out of range"))]
    pub delta: i64,
}

/// Move funds between two members of the same guild
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TransferRequest {
    #[validate(length(min = 1, max = 64, message = "from_user_id must be 1-64 characters"))]
    pub from_user_id: String,

    #[validate(length(min = 1, max = 64, message = "to_user_id must be 1-64 characters"))]
    pub to_user_id: String,

    #[validate(range(min = 1, message = "Amount must be positive"))]
    pub amount: i64,
}

/// Leaderboard query parameters; out-of-range limits are clamped, not rejected
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LeaderboardQuery {
    pub limit: Option<i64>,
}

// ============================================================================
// Config Requests
// ============================================================================

/// Set (or clear, with `null`) the audit-log channel
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetLogChannelRequest {
    #[validate(length(min = 1, max = 64, message = "channel_id must be 1-64 characters"))]
    pub channel_id: Option<String>,
}

/// Toggle dangerous commands for a guild
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetDangerousRequest {
    pub enabled: bool,

    #[validate(length(min = 1, max = 64))]
    pub actor_id: Option<String>,
}

// ============================================================================
// Ban Requests
// ============================================================================

/// Ban a user, optionally for a limited time
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IssueBanRequest {
    #[validate(length(min = 1, max = 64, message = "actor_id must be 1-64 characters"))]
    pub actor_id: String,

    /// Bare minutes (`30`) or `<n>s|m|h|d`; omitted for a permanent ban
    #[validate(length(min = 1, max = 32))]
    pub duration: Option<String>,

    #[validate(length(max = 512, message = "Reason must be at most 512 characters"))]
    pub reason: Option<String>,
}

/// Query string for lifting a ban
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RevokeBanQuery {
    #[validate(length(min = 1, max = 64, message = "actor_id must be 1-64 characters"))]
    pub actor_id: String,
}
