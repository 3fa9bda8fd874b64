//! Wallet entity - a member's balance within one guild

use serde::Serialize;

use crate::value_objects::{DayKey, GuildId, UserId};

/// Wallet keyed by (guild, user)
///
/// Created lazily with a zero balance the first time the pair is referenced
/// and never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wallet {
    pub guild_id: GuildId,
    pub user_id: UserId,
    pub balance: i64,
    pub last_daily_claim: Option<DayKey>,
}

impl Wallet {
    /// A freshly created wallet
    pub fn empty(guild_id: GuildId, user_id: UserId) -> Self {
        Self {
            guild_id,
            user_id,
            balance: 0,
            last_daily_claim: None,
        }
    }

    /// Whether the daily reward was already granted on `today`
    #[inline]
    pub fn has_claimed_on(&self, today: DayKey) -> bool {
        self.last_daily_claim == Some(today)
    }
}

/// One row of a guild leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub user_id: UserId,
    pub balance: i64,
}
