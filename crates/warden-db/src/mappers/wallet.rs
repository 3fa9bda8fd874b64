//! Wallet entity <-> model mapper

use tracing::warn;
use warden_core::{DayKey, GuildId, LeaderboardEntry, UserId, Wallet};

use crate::models::{LeaderboardRowModel, WalletModel};

impl From<WalletModel> for Wallet {
    fn from(model: WalletModel) -> Self {
        let last_daily_claim = model.last_daily.as_deref().and_then(|raw| {
            let day = DayKey::parse(raw);
            if day.is_none() {
                warn!(guild_id = %model.guild_id, user_id = %model.user_id, raw, "Unreadable last_daily value");
            }
            day
        });

        Wallet {
            guild_id: GuildId::from_stored(model.guild_id),
            user_id: UserId::from_stored(model.user_id),
            balance: model.balance,
            last_daily_claim,
        }
    }
}

impl From<LeaderboardRowModel> for LeaderboardEntry {
    fn from(model: LeaderboardRowModel) -> Self {
        LeaderboardEntry {
            user_id: UserId::from_stored(model.user_id),
            balance: model.balance,
        }
    }
}
