//! Wallet database model

use sqlx::FromRow;

/// Database model for wallets table
#[derive(Debug, Clone, FromRow)]
pub struct WalletModel {
    pub guild_id: String,
    pub user_id: String,
    pub balance: i64,
    pub last_daily: Option<String>,
}

/// Projection used by the leaderboard query
#[derive(Debug, Clone, FromRow)]
pub struct LeaderboardRowModel {
    pub user_id: String,
    pub balance: i64,
}
