//! Request bodies and response shapes used by the API tests

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub fn adjust(delta: i64) -> Value {
    json!({ "delta": delta })
}

pub fn transfer(from: &str, to: &str, amount: i64) -> Value {
    json!({ "from_user_id": from, "to_user_id": to, "amount": amount })
}

/// Ban request body
#[derive(Debug, Serialize)]
pub struct BanRequest {
    pub actor_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl BanRequest {
    pub fn temporary(actor: &str, duration: &str) -> Self {
        Self {
            actor_id: actor.to_string(),
            duration: Some(duration.to_string()),
            reason: None,
        }
    }

    pub fn permanent(actor: &str) -> Self {
        Self {
            actor_id: actor.to_string(),
            duration: None,
            reason: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Balance {
    pub guild_id: String,
    pub user_id: String,
    pub balance: i64,
}

#[derive(Debug, Deserialize)]
pub struct DailyClaim {
    pub day: String,
    pub reward: i64,
    pub balance: i64,
}

#[derive(Debug, Deserialize)]
pub struct Transfer {
    pub amount: i64,
    pub from_balance: i64,
    pub to_balance: i64,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user_id: String,
    pub balance: i64,
}

#[derive(Debug, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

#[derive(Debug, Deserialize)]
pub struct Ban {
    pub reason: String,
    pub until_ms: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct Revoke {
    pub lifted: bool,
    pub record_removed: bool,
}

#[derive(Debug, Deserialize)]
pub struct Punishment {
    pub kind: String,
    pub until_ms: i64,
    pub reason: Option<String>,
    pub created_by: Option<String>,
    pub attempts: u32,
}

#[derive(Debug, Deserialize)]
pub struct SweepReport {
    pub due: usize,
    pub lifted: usize,
    pub not_sanctioned: usize,
}
