//! Punishment entity - a time-bounded sanction awaiting reversal
//!
//! Lifecycle: `ACTIVE` (`until_ms > now`) -> `DUE` (`until_ms <= now`, picked
//! up by a reconciliation sweep) -> `RESOLVED` (row deleted). Re-issuing the
//! same kind before resolution overwrites the row.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::{GuildId, UserId};

/// Sanction kind, stored as TEXT in the `type` column
///
/// Only `ban` has a reversal defined. Other values are preserved as-is so rows
/// written by newer deployments survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PunishmentKind {
    Ban,
    Other(String),
}

impl PunishmentKind {
    /// Stored representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ban => "ban",
            Self::Other(kind) => kind,
        }
    }

    /// Whether the reconciler knows how to reverse this kind
    #[inline]
    pub fn is_reversible(&self) -> bool {
        matches!(self, Self::Ban)
    }
}

impl From<&str> for PunishmentKind {
    fn from(raw: &str) -> Self {
        match raw {
            "ban" => Self::Ban,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for PunishmentKind {
    fn from(raw: String) -> Self {
        if raw == "ban" {
            Self::Ban
        } else {
            Self::Other(raw)
        }
    }
}

impl From<PunishmentKind> for String {
    fn from(kind: PunishmentKind) -> Self {
        match kind {
            PunishmentKind::Ban => "ban".to_owned(),
            PunishmentKind::Other(kind) => kind,
        }
    }
}

impl fmt::Display for PunishmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary key of a punishment row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PunishmentKey {
    pub guild_id: GuildId,
    pub user_id: UserId,
    pub kind: PunishmentKind,
}

impl PunishmentKey {
    pub fn new(guild_id: GuildId, user_id: UserId, kind: PunishmentKind) -> Self {
        Self {
            guild_id,
            user_id,
            kind,
        }
    }

    /// Key for a temporary ban
    pub fn ban(guild_id: GuildId, user_id: UserId) -> Self {
        Self::new(guild_id, user_id, PunishmentKind::Ban)
    }
}

impl fmt::Display for PunishmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.guild_id, self.user_id, self.kind)
    }
}

/// A stored time-bounded sanction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Punishment {
    pub guild_id: GuildId,
    pub user_id: UserId,
    pub kind: PunishmentKind,
    /// Epoch milliseconds at which the sanction must be lifted
    pub until_ms: i64,
    pub reason: Option<String>,
    pub created_by: Option<UserId>,
    /// Failed reversal attempts recorded by the reconciler
    pub attempts: u32,
}

impl Punishment {
    /// A new punishment with no recorded attempts
    pub fn new(key: PunishmentKey, until_ms: i64) -> Self {
        Self {
            guild_id: key.guild_id,
            user_id: key.user_id,
            kind: key.kind,
            until_ms,
            reason: None,
            created_by: None,
            attempts: 0,
        }
    }

    /// Attach a reason
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attach the issuing actor
    #[must_use]
    pub fn with_created_by(mut self, actor: UserId) -> Self {
        self.created_by = Some(actor);
        self
    }

    /// The row's primary key
    pub fn key(&self) -> PunishmentKey {
        PunishmentKey::new(self.guild_id.clone(), self.user_id.clone(), self.kind.clone())
    }

    /// Whether the sanction has expired at `now_ms`
    #[inline]
    pub fn is_due(&self, now_ms: i64) -> bool {
        self.until_ms <= now_ms
    }
}
