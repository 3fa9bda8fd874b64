//! Per-guild switch for sanction-issuing commands
//!
//! Guilds that were never toggled report the process-wide default. State is
//! held in memory only and resets to the default on restart.

use std::sync::Arc;

use dashmap::DashMap;
use warden_core::GuildId;

/// Shared, cheaply cloned handle to the per-guild switch table
#[derive(Debug, Clone)]
pub struct SafetySwitch {
    default_enabled: bool,
    overrides: Arc<DashMap<GuildId, bool>>,
}

impl SafetySwitch {
    pub fn new(default_enabled: bool) -> Self {
        Self {
            default_enabled,
            overrides: Arc::new(DashMap::new()),
        }
    }

    /// Whether dangerous commands may run in the guild
    pub fn is_enabled(&self, guild_id: &GuildId) -> bool {
        self.overrides
            .get(guild_id)
            .map_or(self.default_enabled, |entry| *entry.value())
    }

    /// Flip the switch for one guild, returning the previous state
    pub fn set(&self, guild_id: &GuildId, enabled: bool) -> bool {
        self.overrides
            .insert(guild_id.clone(), enabled)
            .unwrap_or(self.default_enabled)
    }
}

impl Default for SafetySwitch {
    fn default() -> Self {
        Self::new(true)
    }
}
