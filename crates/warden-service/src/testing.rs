//! In-memory platform double
//!
//! Implements both platform ports over a mutex-guarded ban table, records
//! every call, and can be told to fail specific operations.

use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::Mutex;
use warden_core::{
    AuditSink, ChannelId, EnforcementClient, EnforcementError, EnforcementResult, GuildId, UserId,
};

/// One call observed by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    ResolveGuild(GuildId),
    IsSanctioned(GuildId, UserId),
    Apply(GuildId, UserId, String),
    Lift(GuildId, UserId, String),
}

/// An audit entry captured by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedEntry {
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub text: String,
}

#[derive(Debug, Default)]
struct State {
    banned: HashSet<(GuildId, UserId)>,
    unreachable: HashSet<GuildId>,
    resolve_error: Option<EnforcementError>,
    check_error: Option<EnforcementError>,
    apply_error: Option<EnforcementError>,
    lift_error: Option<EnforcementError>,
    post_error: Option<EnforcementError>,
    calls: Vec<PlatformCall>,
    posts: Vec<PostedEntry>,
}

#[derive(Debug, Default)]
pub struct FakePlatform {
    state: Mutex<State>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a user as currently banned
    pub fn ban(&self, guild_id: &GuildId, user_id: &UserId) {
        self.state.lock().banned.insert((guild_id.clone(), user_id.clone()));
    }

    pub fn is_banned(&self, guild_id: &GuildId, user_id: &UserId) -> bool {
        self.state.lock().banned.contains(&(guild_id.clone(), user_id.clone()))
    }

    /// Make `resolve_guild` report the guild as gone
    pub fn make_unreachable(&self, guild_id: &GuildId) {
        self.state.lock().unreachable.insert(guild_id.clone());
    }

    pub fn fail_resolve_with(&self, error: Option<EnforcementError>) {
        self.state.lock().resolve_error = error;
    }

    pub fn fail_checks_with(&self, error: Option<EnforcementError>) {
        self.state.lock().check_error = error;
    }

    pub fn fail_applies_with(&self, error: Option<EnforcementError>) {
        self.state.lock().apply_error = error;
    }

    pub fn fail_lifts_with(&self, error: Option<EnforcementError>) {
        self.state.lock().lift_error = error;
    }

    pub fn fail_posts_with(&self, error: Option<EnforcementError>) {
        self.state.lock().post_error = error;
    }

    pub fn calls(&self) -> Vec<PlatformCall> {
        self.state.lock().calls.clone()
    }

    /// Successful and failed lift requests, in order
    pub fn lift_requests(&self) -> Vec<(GuildId, UserId)> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                PlatformCall::Lift(g, u, _) => Some((g.clone(), u.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn posts(&self) -> Vec<PostedEntry> {
        self.state.lock().posts.clone()
    }
}

#[async_trait]
impl EnforcementClient for FakePlatform {
    async fn resolve_guild(&self, guild_id: &GuildId) -> EnforcementResult<()> {
        let mut state = self.state.lock();
        state.calls.push(PlatformCall::ResolveGuild(guild_id.clone()));
        if let Some(err) = state.resolve_error.clone() {
            return Err(err);
        }
        if state.unreachable.contains(guild_id) {
            return Err(EnforcementError::GuildUnreachable(guild_id.to_string()));
        }
        Ok(())
    }

    async fn is_sanctioned(&self, guild_id: &GuildId, user_id: &UserId) -> EnforcementResult<bool> {
        let mut state = self.state.lock();
        state
            .calls
            .push(PlatformCall::IsSanctioned(guild_id.clone(), user_id.clone()));
        if let Some(err) = state.check_error.clone() {
            return Err(err);
        }
        Ok(state.banned.contains(&(guild_id.clone(), user_id.clone())))
    }

    async fn apply_sanction(&self, guild_id: &GuildId, user_id: &UserId, reason: &str) -> EnforcementResult<()> {
        let mut state = self.state.lock();
        state
            .calls
            .push(PlatformCall::Apply(guild_id.clone(), user_id.clone(), reason.to_string()));
        if let Some(err) = state.apply_error.clone() {
            return Err(err);
        }
        state.banned.insert((guild_id.clone(), user_id.clone()));
        Ok(())
    }

    async fn lift_sanction(&self, guild_id: &GuildId, user_id: &UserId, reason: &str) -> EnforcementResult<()> {
        let mut state = self.state.lock();
        state
            .calls
            .push(PlatformCall::Lift(guild_id.clone(), user_id.clone(), reason.to_string()));
        if let Some(err) = state.lift_error.clone() {
            return Err(err);
        }
        if state.banned.remove(&(guild_id.clone(), user_id.clone())) {
            Ok(())
        } else {
            Err(EnforcementError::Rejected("Unknown Ban".to_string()))
        }
    }
}

#[async_trait]
impl AuditSink for FakePlatform {
    async fn post(&self, guild_id: &GuildId, channel_id: &ChannelId, text: &str) -> EnforcementResult<()> {
        let mut state = self.state.lock();
        if let Some(err) = state.post_error.clone() {
            return Err(err);
        }
        state.posts.push(PostedEntry {
            guild_id: guild_id.clone(),
            channel_id: channel_id.clone(),
            text: text.to_string(),
        });
        Ok(())
    }
}
