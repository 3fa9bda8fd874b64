//! Discord REST client
//!
//! Implements the enforcement client and the audit sink over the bot API:
//!
//! | Operation | Request |
//! |---|---|
//! | `resolve_guild` | `GET /guilds/{guild}` |
//! | `is_sanctioned` | `GET /guilds/{guild}/bans/{user}` |
//! | `apply_sanction` | `PUT /guilds/{guild}/bans/{user}` |
//! | `lift_sanction` | `DELETE /guilds/{guild}/bans/{user}` |
//! | `post` | `POST /channels/{channel}/messages` |
//!
//! Retries are not done here; the reconciler owns the retry budget.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde_json::json;
use tracing::{debug, instrument};
use url::Url;
use warden_core::{
    AuditSink, ChannelId, EnforcementClient, EnforcementError, EnforcementResult, GuildId, UserId,
};

use crate::error::{classify, transport, ApiErrorBody, DiscordError};

const AUDIT_REASON_HEADER: &str = "X-Audit-Log-Reason";
const MAX_AUDIT_REASON_CHARS: usize = 512;
const MAX_MESSAGE_CHARS: usize = 2000;

/// Connection settings for [`DiscordClient`]
#[derive(Clone)]
pub struct DiscordClientConfig {
    pub api_base: String,
    pub bot_token: String,
    pub timeout: Duration,
}

impl From<&warden_common::DiscordConfig> for DiscordClientConfig {
    fn from(config: &warden_common::DiscordConfig) -> Self {
        Self {
            api_base: config.api_base.clone(),
            bot_token: config.bot_token.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

impl std::fmt::Debug for DiscordClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordClientConfig")
            .field("api_base", &self.api_base)
            .field("bot_token", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Bot API client; cheap to clone
#[derive(Clone)]
pub struct DiscordClient {
    http: reqwest::Client,
    base: Url,
}

impl DiscordClient {
    pub fn new(config: DiscordClientConfig) -> Result<Self, DiscordError> {
        let base = Url::parse(config.api_base.trim_end_matches('/'))
            .map_err(|e| DiscordError::InvalidBaseUrl(format!("{}: {e}", config.api_base)))?;
        if base.cannot_be_a_base() {
            return Err(DiscordError::InvalidBaseUrl(config.api_base));
        }

        let mut auth = HeaderValue::from_str(&format!("Bot {}", config.bot_token))
            .map_err(|_| DiscordError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("DiscordBot (warden, ", env!("CARGO_PKG_VERSION"), ")")),
        );

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { http, base })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Checked in `new`: the base always has a path
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn ban_endpoint(&self, guild_id: &GuildId, user_id: &UserId) -> Url {
        self.endpoint(&["guilds", guild_id.as_str(), "bans", user_id.as_str()])
    }

    async fn send(&self, request: RequestBuilder, operation: &'static str) -> EnforcementResult<Response> {
        let response = request.send().await.map_err(|e| transport(operation, &e))?;
        debug!(operation, status = %response.status(), "Discord request completed");
        Ok(response)
    }
}

impl std::fmt::Debug for DiscordClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordClient")
            .field("base", &self.base.as_str())
            .finish_non_exhaustive()
    }
}

async fn failure(response: Response) -> EnforcementError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    classify(status, &ApiErrorBody::parse(&body))
}

/// Percent-encode an audit-log reason, capped at the platform limit
fn encode_reason(reason: &str) -> String {
    let capped: String = reason.chars().take(MAX_AUDIT_REASON_CHARS).collect();
    url::form_urlencoded::byte_serialize(capped.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[async_trait]
impl EnforcementClient for DiscordClient {
    #[instrument(skip(self))]
    async fn resolve_guild(&self, guild_id: &GuildId) -> EnforcementResult<()> {
        let url = self.endpoint(&["guilds", guild_id.as_str()]);
        let response = self.send(self.http.get(url), "resolve_guild").await?;

        match response.status() {
            s if s.is_success() => Ok(()),
            StatusCode::NOT_FOUND | StatusCode::FORBIDDEN => {
                Err(EnforcementError::GuildUnreachable(guild_id.to_string()))
            }
            _ => Err(failure(response).await),
        }
    }

    #[instrument(skip(self))]
    async fn is_sanctioned(&self, guild_id: &GuildId, user_id: &UserId) -> EnforcementResult<bool> {
        let url = self.ban_endpoint(guild_id, user_id);
        let response = self.send(self.http.get(url), "is_sanctioned").await?;

        match response.status() {
            s if s.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(failure(response).await),
        }
    }

    #[instrument(skip(self, reason))]
    async fn apply_sanction(&self, guild_id: &GuildId, user_id: &UserId, reason: &str) -> EnforcementResult<()> {
        let request = self
            .http
            .put(self.ban_endpoint(guild_id, user_id))
            .header(AUDIT_REASON_HEADER, encode_reason(reason))
            .json(&json!({}));
        let response = self.send(request, "apply_sanction").await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(failure(response).await)
        }
    }

    #[instrument(skip(self, reason))]
    async fn lift_sanction(&self, guild_id: &GuildId, user_id: &UserId, reason: &str) -> EnforcementResult<()> {
        let request = self
            .http
            .delete(self.ban_endpoint(guild_id, user_id))
            .header(AUDIT_REASON_HEADER, encode_reason(reason));
        let response = self.send(request, "lift_sanction").await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(failure(response).await)
        }
    }
}

#[async_trait]
impl AuditSink for DiscordClient {
    #[instrument(skip(self, text))]
    async fn post(&self, guild_id: &GuildId, channel_id: &ChannelId, text: &str) -> EnforcementResult<()> {
        let content: String = text.chars().take(MAX_MESSAGE_CHARS).collect();
        // Mentions render but nobody gets pinged by the log
        let body = json!({
            "content": content,
            "allowed_mentions": { "parse": [] },
        });

        let url = self.endpoint(&["channels", channel_id.as_str(), "messages"]);
        let response = self.send(self.http.post(url).json(&body), "post").await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(failure(response).await)
        }
    }
}
