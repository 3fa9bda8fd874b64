//! Guild configuration handlers

use axum::{
    extract::{Path, State},
    Json,
};
use warden_core::{ChannelId, UserId};
use warden_service::{
    GuildConfigService, LogChannelResponse, SafetySwitchResponse, SetDangerousRequest,
    SetLogChannelRequest,
};

use crate::extractors::{GuildPath, ValidatedJson};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /guilds/{guild_id}/config/log-channel
pub async fn get_log_channel(
    State(state): State<AppState>,
    Path(path): Path<GuildPath>,
) -> ApiResult<Json<LogChannelResponse>> {
    let guild_id = path.guild_id()?;

    let service = GuildConfigService::new(state.service_context());
    let channel_id = service.get_log_channel(&guild_id).await?;
    Ok(Json(LogChannelResponse::new(&guild_id, channel_id)))
}

/// Set or clear (`null`) the audit-log channel
///
/// PUT /guilds/{guild_id}/config/log-channel
pub async fn set_log_channel(
    State(state): State<AppState>,
    Path(path): Path<GuildPath>,
    ValidatedJson(request): ValidatedJson<SetLogChannelRequest>,
) -> ApiResult<Json<LogChannelResponse>> {
    let guild_id = path.guild_id()?;
    let channel_id = request
        .channel_id
        .as_deref()
        .map(ChannelId::parse)
        .transpose()
        .map_err(|e| ApiError::invalid_id("channel_id", e))?;

    let service = GuildConfigService::new(state.service_context());
    service.set_log_channel(&guild_id, channel_id.as_ref()).await?;
    Ok(Json(LogChannelResponse::new(&guild_id, channel_id)))
}

/// GET /guilds/{guild_id}/config/dangerous
pub async fn get_dangerous(
    State(state): State<AppState>,
    Path(path): Path<GuildPath>,
) -> ApiResult<Json<SafetySwitchResponse>> {
    let guild_id = path.guild_id()?;

    let enabled = GuildConfigService::new(state.service_context()).is_dangerous_enabled(&guild_id);
    Ok(Json(SafetySwitchResponse::new(&guild_id, enabled, None)))
}

/// Turn sanction-issuing commands on or off for one guild
///
/// PUT /guilds/{guild_id}/config/dangerous
pub async fn set_dangerous(
    State(state): State<AppState>,
    Path(path): Path<GuildPath>,
    ValidatedJson(request): ValidatedJson<SetDangerousRequest>,
) -> ApiResult<Json<SafetySwitchResponse>> {
    let guild_id = path.guild_id()?;
    let actor_id = request
        .actor_id
        .as_deref()
        .map(UserId::parse)
        .transpose()
        .map_err(|e| ApiError::invalid_id("actor_id", e))?;

    let service = GuildConfigService::new(state.service_context());
    let previous = service
        .set_dangerous_enabled(&guild_id, request.enabled, actor_id.as_ref())
        .await?;
    Ok(Json(SafetySwitchResponse::new(&guild_id, request.enabled, Some(previous))))
}
