//! Punishment handlers
//!
//! Registry lookups plus the ban and unban commands.

use axum::{
    extract::{Path, State},
    Json,
};
use warden_core::UserId;
use warden_service::{
    BanResponse, IssueBanRequest, PunishmentResponse, PunishmentService, RevokeBanQuery,
    RevokeBanResponse,
};

use crate::extractors::{PunishmentPath, ValidatedJson, ValidatedQuery, WalletPath};
use crate::response::{ApiError, ApiResult, NoContent};
use crate::state::AppState;

/// GET /guilds/{guild_id}/punishments/{user_id}/{kind}
pub async fn get_punishment(
    State(state): State<AppState>,
    Path(path): Path<PunishmentPath>,
) -> ApiResult<Json<PunishmentResponse>> {
    let key = path.key()?;

    let service = PunishmentService::new(state.service_context());
    let punishment = service.find(&key).await?;
    Ok(Json(PunishmentResponse::from(punishment)))
}

/// Forget a stored sanction without touching the platform
///
/// DELETE /guilds/{guild_id}/punishments/{user_id}/{kind}
pub async fn delete_punishment(
    State(state): State<AppState>,
    Path(path): Path<PunishmentPath>,
) -> ApiResult<NoContent> {
    let key = path.key()?;

    PunishmentService::new(state.service_context()).remove(&key).await?;
    Ok(NoContent)
}

/// Ban a member, temporarily when a duration is given
///
/// PUT /guilds/{guild_id}/bans/{user_id}
pub async fn issue_ban(
    State(state): State<AppState>,
    Path(path): Path<WalletPath>,
    ValidatedJson(request): ValidatedJson<IssueBanRequest>,
) -> ApiResult<Json<BanResponse>> {
    let (guild_id, target_id) = path.ids()?;
    let actor_id = UserId::parse(&request.actor_id).map_err(|e| ApiError::invalid_id("actor_id", e))?;

    let service = PunishmentService::new(state.service_context());
    let ban = service
        .issue_ban(
            &guild_id,
            &target_id,
            &actor_id,
            request.duration.as_deref(),
            request.reason.as_deref(),
        )
        .await?;
    Ok(Json(BanResponse::new(&guild_id, &target_id, ban)))
}

/// Lift a ban and drop any stored expiry
///
/// DELETE /guilds/{guild_id}/bans/{user_id}?actor_id=
pub async fn revoke_ban(
    State(state): State<AppState>,
    Path(path): Path<WalletPath>,
    ValidatedQuery(query): ValidatedQuery<RevokeBanQuery>,
) -> ApiResult<Json<RevokeBanResponse>> {
    let (guild_id, target_id) = path.ids()?;
    let actor_id = UserId::parse(&query.actor_id).map_err(|e| ApiError::invalid_id("actor_id", e))?;

    let service = PunishmentService::new(state.service_context());
    let outcome = service.revoke_ban(&guild_id, &target_id, &actor_id).await?;
    Ok(Json(RevokeBanResponse::new(&guild_id, &target_id, outcome)))
}
