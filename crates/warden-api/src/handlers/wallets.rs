//! Wallet handlers
//!
//! Balances, daily rewards, transfers and the leaderboard.

use axum::{
    extract::{Path, State},
    Json,
};
use warden_core::UserId;
use warden_service::{
    AdjustBalanceRequest, BalanceResponse, DailyClaimResponse, LeaderboardQuery,
    LeaderboardResponse, LedgerService, TransferRequest, TransferResponse,
};

use crate::extractors::{GuildPath, ValidatedJson, ValidatedQuery, WalletPath};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Get a member's balance, creating an empty wallet on first sight
///
/// GET /guilds/{guild_id}/wallets/{user_id}
pub async fn get_balance(
    State(state): State<AppState>,
    Path(path): Path<WalletPath>,
) -> ApiResult<Json<BalanceResponse>> {
    let (guild_id, user_id) = path.ids()?;

    let service = LedgerService::new(state.service_context());
    let balance = service.get_balance(&guild_id, &user_id).await?;
    Ok(Json(BalanceResponse::new(&guild_id, &user_id, balance)))
}

/// Add a signed amount to a balance
///
/// POST /guilds/{guild_id}/wallets/{user_id}/adjust
pub async fn adjust_balance(
    State(state): State<AppState>,
    Path(path): Path<WalletPath>,
    ValidatedJson(request): ValidatedJson<AdjustBalanceRequest>,
) -> ApiResult<Json<BalanceResponse>> {
    let (guild_id, user_id) = path.ids()?;

    let service = LedgerService::new(state.service_context());
    let balance = service.add_balance(&guild_id, &user_id, request.delta).await?;
    Ok(Json(BalanceResponse::new(&guild_id, &user_id, balance)))
}

/// Claim the daily reward
///
/// POST /guilds/{guild_id}/wallets/{user_id}/daily
pub async fn claim_daily(
    State(state): State<AppState>,
    Path(path): Path<WalletPath>,
) -> ApiResult<Json<DailyClaimResponse>> {
    let (guild_id, user_id) = path.ids()?;

    let service = LedgerService::new(state.service_context());
    let claim = service.claim_daily(&guild_id, &user_id).await?;
    Ok(Json(DailyClaimResponse::new(&user_id, claim)))
}

/// Move funds between two members
///
/// POST /guilds/{guild_id}/transfers
pub async fn transfer(
    State(state): State<AppState>,
    Path(path): Path<GuildPath>,
    ValidatedJson(request): ValidatedJson<TransferRequest>,
) -> ApiResult<Json<TransferResponse>> {
    let guild_id = path.guild_id()?;
    let from = UserId::parse(&request.from_user_id).map_err(|e| ApiError::invalid_id("from_user_id", e))?;
    let to = UserId::parse(&request.to_user_id).map_err(|e| ApiError::invalid_id("to_user_id", e))?;

    let service = LedgerService::new(state.service_context());
    let transfer = service.transfer(&guild_id, &from, &to, request.amount).await?;
    Ok(Json(TransferResponse::new(&from, &to, request.amount, transfer)))
}

/// Highest balances in the guild
///
/// GET /guilds/{guild_id}/leaderboard?limit=
pub async fn leaderboard(
    State(state): State<AppState>,
    Path(path): Path<GuildPath>,
    ValidatedQuery(query): ValidatedQuery<LeaderboardQuery>,
) -> ApiResult<Json<LeaderboardResponse>> {
    let guild_id = path.guild_id()?;

    let service = LedgerService::new(state.service_context());
    let entries = service.top_balances(&guild_id, query.limit).await?;
    Ok(Json(LeaderboardResponse::new(&guild_id, entries)))
}
