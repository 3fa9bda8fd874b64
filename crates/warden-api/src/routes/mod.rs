//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{config, health, punishments, reconciler, wallets};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(wallet_routes())
        .merge(config_routes())
        .merge(punishment_routes())
        .route("/reconciler/sweep", post(reconciler::sweep))
}

/// Ledger routes
fn wallet_routes() -> Router<AppState> {
    Router::new()
        .route("/guilds/:guild_id/wallets/:user_id", get(wallets::get_balance))
        .route("/guilds/:guild_id/wallets/:user_id/adjust", post(wallets::adjust_balance))
        .route("/guilds/:guild_id/wallets/:user_id/daily", post(wallets::claim_daily))
        .route("/guilds/:guild_id/transfers", post(wallets::transfer))
        .route("/guilds/:guild_id/leaderboard", get(wallets::leaderboard))
}

/// Guild settings routes
fn config_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/guilds/:guild_id/config/log-channel",
            get(config::get_log_channel).put(config::set_log_channel),
        )
        .route(
            "/guilds/:guild_id/config/dangerous",
            get(config::get_dangerous).put(config::set_dangerous),
        )
}

/// Sanction routes
fn punishment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/guilds/:guild_id/bans/:user_id",
            put(punishments::issue_ban).delete(punishments::revoke_ban),
        )
        .route(
            "/guilds/:guild_id/punishments/:user_id/:kind",
            get(punishments::get_punishment).delete(punishments::delete_punishment),
        )
}
