//! Reconciler handlers

use axum::{extract::State, Json};
use warden_service::SweepReport;

use crate::response::ApiResult;
use crate::state::AppState;

/// Run one sweep now; waits for a timer-driven sweep already in progress
///
/// The sweep is detached from the request, so a timeout or a client hang-up
/// does not cut it short.
///
/// POST /reconciler/sweep
pub async fn sweep(State(state): State<AppState>) -> ApiResult<Json<SweepReport>> {
    let report = state.reconciler().run_detached().await?;
    Ok(Json(report))
}
