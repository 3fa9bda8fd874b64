//! # warden-api
//!
//! REST API server built with Axum. Exposes the ledger, guild settings and
//! sanction commands to the command gateway and hosts the reconciler loop.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run};
pub use state::AppState;
