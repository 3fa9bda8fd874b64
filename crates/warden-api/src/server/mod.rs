//! Server setup and initialization
//!
//! Provides the application builder and the server runner. The reconciler
//! is started before the listener accepts requests and stopped after the
//! listener has drained.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info};
use warden_common::{AppConfig, AppError};
use warden_db::{create_pool, schema, DatabaseConfig};
use warden_discord::{DiscordClient, DiscordClientConfig};
use warden_service::{Reconciler, ReconcilerSettings, ServiceContextBuilder, ServicePolicy};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router().merge(health_routes());
    let router = apply_middleware(router);
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: &AppConfig) -> Result<AppState, AppError> {
    info!(url = %config.database.url, "Opening SQLite database...");
    let pool = create_pool(&DatabaseConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    schema::migrate(&pool)
        .await
        .map_err(|e| AppError::Database(format!("schema bootstrap failed: {e}")))?;
    info!("Database ready");

    let discord = Arc::new(
        DiscordClient::new(DiscordClientConfig::from(&config.discord))
            .map_err(|e| AppError::Config(e.to_string()))?,
    );

    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .enforcement(discord.clone())
        .audit_sink(discord)
        .policy(ServicePolicy::from(&config.economy))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    let reconciler = Reconciler::from_context(&service_context, ReconcilerSettings::from(&config.reconciler));

    Ok(AppState::new(service_context, reconciler))
}

/// Serve `app` on `listener` until `shutdown` resolves
pub async fn run_server<F>(app: Router, listener: TcpListener, shutdown: F) -> Result<(), AppError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AppError::Internal(e.into()))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let state = create_app_state(&config).await?;

    let addr = (config.api.host.as_str(), config.api.port);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}:{}: {}", addr.0, addr.1, e)))?;

    let reconciler = state.reconciler().clone().spawn();
    let app = create_app(state);

    let result = run_server(app, listener, shutdown_signal()).await;

    info!("HTTP server stopped, waiting for reconciler");
    reconciler.shutdown().await;

    result
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown"),
        () = terminate => info!("Received terminate signal, initiating graceful shutdown"),
    }
}
