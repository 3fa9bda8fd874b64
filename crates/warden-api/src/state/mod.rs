//! Application state
//!
//! Holds the shared state for the Axum application: the service context and
//! the reconciler that on-demand sweeps run through.

use std::sync::Arc;

use warden_service::{Reconciler, ServiceContext};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Shared with the background loop so sweeps never overlap
    reconciler: Reconciler,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, reconciler: Reconciler) -> Self {
        Self {
            service_context: Arc::new(service_context),
            reconciler,
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("reconciler", &self.reconciler)
            .finish()
    }
}
