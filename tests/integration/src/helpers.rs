//! Test helpers for integration tests
//!
//! Provides a server harness and response assertions.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use warden_api::{create_app, AppState};
use warden_core::ManualClock;
use warden_db::{create_memory_pool, schema};
use warden_service::testing::FakePlatform;
use warden_service::{Reconciler, ReconcilerSettings, ServiceContextBuilder, ServicePolicy};

/// 2024-03-01T12:00:00Z
pub const TEST_EPOCH_MS: i64 = 1_709_294_400_000;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub platform: Arc<FakePlatform>,
    pub clock: Arc<ManualClock>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with default policy
    pub async fn start() -> Result<Self> {
        Self::start_with_policy(ServicePolicy::default()).await
    }

    pub async fn start_with_policy(policy: ServicePolicy) -> Result<Self> {
        let pool = create_memory_pool().await?;
        schema::migrate(&pool).await?;

        let platform = Arc::new(FakePlatform::new());
        let clock = Arc::new(ManualClock::new(TEST_EPOCH_MS));

        let service_context = ServiceContextBuilder::new()
            .pool(pool)
            .enforcement(platform.clone())
            .audit_sink(platform.clone())
            .clock(clock.clone())
            .policy(policy)
            .build()
            .map_err(|e| anyhow::anyhow!("{e}"))?;
        let reconciler = Reconciler::from_context(&service_context, ReconcilerSettings::default());

        let app = create_app(AppState::new(service_context, reconciler));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            platform,
            clock,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// POST with an empty body
    pub async fn post_empty(&self, path: &str) -> Result<Response> {
        Ok(self.client.post(self.url(path)).send().await?)
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    pub async fn put<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.put(self.url(path)).json(body).send().await?)
    }

    pub async fn delete(&self, path: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).send().await?)
    }
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {}, got {}. Body: {}", expected_status, status, body);
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {}, got {}. Body: {}", expected_status, status, body);
    }
    Ok(())
}

/// Assert an error status and return the `error` object of the body
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<serde_json::Value> {
    let body: serde_json::Value = assert_json(response, expected_status).await?;
    Ok(body["error"].clone())
}
