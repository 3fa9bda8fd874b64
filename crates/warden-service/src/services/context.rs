//! Service context - dependency container for services
//!
//! Holds the repositories, platform collaborators, clock and policy knobs
//! needed by services.

use std::sync::Arc;

use warden_common::EconomyConfig;
use warden_core::{
    AuditSink, Clock, EnforcementClient, GuildConfigRepository, PunishmentRepository, SystemClock,
    WalletRepository, MAX_SANCTION_DURATION_MS,
};
use warden_db::{
    SqliteGuildConfigRepository, SqlitePool, SqlitePunishmentRepository, SqliteWalletRepository,
};

use super::audit::AuditLogger;
use super::error::{ServiceError, ServiceResult};
use super::safety::SafetySwitch;

/// Tunable business rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServicePolicy {
    /// Amount credited by a daily claim
    pub daily_reward: i64,
    /// Longest temporary sanction accepted
    pub max_sanction_duration_ms: i64,
    /// Safety switch state for guilds never toggled
    pub dangerous_default: bool,
}

impl Default for ServicePolicy {
    fn default() -> Self {
        Self {
            daily_reward: 250,
            max_sanction_duration_ms: MAX_SANCTION_DURATION_MS,
            dangerous_default: true,
        }
    }
}

impl From<&EconomyConfig> for ServicePolicy {
    fn from(config: &EconomyConfig) -> Self {
        Self {
            daily_reward: config.daily_reward,
            max_sanction_duration_ms: config.max_sanction_duration_ms,
            dangerous_default: config.dangerous_commands_enabled,
        }
    }
}

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - The SQLite pool (readiness checks)
/// - Wallet, punishment and guild-config repositories
/// - The enforcement client and audit logger
/// - The clock and the per-guild safety switch
#[derive(Clone)]
pub struct ServiceContext {
    pool: SqlitePool,

    wallet_repo: Arc<dyn WalletRepository>,
    punishment_repo: Arc<dyn PunishmentRepository>,
    config_repo: Arc<dyn GuildConfigRepository>,

    enforcement: Arc<dyn EnforcementClient>,
    audit: AuditLogger,

    clock: Arc<dyn Clock>,
    safety: SafetySwitch,
    policy: ServicePolicy,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: SqlitePool,
        wallet_repo: Arc<dyn WalletRepository>,
        punishment_repo: Arc<dyn PunishmentRepository>,
        config_repo: Arc<dyn GuildConfigRepository>,
        enforcement: Arc<dyn EnforcementClient>,
        audit_sink: Arc<dyn AuditSink>,
        clock: Arc<dyn Clock>,
        policy: ServicePolicy,
    ) -> Self {
        let audit = AuditLogger::new(config_repo.clone(), audit_sink);
        let safety = SafetySwitch::new(policy.dangerous_default);

        Self {
            pool,
            wallet_repo,
            punishment_repo,
            config_repo,
            enforcement,
            audit,
            clock,
            safety,
            policy,
        }
    }

    // === Database Pool ===

    /// Get the SQLite connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // === Repositories ===

    pub fn wallet_repo(&self) -> &dyn WalletRepository {
        self.wallet_repo.as_ref()
    }

    pub fn punishment_repo(&self) -> &dyn PunishmentRepository {
        self.punishment_repo.as_ref()
    }

    pub fn config_repo(&self) -> &dyn GuildConfigRepository {
        self.config_repo.as_ref()
    }

    /// Shared handle to the punishment repository, for long-lived tasks
    pub fn punishment_repo_arc(&self) -> Arc<dyn PunishmentRepository> {
        Arc::clone(&self.punishment_repo)
    }

    // === Platform ===

    pub fn enforcement(&self) -> &dyn EnforcementClient {
        self.enforcement.as_ref()
    }

    /// Shared handle to the enforcement client, for long-lived tasks
    pub fn enforcement_arc(&self) -> Arc<dyn EnforcementClient> {
        Arc::clone(&self.enforcement)
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    // === Policy ===

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn clock_arc(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    pub fn safety(&self) -> &SafetySwitch {
        &self.safety
    }

    pub fn policy(&self) -> &ServicePolicy {
        &self.policy
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"SqlitePool")
            .field("repositories", &"...")
            .field("platform", &"...")
            .field("policy", &self.policy)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
///
/// Repositories left unset default to the SQLite implementations over the
/// pool; the clock defaults to the system clock.
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<SqlitePool>,
    wallet_repo: Option<Arc<dyn WalletRepository>>,
    punishment_repo: Option<Arc<dyn PunishmentRepository>>,
    config_repo: Option<Arc<dyn GuildConfigRepository>>,
    enforcement: Option<Arc<dyn EnforcementClient>>,
    audit_sink: Option<Arc<dyn AuditSink>>,
    clock: Option<Arc<dyn Clock>>,
    policy: ServicePolicy,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: SqlitePool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn wallet_repo(mut self, repo: Arc<dyn WalletRepository>) -> Self {
        self.wallet_repo = Some(repo);
        self
    }

    pub fn punishment_repo(mut self, repo: Arc<dyn PunishmentRepository>) -> Self {
        self.punishment_repo = Some(repo);
        self
    }

    pub fn config_repo(mut self, repo: Arc<dyn GuildConfigRepository>) -> Self {
        self.config_repo = Some(repo);
        self
    }

    pub fn enforcement(mut self, client: Arc<dyn EnforcementClient>) -> Self {
        self.enforcement = Some(client);
        self
    }

    pub fn audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit_sink = Some(sink);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn policy(mut self, policy: ServicePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let pool = self
            .pool
            .ok_or_else(|| ServiceError::validation("pool is required"))?;
        let enforcement = self
            .enforcement
            .ok_or_else(|| ServiceError::validation("enforcement is required"))?;
        let audit_sink = self
            .audit_sink
            .ok_or_else(|| ServiceError::validation("audit_sink is required"))?;

        let wallet_repo = self
            .wallet_repo
            .unwrap_or_else(|| Arc::new(SqliteWalletRepository::new(pool.clone())));
        let punishment_repo = self
            .punishment_repo
            .unwrap_or_else(|| Arc::new(SqlitePunishmentRepository::new(pool.clone())));
        let config_repo = self
            .config_repo
            .unwrap_or_else(|| Arc::new(SqliteGuildConfigRepository::new(pool.clone())));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        Ok(ServiceContext::new(
            pool,
            wallet_repo,
            punishment_repo,
            config_repo,
            enforcement,
            audit_sink,
            clock,
            self.policy,
        ))
    }
}
