//! Punishment reconciler
//!
//! Periodically lifts sanctions whose expiry has passed. Each sweep takes a
//! snapshot of due records and processes them one at a time; a failure on one
//! record is logged and never stops the rest of the snapshot.
//!
//! Records are cleared with a compare-and-delete on the snapshot's `until_ms`,
//! so a sanction that was extended while the sweep ran survives it. A lift
//! that fails transiently is retried on later sweeps until the record has
//! used up `max_lift_attempts`; with the default budget of one attempt a
//! failed lift drops the record straight away.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, instrument, warn};
use warden_common::ReconcilerConfig;
use warden_core::{
    Clock, EnforcementClient, EnforcementError, Punishment, PunishmentKey, PunishmentRepository,
    RepoResult,
};

use super::audit::AuditLogger;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const EXPIRY_REASON: &str = "temp ban expired";

/// Loop timing and retry budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcilerSettings {
    pub period: Duration,
    pub max_lift_attempts: u32,
}

impl Default for ReconcilerSettings {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(60),
            max_lift_attempts: 1,
        }
    }
}

impl From<&ReconcilerConfig> for ReconcilerSettings {
    fn from(config: &ReconcilerConfig) -> Self {
        Self {
            period: config.period(),
            max_lift_attempts: config.max_lift_attempts.max(1),
        }
    }
}

/// Per-sweep tallies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Records in the snapshot
    pub due: usize,
    /// Ban lifted on the platform and record cleared
    pub lifted: usize,
    /// User was no longer banned; record cleared
    pub not_sanctioned: usize,
    /// Guild could not be resolved; record discarded
    pub discarded_unreachable: usize,
    /// Transient failure within the retry budget; record kept
    pub retained_for_retry: usize,
    /// Lift failed for good or the budget ran out; record dropped
    pub dropped_after_failure: usize,
    /// Kind the reconciler does not know how to reverse
    pub skipped: usize,
    /// Record was removed or re-issued by someone else mid-sweep
    pub superseded: usize,
    /// Storage failed while handling the record
    pub store_errors: usize,
}

impl SweepReport {
    fn record(&mut self, outcome: Outcome) {
        let slot = match outcome {
            Outcome::Lifted => &mut self.lifted,
            Outcome::NotSanctioned => &mut self.not_sanctioned,
            Outcome::DiscardedUnreachable => &mut self.discarded_unreachable,
            Outcome::RetainedForRetry => &mut self.retained_for_retry,
            Outcome::DroppedAfterFailure => &mut self.dropped_after_failure,
            Outcome::Superseded => &mut self.superseded,
        };
        *slot += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Lifted,
    NotSanctioned,
    DiscardedUnreachable,
    RetainedForRetry,
    DroppedAfterFailure,
    Superseded,
}

/// Sweeps due punishments and reverses them on the platform
#[derive(Clone)]
pub struct Reconciler {
    punishments: Arc<dyn PunishmentRepository>,
    enforcement: Arc<dyn EnforcementClient>,
    audit: AuditLogger,
    clock: Arc<dyn Clock>,
    settings: ReconcilerSettings,
    // Serializes sweeps between the timer and on-demand callers
    in_flight: Arc<Mutex<()>>,
}

impl Reconciler {
    pub fn new(
        punishments: Arc<dyn PunishmentRepository>,
        enforcement: Arc<dyn EnforcementClient>,
        audit: AuditLogger,
        clock: Arc<dyn Clock>,
        settings: ReconcilerSettings,
    ) -> Self {
        Self {
            punishments,
            enforcement,
            audit,
            clock,
            settings,
            in_flight: Arc::new(Mutex::new(())),
        }
    }

    /// Build a reconciler sharing the context's collaborators
    pub fn from_context(ctx: &ServiceContext, settings: ReconcilerSettings) -> Self {
        Self::new(
            ctx.punishment_repo_arc(),
            ctx.enforcement_arc(),
            ctx.audit().clone(),
            ctx.clock_arc(),
            settings,
        )
    }

    pub fn settings(&self) -> &ReconcilerSettings {
        &self.settings
    }

    /// Sweep at the clock's current time
    pub async fn run_once(&self) -> ServiceResult<SweepReport> {
        self.sweep(self.clock.now_ms()).await
    }

    /// Sweep on a task of its own
    ///
    /// The sweep finishes its snapshot even if the caller stops waiting, so a
    /// dropped request cannot leave a ban lifted but its record in place.
    pub async fn run_detached(&self) -> ServiceResult<SweepReport> {
        let reconciler = self.clone();
        tokio::spawn(async move { reconciler.run_once().await })
            .await
            .map_err(|e| ServiceError::internal(format!("sweep task failed: {e}")))?
    }

    /// Process every record due at `now_ms`
    ///
    /// Only a failure to read the snapshot is returned as an error.
    #[instrument(skip(self))]
    pub async fn sweep(&self, now_ms: i64) -> ServiceResult<SweepReport> {
        let _guard = self.in_flight.lock().await;

        let due = self.punishments.due(now_ms).await?;
        let mut report = SweepReport {
            due: due.len(),
            ..SweepReport::default()
        };

        for punishment in &due {
            if !punishment.kind.is_reversible() {
                debug!(key = %punishment.key(), "Skipping punishment of unknown kind");
                report.skipped += 1;
                continue;
            }

            match self.reconcile(punishment).await {
                Ok(outcome) => report.record(outcome),
                Err(e) => {
                    warn!(key = %punishment.key(), error = %e, "Storage error while reconciling punishment");
                    report.store_errors += 1;
                }
            }
        }

        if report.due > 0 {
            info!(
                due = report.due,
                lifted = report.lifted,
                not_sanctioned = report.not_sanctioned,
                discarded = report.discarded_unreachable,
                retained = report.retained_for_retry,
                dropped = report.dropped_after_failure,
                skipped = report.skipped,
                superseded = report.superseded,
                store_errors = report.store_errors,
                "Reconciliation sweep finished"
            );
        } else {
            debug!("Reconciliation sweep found nothing due");
        }

        Ok(report)
    }

    async fn reconcile(&self, punishment: &Punishment) -> RepoResult<Outcome> {
        let key = punishment.key();
        let (guild_id, user_id) = (&punishment.guild_id, &punishment.user_id);

        if let Err(err) = self.enforcement.resolve_guild(guild_id).await {
            if err.is_transient() {
                return self.on_failure(punishment, &key, &err).await;
            }
            warn!(key = %key, error = %err, "Guild unreachable, discarding punishment");
            return Ok(self
                .clear(&key, punishment.until_ms)
                .await?
                .unwrap_or(Outcome::DiscardedUnreachable));
        }

        let outcome = match self.enforcement.is_sanctioned(guild_id, user_id).await {
            Ok(false) => Outcome::NotSanctioned,
            Ok(true) => match self.enforcement.lift_sanction(guild_id, user_id, EXPIRY_REASON).await {
                Ok(()) => Outcome::Lifted,
                Err(err) => return self.on_failure(punishment, &key, &err).await,
            },
            Err(err) => return self.on_failure(punishment, &key, &err).await,
        };

        let text = match outcome {
            Outcome::Lifted => format!("UNBAN auto <@{user_id}> (temporary ban expired)"),
            _ => format!("Temporary ban on <@{user_id}> expired (user was not banned)"),
        };
        self.audit.record(guild_id, &text).await;

        Ok(self.clear(&key, punishment.until_ms).await?.unwrap_or(outcome))
    }

    async fn on_failure(
        &self,
        punishment: &Punishment,
        key: &PunishmentKey,
        err: &EnforcementError,
    ) -> RepoResult<Outcome> {
        if err.is_transient() {
            match self
                .punishments
                .record_failed_attempt(key, punishment.until_ms)
                .await?
            {
                None => return Ok(Outcome::Superseded),
                Some(attempts) if attempts < self.settings.max_lift_attempts => {
                    warn!(key = %key, attempts, error = %err, "Lift failed, will retry");
                    return Ok(Outcome::RetainedForRetry);
                }
                Some(attempts) => {
                    warn!(key = %key, attempts, error = %err, "Lift failed, retry budget exhausted");
                }
            }
        } else {
            warn!(key = %key, error = %err, "Lift rejected, dropping punishment");
        }

        if let Some(superseded) = self.clear(key, punishment.until_ms).await? {
            return Ok(superseded);
        }
        self.audit
            .record(
                &punishment.guild_id,
                &format!("Failed to lift expired ban on <@{}>: {err}", punishment.user_id),
            )
            .await;
        Ok(Outcome::DroppedAfterFailure)
    }

    /// Delete the snapshot's record
    ///
    /// Returns `Some(Outcome::Superseded)` when the stored record no longer
    /// matches the snapshot, i.e. it was re-issued or removed mid-sweep.
    async fn clear(&self, key: &PunishmentKey, until_ms: i64) -> RepoResult<Option<Outcome>> {
        if self.punishments.resolve(key, until_ms).await? {
            Ok(None)
        } else {
            info!(key = %key, "Punishment changed during sweep, keeping current record");
            Ok(Some(Outcome::Superseded))
        }
    }

    /// Run sweeps on a fixed period until the returned handle is shut down
    ///
    /// The first sweep runs immediately so expiries missed while the process
    /// was down are handled at startup.
    pub fn spawn(self) -> ReconcilerHandle {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let period = self.settings.period;

        let task = tokio::spawn(async move {
            let mut timer = interval(period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX), "Reconciler started");

            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        info!("Reconciler received shutdown signal");
                        break;
                    }
                    _ = timer.tick() => {
                        if let Err(e) = self.run_once().await {
                            error!(error = %e, "Reconciliation sweep failed");
                        }
                    }
                }
            }

            info!("Reconciler stopped");
        });

        ReconcilerHandle { shutdown_tx, task }
    }
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Handle to a spawned reconciler task
pub struct ReconcilerHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl ReconcilerHandle {
    /// Stop the loop and wait for it to exit
    ///
    /// A sweep already in progress finishes its snapshot first.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        if let Err(e) = self.task.await {
            error!(error = %e, "Reconciler task ended abnormally");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
