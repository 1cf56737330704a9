//! Plan executor - applies a sync plan against a remote, tracking partial failure

use crate::error::RemoteError;
use crate::remote::RemoteService;
use crate::types::{RemoteDeclaration, SyncPlan, SyncResult};
use std::fmt;

/// The two execution phases, always run in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// One bulk call covering every update
    BulkUpdate,
    /// One call per created variable
    Create,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::BulkUpdate => write!(f, "bulk update"),
            Phase::Create => write!(f, "create"),
        }
    }
}

/// Progress callback for execution operations
///
/// Implement this trait to receive progress updates during execution.
pub trait ProgressCallback {
    /// Called before a phase issues its first remote call
    fn on_phase_start(&mut self, phase: Phase, count: usize);

    /// Called after each create call returns
    fn on_create_complete(&mut self, key: &str, result: Result<&RemoteDeclaration, &RemoteError>);

    /// Called when a phase completes
    fn on_phase_complete(&mut self, phase: Phase, result: &SyncResult);
}

/// No-op progress callback
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_phase_start(&mut self, _phase: Phase, _count: usize) {}
    fn on_create_complete(
        &mut self,
        _key: &str,
        _result: Result<&RemoteDeclaration, &RemoteError>,
    ) {
    }
    fn on_phase_complete(&mut self, _phase: Phase, _result: &SyncResult) {}
}

/// Execute a plan against `remote`.
///
/// Updates go out first as a single bulk call; creates follow one at a time.
/// Nothing is retried and nothing aborts early: a failed bulk call counts
/// every update as failed, a failed create is recorded and the loop moves on.
/// Already-applied writes are never rolled back.
pub fn execute<R, P>(
    plan: &SyncPlan,
    resource_id: &str,
    remote: &R,
    progress: &mut P,
) -> SyncResult
where
    R: RemoteService + ?Sized,
    P: ProgressCallback,
{
    let mut result = SyncResult::default();

    if !plan.to_update.is_empty() {
        progress.on_phase_start(Phase::BulkUpdate, plan.to_update.len());

        match remote.bulk_update(resource_id, &plan.to_update) {
            Ok(()) => {
                result.updated = plan.to_update.len();
                log::info!("Updated {} variables on {}", result.updated, resource_id);
            }
            Err(e) => {
                // The remote gives no per-item outcome, so count them all
                result.failed += plan.to_update.len();
                log::warn!(
                    "Bulk update of {} variables on {} failed: {}",
                    plan.to_update.len(),
                    resource_id,
                    e.in_context("bulk update")
                );
            }
        }

        progress.on_phase_complete(Phase::BulkUpdate, &result);
    }

    if !plan.to_create.is_empty() {
        progress.on_phase_start(Phase::Create, plan.to_create.len());

        for request in &plan.to_create {
            match remote.create(resource_id, request) {
                Ok(created) => {
                    result.created += 1;
                    log::info!("Created {} ({})", request.key, created.identity);
                    progress.on_create_complete(&request.key, Ok(&created));
                }
                Err(e) => {
                    let e = e.in_context(format!("create {}", request.key));
                    log::warn!("{e}");
                    result.record_failure(&request.key, e.message.clone());
                    progress.on_create_complete(&request.key, Err(&e));
                }
            }
        }

        progress.on_phase_complete(Phase::Create, &result);
    }

    result
}

/// Simple execution without callbacks
pub fn execute_simple<R: RemoteService + ?Sized>(
    plan: &SyncPlan,
    resource_id: &str,
    remote: &R,
) -> SyncResult {
    execute(plan, resource_id, remote, &mut NoProgress)
}
