//! Manual overrides applied between runs.
//!
//! Runs are never patched in place. An override only edits the inputs (job
//! locks and the client affinity map); the caller then schedules again from
//! scratch.

use crate::domain::{Pool, Snapshot};
use crate::error::{PlannerError, Result};
use crate::scheduler::Allocation;

/// Move future work of an allocated job to `worker_id`.
///
/// Mechanic allocations rewrite the client's affinity (so the client's other
/// jobs follow) and, with `lock`, pin this job. Electrical allocations have no
/// affinity tier, so only `lock` has an effect there.
pub fn reassign(snapshot: &mut Snapshot, allocation: &Allocation, worker_id: &str, lock: bool) -> Result<()> {
    if snapshot.team.find(allocation.pool, worker_id).is_none() {
        return Err(PlannerError::WorkerNotFound(worker_id.to_string()));
    }

    let job = snapshot.job_mut(&allocation.job_id)?;
    let client = job.client_key();
    if lock {
        job.set_lock(allocation.pool, Some(worker_id));
    }
    let job_id = job.id.clone();

    match allocation.pool {
        Pool::Mechanic => {
            snapshot.client_affinity.assign(&client, worker_id);
            log::info!(
                "Client '{}' reassigned to mechanic {} (job {}, lock: {})",
                client,
                worker_id,
                job_id,
                lock
            );
        }
        Pool::Electrical if lock => {
            log::info!("Job {} locked to electrician {}", job_id, worker_id);
        }
        Pool::Electrical => {
            log::debug!("Electrical reassignment of job {} without lock has no effect", job_id);
        }
    }
    Ok(())
}

/// Pin the allocation's job to the worker already doing it.
pub fn lock_to_current(snapshot: &mut Snapshot, allocation: &Allocation) -> Result<()> {
    reassign(snapshot, allocation, &allocation.worker_id, true)
}

/// Clear the lock of a job for one pool.
pub fn unlock(snapshot: &mut Snapshot, job_id: &str, pool: Pool) -> Result<()> {
    snapshot.job_mut(job_id)?.set_lock(pool, None);
    Ok(())
}
