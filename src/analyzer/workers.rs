//! Worker spawning: one thread per descriptor, or a fixed pool draining a job queue. Plus the supervisor.

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender, bounded};
use log::{debug, warn};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::item::{analyze_item_guarded, item_rng};
use super::policy::AnalysisPolicy;
use crate::{AnalysisOutcome, LogDescriptor};

/// Spawn one thread per descriptor. Each analyzes its descriptor, sends one outcome, and exits.
pub fn spawn_item_tasks(
    descriptors: &[LogDescriptor],
    outcome_tx: &Sender<AnalysisOutcome>,
    policy: &Arc<dyn AnalysisPolicy>,
    seed: Option<u64>,
) -> Result<Vec<JoinHandle<()>>> {
    descriptors
        .iter()
        .enumerate()
        .map(|(index, descriptor)| {
            let descriptor = descriptor.clone();
            let outcome_tx = outcome_tx.clone();
            let policy = Arc::clone(policy);
            thread::Builder::new()
                .name(format!("analyze-{index}"))
                .spawn(move || {
                    let mut rng = item_rng(seed, index);
                    let outcome = analyze_item_guarded(&descriptor, policy.as_ref(), &mut rng);
                    let _ = outcome_tx.send(outcome);
                })
                .with_context(|| format!("spawn analysis thread for '{}'", descriptors[index].id))
        })
        .collect()
}

/// Single pool worker: take jobs until the queue is empty and closed, send one outcome per job.
fn pool_worker_loop(
    job_rx: Receiver<(usize, LogDescriptor)>,
    outcome_tx: Sender<AnalysisOutcome>,
    policy: Arc<dyn AnalysisPolicy>,
    seed: Option<u64>,
) {
    while let Ok((index, descriptor)) = job_rx.recv() {
        let mut rng = item_rng(seed, index);
        let outcome = analyze_item_guarded(&descriptor, policy.as_ref(), &mut rng);
        if outcome_tx.send(outcome).is_err() {
            break;
        }
    }
}

/// Queue every descriptor, then spawn `num_threads` workers over the queue. The queue holds the
/// whole batch, so enqueueing never blocks and workers see it close once it drains.
pub fn spawn_pool_workers(
    descriptors: &[LogDescriptor],
    num_threads: usize,
    outcome_tx: &Sender<AnalysisOutcome>,
    policy: &Arc<dyn AnalysisPolicy>,
    seed: Option<u64>,
) -> Result<Vec<JoinHandle<()>>> {
    let (job_tx, job_rx) = bounded::<(usize, LogDescriptor)>(descriptors.len().max(1));
    for job in descriptors.iter().cloned().enumerate() {
        job_tx
            .send(job)
            .map_err(|_| anyhow::anyhow!("job queue closed before workers started"))?;
    }
    drop(job_tx);

    (0..num_threads)
        .map(|worker_id| {
            let job_rx = job_rx.clone();
            let outcome_tx = outcome_tx.clone();
            let policy = Arc::clone(policy);
            thread::Builder::new()
                .name(format!("analyze-pool-{worker_id}"))
                .spawn(move || pool_worker_loop(job_rx, outcome_tx, policy, seed))
                .context("spawn analysis pool worker")
        })
        .collect()
}

/// Spawn the supervisor: joins every worker, then drops `outcome_tx`, the last sender, which
/// closes the outcome channel. Returns the number of workers that panicked.
pub fn spawn_supervisor(
    workers: Vec<JoinHandle<()>>,
    outcome_tx: Sender<AnalysisOutcome>,
) -> Result<JoinHandle<usize>> {
    thread::Builder::new()
        .name("analyze-supervisor".to_string())
        .spawn(move || {
            let total = workers.len();
            let panicked = workers
                .into_iter()
                .map(JoinHandle::join)
                .filter(std::result::Result::is_err)
                .count();
            drop(outcome_tx);
            if panicked > 0 {
                warn!("{} of {} analysis threads panicked", panicked, total);
            }
            debug!("supervisor: {} workers joined, closing outcome stream", total);
            panicked
        })
        .context("spawn analysis supervisor")
}
