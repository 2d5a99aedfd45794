use anyhow::Result;
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;

use super::context::{BatchHandles, create_batch_channels};
use super::item::lost_outcome;
use super::policy::AnalysisPolicy;
use super::workers::{spawn_item_tasks, spawn_pool_workers, spawn_supervisor};
use crate::{AnalysisOutcome, BatchOpts, Concurrency, LogDescriptor, Status};

/// Worker thread count for `concurrency` over `task_count` descriptors.
/// Unbounded: one per descriptor. Bounded: clamped to `1..=task_count`.
pub fn resolve_thread_count(concurrency: Concurrency, task_count: usize) -> usize {
    match concurrency {
        Concurrency::Unbounded => task_count,
        Concurrency::Bounded(n) => n.clamp(1, task_count.max(1)),
    }
}

/// Start the batch: fan out workers, then a supervisor that closes the outcome stream once all
/// of them finish. Caller drains `outcome_rx` and joins `supervisor` (see [`collect_outcomes`]).
///
/// Fails only if the OS refuses to spawn a thread; already-running workers still finish.
pub fn run_batch(
    descriptors: &[LogDescriptor],
    opts: &BatchOpts,
    policy: Arc<dyn AnalysisPolicy>,
) -> Result<BatchHandles> {
    let expected = descriptors.len();
    let channels = create_batch_channels(expected);

    let workers = match opts.concurrency {
        Concurrency::Unbounded => {
            spawn_item_tasks(descriptors, &channels.outcome_tx, &policy, opts.seed)?
        }
        Concurrency::Bounded(_) => {
            let n = resolve_thread_count(opts.concurrency, expected);
            spawn_pool_workers(descriptors, n, &channels.outcome_tx, &policy, opts.seed)?
        }
    };
    let num_threads = workers.len();
    debug!(
        "Analyzing {} logs on {} threads ({:?})",
        expected, num_threads, opts.concurrency
    );

    // Supervisor owns the last sender; the channel closes when it drops it.
    let supervisor = spawn_supervisor(workers, channels.outcome_tx)?;

    Ok(BatchHandles {
        outcome_rx: channels.outcome_rx,
        supervisor,
        expected,
        descriptors: descriptors.to_vec(),
        num_threads,
    })
}

/// True when `outcome` passes `filter` (`None` keeps everything).
pub fn matches_filter(outcome: &AnalysisOutcome, filter: Option<Status>) -> bool {
    filter.is_none_or(|s| outcome.status == s)
}

/// Drain the outcome stream until it closes, keeping outcomes that match `filter`. `on_outcome`
/// sees every outcome before filtering (e.g. to tick a progress bar). Arrival order is completion
/// order, not input order.
///
/// A descriptor whose worker died without sending gets a `FAILED` outcome here, so the result
/// always covers the whole batch.
pub fn collect_outcomes(
    handles: BatchHandles,
    filter: Option<Status>,
    mut on_outcome: Option<&mut dyn FnMut(&AnalysisOutcome)>,
) -> Result<Vec<AnalysisOutcome>> {
    let BatchHandles {
        outcome_rx,
        supervisor,
        expected,
        descriptors,
        num_threads: _,
    } = handles;

    // Outcomes still owed per id; ids may repeat when the caller skips validation.
    let mut owed: HashMap<&str, usize> = HashMap::with_capacity(expected);
    for d in &descriptors {
        *owed.entry(d.id.as_str()).or_default() += 1;
    }
    let mut outcomes = Vec::with_capacity(expected);
    let mut keep = |outcome: AnalysisOutcome| {
        if let Some(cb) = on_outcome.as_mut() {
            cb(&outcome);
        }
        if matches_filter(&outcome, filter) {
            outcomes.push(outcome);
        }
    };

    let mut received = 0usize;
    while let Ok(outcome) = outcome_rx.recv() {
        match owed.get_mut(outcome.log_id.as_str()) {
            Some(n) if *n > 0 => {
                *n -= 1;
                received += 1;
                keep(outcome);
            }
            _ => warn!("Dropping unexpected outcome for '{}'", outcome.log_id),
        }
    }
    debug!("main: outcome channel closed, {} received", received);

    let panicked = supervisor
        .join()
        .map_err(|_| anyhow::anyhow!("supervisor thread panicked"))?;

    if received < expected {
        warn!(
            "{} of {} logs produced no outcome ({} threads panicked); recording them as failed",
            expected - received,
            expected,
            panicked
        );
        for d in &descriptors {
            if let Some(n) = owed.get_mut(d.id.as_str())
                && *n > 0
            {
                *n -= 1;
                keep(lost_outcome(d, "analysis ended without an outcome"));
            }
        }
    }
    Ok(outcomes)
}
