//! Batch channels and handles: the single collection point every task hands its outcome to.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::thread::JoinHandle;

use crate::{AnalysisOutcome, LogDescriptor};

/// Outcome channel pair. Capacity is at least the task count so no producer ever blocks on send.
pub struct BatchChannels {
    pub outcome_tx: Sender<AnalysisOutcome>,
    pub outcome_rx: Receiver<AnalysisOutcome>,
}

pub fn create_batch_channels(task_count: usize) -> BatchChannels {
    let (outcome_tx, outcome_rx) = bounded::<AnalysisOutcome>(task_count.max(1));
    BatchChannels {
        outcome_tx,
        outcome_rx,
    }
}

/// Handles returned by [`run_batch`](super::run_batch): drain `outcome_rx` until it closes, then join `supervisor`.
/// `supervisor` yields the number of worker threads that panicked.
pub struct BatchHandles {
    pub outcome_rx: Receiver<AnalysisOutcome>,
    pub supervisor: JoinHandle<usize>,
    /// Outcomes the batch will produce (= descriptor count).
    pub expected: usize,
    /// The batch input, so an outcome missing at close can be filled in for its descriptor.
    pub descriptors: Vec<LogDescriptor>,
    /// Worker threads launched.
    pub num_threads: usize,
}
