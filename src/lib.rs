//! Loganalyzer: concurrent analysis of configured log sources with classified per-source outcomes.

pub mod analyzer;
pub mod config;
pub mod engine;
pub mod error;
pub mod report;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use error::ClassifiedError;
pub use types::*;

use log::debug;
use std::sync::Arc;

use analyzer::{AnalysisPolicy, SimulatedPolicy};

/// Result alias used by public loganalyzer API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Analyze every descriptor concurrently (one thread each, simulated policy) and return the
/// outcomes whose status equals `status_filter`, or all of them when it is `None`.
///
/// Exactly one outcome is produced per descriptor before filtering; output order is completion
/// order. Per-item failures never surface as `Err`; see [`analyze_batch_with`].
pub fn analyze_batch(
    descriptors: &[LogDescriptor],
    status_filter: Option<Status>,
) -> Result<Vec<AnalysisOutcome>> {
    let opts = BatchOpts {
        status_filter,
        ..Default::default()
    };
    analyze_batch_with(descriptors, &opts, Arc::new(SimulatedPolicy::default()))
}

/// Same as [`analyze_batch`] with explicit concurrency, seed, and analysis policy.
///
/// Returns `Err` only when a worker thread cannot be spawned.
///
/// ```no_run
/// use std::sync::Arc;
/// use loganalyzer::{BatchOpts, Concurrency, LogDescriptor, Status, analyzer::SimulatedPolicy};
///
/// let logs = vec![LogDescriptor::new("web-1", "/var/log/nginx/access.log", "nginx")];
/// let opts = BatchOpts { status_filter: Some(Status::Failed), concurrency: Concurrency::Bounded(4), seed: Some(7) };
/// let failed = loganalyzer::analyze_batch_with(&logs, &opts, Arc::new(SimulatedPolicy::default()))?;
/// # Ok::<(), loganalyzer::Error>(())
/// ```
pub fn analyze_batch_with(
    descriptors: &[LogDescriptor],
    opts: &BatchOpts,
    policy: Arc<dyn AnalysisPolicy>,
) -> Result<Vec<AnalysisOutcome>> {
    debug!(
        "{} BATCH:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );
    let handles = analyzer::run_batch(descriptors, opts, policy)?;
    analyzer::collect_outcomes(handles, opts.status_filter, None)
}
