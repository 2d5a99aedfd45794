//! Concurrent analysis: accessibility check, pluggable policy, per-item analyzer, fan-out/fan-in orchestrator.

pub mod access;
pub mod context;
pub mod item;
pub mod orchestrator;
pub mod policy;
pub mod workers;

pub use access::check_accessible;
pub use context::{BatchChannels, BatchHandles, create_batch_channels};
pub use item::{analyze_item, analyze_item_guarded, item_rng, lost_outcome};
pub use orchestrator::{collect_outcomes, matches_filter, resolve_thread_count, run_batch};
pub use policy::{AnalysisPolicy, SimulatedPolicy};
pub use workers::{spawn_item_tasks, spawn_pool_workers, spawn_supervisor};
