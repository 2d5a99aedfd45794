//! Public types for the loganalyzer API: descriptors in, outcomes out, batch options.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::error::ClassifiedError;

/// One configured log source. Read-only to the analyzer; `log_type` is carried through but not dispatched on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogDescriptor {
    pub id: String,
    pub path: String,
    #[serde(rename = "type")]
    pub log_type: String,
}

impl LogDescriptor {
    pub fn new(id: impl Into<String>, path: impl Into<String>, log_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            log_type: log_type.into(),
        }
    }
}

/// Outcome status. Serializes as `"OK"` / `"FAILED"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    #[value(name = "OK")]
    Ok,
    #[value(name = "FAILED")]
    Failed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Failed => "FAILED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message recorded on a fully successful analysis.
pub const SUCCESS_MESSAGE: &str = "Analysis completed successfully.";

/// Classified result of analyzing one descriptor.
///
/// The analyzer creates outcomes only through [`AnalysisOutcome::ok`] and [`AnalysisOutcome::failed`],
/// which keep `status == Failed` iff `error_details` is non-empty. Fields are public and the type
/// deserializes, so an outcome built or loaded elsewhere is not checked; use
/// [`AnalysisOutcome::is_consistent`] on such values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub log_id: String,
    pub file_path: String,
    pub status: Status,
    pub message: String,
    pub error_details: String,
}

impl AnalysisOutcome {
    pub fn ok(descriptor: &LogDescriptor) -> Self {
        Self {
            log_id: descriptor.id.clone(),
            file_path: descriptor.path.clone(),
            status: Status::Ok,
            message: SUCCESS_MESSAGE.to_string(),
            error_details: String::new(),
        }
    }

    pub fn failed(descriptor: &LogDescriptor, err: &ClassifiedError) -> Self {
        Self {
            log_id: descriptor.id.clone(),
            file_path: descriptor.path.clone(),
            status: Status::Failed,
            message: err.summary().to_string(),
            error_details: err.to_string(),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == Status::Failed
    }

    /// `FAILED` exactly when `error_details` is non-empty.
    pub fn is_consistent(&self) -> bool {
        self.is_failed() != self.error_details.is_empty()
    }
}

/// How many worker threads a batch may use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Concurrency {
    /// One thread per descriptor, all launched immediately.
    #[default]
    Unbounded,
    /// Fixed pool of `n` threads pulling descriptors from a job queue. `n` is clamped to at least 1.
    Bounded(usize),
}

/// Options for [`analyze_batch_with`](crate::analyze_batch_with).
#[derive(Clone, Debug, Default)]
pub struct BatchOpts {
    /// Keep only outcomes with this status. `None` keeps everything.
    pub status_filter: Option<Status>,
    pub concurrency: Concurrency,
    /// Seed for per-item RNGs (item `i` uses `seed + i`). `None` seeds each item from entropy.
    pub seed: Option<u64>,
}

/// Full CLI options for the `analyze` command (settings file + flags merged).
#[derive(Clone, Debug, Default)]
pub struct Opts {
    pub config_path: PathBuf,
    /// Report destination before timestamping. When None, no JSON is written.
    pub output: Option<PathBuf>,
    pub status_filter: Option<Status>,
    /// Worker pool size. When None, one thread per descriptor.
    pub workers: Option<usize>,
    pub seed: Option<u64>,
    /// Show progress bar and debug logging.
    pub verbose: bool,
}

impl From<&Opts> for BatchOpts {
    fn from(o: &Opts) -> Self {
        BatchOpts {
            status_filter: o.status_filter,
            concurrency: match o.workers {
                Some(n) => Concurrency::Bounded(n),
                None => Concurrency::Unbounded,
            },
            seed: o.seed,
        }
    }
}
