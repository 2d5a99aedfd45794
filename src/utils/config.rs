//! Application configuration constants.
//! Simulation tuning and file naming in one place.

use std::ops::RangeInclusive;
use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    settings_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                settings_filename: format!(".{pkg}.toml"),
            }
        })
    }

    /// Optional per-directory settings file (e.g. `.loganalyzer.toml`).
    pub fn settings_filename(&self) -> &str {
        &self.settings_filename
    }
}

// ---- Simulated analysis ----

/// Stand-in analysis policy tuning.
pub struct SimulationConsts;

impl SimulationConsts {
    /// Per-item processing delay, uniform, in milliseconds.
    pub const DELAY_MS: RangeInclusive<u64> = 50..=200;
    /// Independent per-invocation probability of a parsing failure.
    pub const FAILURE_PROBABILITY: f64 = 0.10;
    /// Reason recorded on a simulated parsing failure.
    pub const FAILURE_REASON: &'static str = "format de log non reconnu";
}

// ---- Report ----

/// `chrono` format for the report filename prefix (YYMMDD).
pub const REPORT_DATE_FORMAT: &str = "%y%m%d";
