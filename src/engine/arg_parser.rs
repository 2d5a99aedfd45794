use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::Status;

/// Concurrent log source analyzer.
#[derive(Clone, Parser)]
#[command(name = "loganalyzer", version)]
#[command(about = "Analyze configured log sources concurrently and report per-source outcomes.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Subcommand)]
pub enum Commands {
    /// Analyze every log in a JSON configuration in parallel.
    Analyze(AnalyzeArgs),
    /// Append one log descriptor to an existing JSON configuration.
    AddLog(AddLogArgs),
}

#[derive(Clone, Args)]
pub struct AnalyzeArgs {
    /// JSON configuration: array of {"id", "path", "type"}.
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: PathBuf,

    /// Export the report as JSON. The file name is prefixed with today's date (YYMMDD_).
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Only report outcomes with this status.
    #[arg(long, value_enum)]
    pub status: Option<Status>,

    /// Bound concurrency to a pool of N worker threads. Default: one thread per log.
    #[arg(long, short = 'w', value_parser = clap::value_parser!(usize))]
    pub workers: Option<usize>,

    /// Seed the simulated analysis for reproducible runs.
    #[arg(long, value_parser = clap::value_parser!(u64))]
    pub seed: Option<u64>,

    /// Verbose output (debug logging and a progress bar).
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}

#[derive(Clone, Args)]
pub struct AddLogArgs {
    /// Unique log identifier.
    #[arg(long)]
    pub id: String,

    /// Path to the log file.
    #[arg(long)]
    pub path: String,

    /// Log type (e.g. nginx, apache-access, syslog).
    #[arg(long = "type", value_name = "TYPE")]
    pub log_type: String,

    /// JSON configuration to append to. Must already exist.
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_flags_parse() {
        let cli = Cli::try_parse_from([
            "loganalyzer", "analyze", "-c", "logs.json", "-o", "out/r.json", "--status", "FAILED",
            "-w", "4", "--seed", "11", "-v",
        ])
        .unwrap();
        let Commands::Analyze(a) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(a.config, PathBuf::from("logs.json"));
        assert_eq!(a.output, Some(PathBuf::from("out/r.json")));
        assert_eq!(a.status, Some(Status::Failed));
        assert_eq!(a.workers, Some(4));
        assert_eq!(a.seed, Some(11));
        assert_eq!(a.verbose, Some(true));
    }

    #[test]
    fn analyze_requires_config_and_known_status() {
        assert!(Cli::try_parse_from(["loganalyzer", "analyze"]).is_err());
        assert!(
            Cli::try_parse_from(["loganalyzer", "analyze", "-c", "x.json", "--status", "MAYBE"])
                .is_err()
        );
    }

    #[test]
    fn add_log_requires_all_flags() {
        let cli = Cli::try_parse_from([
            "loganalyzer", "add-log", "--id", "web-3", "--path", "/var/log/a.log", "--type",
            "apache-access", "--file", "config.json",
        ])
        .unwrap();
        let Commands::AddLog(a) = cli.command else {
            panic!("expected add-log");
        };
        assert_eq!(a.log_type, "apache-access");
        assert!(Cli::try_parse_from(["loganalyzer", "add-log", "--id", "x"]).is_err());
    }
}
