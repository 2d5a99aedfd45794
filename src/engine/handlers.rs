//! Command handlers for analyze and add-log.

use anyhow::{Context, Result};
use chrono::Local;
use log::{debug, info};
use std::path::Path;
use std::sync::Arc;

use crate::analyzer::{SimulatedPolicy, collect_outcomes, run_batch};
use crate::config::{append_descriptor, load_descriptors};
use crate::engine::arg_parser::{AddLogArgs, AnalyzeArgs};
use crate::engine::progress::{create_progress_bar, finish_progress_bar, update_progress_bar};
use crate::report::{Summary, export_json, render_summary, timestamped_path};
use crate::utils::settings_toml::{SettingsToml, apply_file_to_opts, load_settings_toml};
use crate::utils::{Colors, setup_logging};
use crate::{AnalysisOutcome, BatchOpts, LogDescriptor, Opts};

/// Settings file values first, then any flag the user passed on top.
fn merge_opts(args: &AnalyzeArgs, file: Option<&SettingsToml>) -> Opts {
    let mut opts = Opts {
        config_path: args.config.clone(),
        ..Default::default()
    };
    if let Some(file) = file {
        apply_file_to_opts(file, &mut opts);
    }
    if args.output.is_some() {
        opts.output = args.output.clone();
    }
    if args.status.is_some() {
        opts.status_filter = args.status;
    }
    if args.workers.is_some() {
        opts.workers = args.workers;
    }
    if args.seed.is_some() {
        opts.seed = args.seed;
    }
    if let Some(v) = args.verbose {
        opts.verbose = v;
    }
    opts
}

/// Load the settings file from the current dir, merge with flags, install the logger.
fn setup_opts(args: &AnalyzeArgs) -> Opts {
    let file = load_settings_toml(Path::new("."));
    let opts = merge_opts(args, file.as_ref());
    setup_logging(opts.verbose);
    opts
}

/// Analyze every configured log, print the summary, optionally export JSON.
pub fn handle_analyze(args: &AnalyzeArgs) -> Result<()> {
    let opts = setup_opts(args);
    debug!("{:#?}", opts);
    info!("Starting log analysis...");

    let descriptors = load_descriptors(&opts.config_path).context("load configuration")?;
    info!("Configuration loaded: {} logs to analyze", descriptors.len());

    let outcomes = analyze(&descriptors, &opts)?;
    print!("{}", render_summary(&outcomes));

    if let Some(ref output) = opts.output {
        let path = timestamped_path(output, Local::now().date_naive());
        export_json(&outcomes, &path).context("export report")?;
        println!("Report exported to: {}", path.display());
    }
    Ok(())
}

/// Run the batch with the simulated policy, ticking a progress bar per outcome when verbose.
fn analyze(descriptors: &[LogDescriptor], opts: &Opts) -> Result<Vec<AnalysisOutcome>> {
    let batch = BatchOpts::from(opts);
    let handles = run_batch(descriptors, &batch, Arc::new(SimulatedPolicy::default()))?;

    let mut bar = opts
        .verbose
        .then(|| create_progress_bar(handles.expected, "Analyzing"));
    let mut tick = |_: &AnalysisOutcome| {
        if let Some(b) = bar.as_mut() {
            update_progress_bar(b, 1);
        }
    };
    let outcomes = collect_outcomes(handles, batch.status_filter, Some(&mut tick))?;
    if let Some(b) = bar.as_mut() {
        finish_progress_bar(b);
    }

    let s = Summary::from_outcomes(&outcomes);
    debug!("kept {} outcomes ({} ok, {} failed)", s.total, s.ok, s.failed);
    Ok(outcomes)
}

/// Append one descriptor to an existing configuration file.
pub fn handle_add_log(args: &AddLogArgs) -> Result<()> {
    setup_logging(false);
    let descriptor = LogDescriptor::new(&args.id, &args.path, &args.log_type);
    append_descriptor(&args.file, descriptor)?;
    println!(
        "{} log '{}' added to '{}'",
        Colors::label("Added"),
        args.id,
        args.file.display()
    );
    println!("   path: {}", args.path);
    println!("   type: {}", args.log_type);
    Ok(())
}
