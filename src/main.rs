//! Loganalyzer CLI: analyze configured logs concurrently; add-log appends a descriptor.

use anyhow::Result;
use clap::Parser;
use loganalyzer::engine::arg_parser::Cli;
use loganalyzer::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
