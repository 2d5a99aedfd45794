//! CLI command dispatch: analyze runs a batch; add-log edits the configuration.

use anyhow::Result;

use crate::engine::arg_parser::{Cli, Commands};
use crate::engine::handlers::{handle_add_log, handle_analyze};

/// Run the parsed subcommand.
pub fn handle_run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Analyze(args) => handle_analyze(args),
        Commands::AddLog(args) => handle_add_log(args),
    }
}
