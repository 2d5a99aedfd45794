//! CLI engine: argument parsing, command handlers, progress display

pub mod arg_parser;
pub mod cli;
pub mod handlers;
pub mod progress;

// Re-export commonly used functions
pub use arg_parser::{AddLogArgs, AnalyzeArgs, Cli, Commands};
pub use cli::handle_run;
pub use handlers::{handle_add_log, handle_analyze};
