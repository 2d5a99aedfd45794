use colored::{ColoredString, Colorize};
use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;

/// Console colors for outcome lines in the summary.
pub struct Colors;

impl Colors {
    pub fn ok(s: &str) -> ColoredString {
        s.green()
    }

    pub fn failed(s: &str) -> ColoredString {
        s.red()
    }

    pub fn label(s: &str) -> ColoredString {
        s.cyan().bold()
    }
}

/// Install the env_logger backend. Dependencies log at Warn; this crate at Info, or Debug when `verbose`.
/// Call once, from the CLI only.
pub fn setup_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    Builder::from_default_env()
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_PKG_NAME"), level)
        .format(|buf, record| {
            let name = env!("CARGO_PKG_NAME");
            let line = match record.level() {
                Level::Error | Level::Warn => {
                    let level_str = match record.level() {
                        Level::Warn => "WARN".yellow(),
                        _ => "ERROR".red(),
                    };
                    let target = record.target().to_string().white();
                    format!("[{} {} {}] {}", name.cyan(), level_str, target, record.args())
                }
                _ => format!("[{}] {}", name.cyan(), record.args()),
            };
            writeln!(buf, "{}", line)
        })
        .init();
}
