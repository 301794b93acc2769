// CLI module
// Command-line interface, argument parsing and log setup

mod args;

pub use args::{CliArgs, StrategyType};

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Parse command-line arguments using clap
///
/// On invalid arguments or `--help`, clap prints the message and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Install the global tracing subscriber
///
/// Logs go to stderr so stdout carries only the CSV output. `RUST_LOG` takes
/// precedence over `default_filter` when it is set.
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
