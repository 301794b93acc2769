use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Validate and settle ticket purchases
#[derive(Parser, Debug)]
#[command(name = "ticket-service")]
#[command(about = "Validate ticket purchases and settle payment and seat reservations", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing purchase lines
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Processing strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of purchases per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of purchases per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of worker threads settling each batch (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Log filter used when RUST_LOG is not set
    #[arg(
        long = "log-level",
        value_name = "FILTER",
        default_value = "warn",
        help = "Log filter for stderr output, e.g. 'warn' or 'rust_ticket_service=debug'"
    )]
    pub log_level: String,
}

/// Available processing strategies
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults; zero values fall back with a
    /// warning (see `BatchConfig::new`).
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }
}
