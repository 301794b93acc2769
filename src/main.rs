//! Rust Ticket Service CLI
//!
//! Command-line interface for validating and settling ticket purchases from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- purchases.csv > accounts.csv
//! cargo run -- --strategy sync purchases.csv > accounts.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 purchases.csv > accounts.csv
//! RUST_LOG=rust_ticket_service=debug cargo run -- purchases.csv > accounts.csv
//! ```
//!
//! The program reads purchase lines from the input CSV file, validates each
//! purchase, settles the accepted ones against the account ledger, and writes
//! the per-account totals to stdout. Rejected purchases are logged to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use rust_ticket_service::cli;
use rust_ticket_service::strategy;
use std::process;

fn main() {
    let args = cli::parse_args();
    cli::init_logging(&args.log_level);

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
