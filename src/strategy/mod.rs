//! Processing strategy module for purchase processing
//!
//! This module defines the Strategy pattern for complete purchase processing
//! pipelines, encompassing both CSV parsing and purchase validation. This allows
//! different processing implementations (synchronous, asynchronous batch) to be
//! selected at runtime.

use crate::cli::StrategyType;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete purchase processing pipelines
///
/// Each strategy reads purchases from a CSV file, validates and settles them
/// against an account ledger, and writes the final account summaries to output.
pub trait ProcessingStrategy: Send + Sync {
    /// Process purchases from input file and write results to output
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the input CSV file containing purchase lines
    /// * `output` - Mutable reference to a writer for outputting account summaries
    ///
    /// # Returns
    ///
    /// * `Ok(())` if all processing completed (rejected purchases included)
    /// * `Err(String)` if a fatal error occurred (file not found, I/O error, etc.)
    ///
    /// Rejected purchases and malformed lines are logged and do not cause this
    /// method to return an error.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional configuration for async batch processing (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}
