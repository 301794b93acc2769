//! Asynchronous batch processing strategy
//!
//! This module provides an asynchronous, multi-threaded implementation of the
//! ProcessingStrategy trait. It processes purchases in batches using
//! thread-based parallelism with account-based partitioning.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading, purchases carried across batches)
//!     ├── BatchProcessor (account partitioning + tokio tasks)
//!     └── PurchaseValidator (shared, thread-safe)
//!         └── AsyncAccountLedger (payment + reservation, DashMap)
//! ```
//!
//! # Ordering
//!
//! Batches are processed one after another. Within a batch, purchases of
//! different accounts run in parallel while purchases of the same account keep
//! file order.

use crate::core::r#async::{AsyncAccountLedger, BatchProcessor};
use crate::core::PurchaseValidator;
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_accounts_csv;
use crate::strategy::ProcessingStrategy;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Configuration for batch processing
///
/// Controls how many purchases are read per batch and the number of worker
/// threads settling each batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of purchases per batch
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// A zero value falls back to its default with a warning.
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                max_concurrent_batches,
                default = default.max_concurrent_batches,
                "invalid max concurrent batches, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy with the specified configuration
    ///
    /// Zero values fall back to their defaults, also for configs built as
    /// struct literals.
    pub fn new(config: BatchConfig) -> Self {
        Self {
            config: BatchConfig::new(config.batch_size, config.max_concurrent_batches),
        }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process purchases from input file and write results to output
    ///
    /// 1. Builds a multi-threaded tokio runtime with the configured worker count
    /// 2. Creates a shared AsyncAccountLedger and a PurchaseValidator over it
    /// 3. Reads purchases in batches with AsyncReader
    /// 4. Settles each batch through the BatchProcessor before reading the next
    /// 5. Writes the ledger's account summaries to output
    ///
    /// Fatal errors (file not found, runtime errors) are returned immediately.
    /// Rejected purchases are logged and processing continues.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let ledger = Arc::new(AsyncAccountLedger::new());
            let validator = Arc::new(PurchaseValidator::new(
                Arc::clone(&ledger),
                Arc::clone(&ledger),
            ));
            let processor = BatchProcessor::new(validator);

            let file = tokio::fs::File::open(input_path).await.map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    format!("File not found: {}", input_path.display())
                } else {
                    format!("I/O error: {}", e)
                }
            })?;

            // csv-async reads futures::io, tokio files need the compat layer
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                for processed in processor.process_batch(batch).await {
                    if let Err(e) = processed.result {
                        warn!(
                            purchase = processed.record.purchase,
                            account = processed.record.account,
                            error = %e,
                            "purchase rejected"
                        );
                    }
                }
            }

            write_accounts_csv(&ledger.get_all_accounts(), output)?;

            Ok(())
        })
    }
}
