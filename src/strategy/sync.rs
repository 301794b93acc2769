//! Synchronous processing strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ProcessingStrategy trait. It orchestrates purchase processing by coordinating
//! between the SyncReader (for CSV input) and a PurchaseValidator backed by an
//! AccountLedger (for business logic).
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - CSV parsing and grouping to `SyncReader` (iterator interface)
//! - Pricing and policy to `PurchaseValidator`
//! - Settlement bookkeeping to `AccountLedger`
//! - CSV output to `csv_format::write_accounts_csv`
//!
//! # Memory Efficiency
//!
//! Purchases are read one at a time. Memory usage is O(accounts), not
//! O(purchases).

use crate::core::{AccountLedger, PurchaseValidator};
use crate::io::csv_format::write_accounts_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use std::io::Write;
use std::path::Path;
use tracing::warn;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use rust_ticket_service::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy;
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("purchases.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Process purchases from input file and write results to output
    ///
    /// 1. Creates an AccountLedger and a PurchaseValidator over it
    /// 2. Streams purchases from the CSV file through the validator
    /// 3. Writes the ledger's account summaries to output
    ///
    /// Fatal errors (file not found, I/O errors) are returned immediately.
    /// Rejected purchases are logged and processing continues.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let ledger = AccountLedger::new();
        let validator = PurchaseValidator::new(&ledger, &ledger);

        let reader = SyncReader::new(input_path).map_err(|e| e.to_string())?;

        for result in reader {
            match result {
                Ok(record) => {
                    if let Err(e) = validator.purchase(record.account, &record.requests) {
                        warn!(
                            purchase = record.purchase,
                            account = record.account,
                            error = %e,
                            "purchase rejected"
                        );
                    }
                }
                Err(e) => {
                    warn!(error = %e, "skipping unreadable purchase");
                }
            }
        }

        write_accounts_csv(&ledger.get_all_accounts(), output)?;

        Ok(())
    }
}
