//! Batch processing with account-based partitioning for async purchase processing
//!
//! This module provides the `BatchProcessor` struct, which settles a batch of
//! purchases concurrently while keeping the purchases of each account in file
//! order.
//!
//! # Design
//!
//! A batch is partitioned by account id. Each partition is handed to its own
//! tokio task, and the purchases inside a partition are validated one after
//! another.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     └── Arc<SharedValidator>  (PurchaseValidator over an Arc<AsyncAccountLedger>)
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use super::AsyncAccountLedger;
use crate::core::PurchaseValidator;
use crate::types::{PurchaseError, PurchaseOutcome, PurchaseRecord};
use tracing::error;

/// Purchase validator whose collaborators are one shared thread-safe ledger
pub type SharedValidator = PurchaseValidator<Arc<AsyncAccountLedger>, Arc<AsyncAccountLedger>>;

/// Result of processing a single purchase
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The purchase that was processed
    pub record: PurchaseRecord,

    /// The outcome of validation (accepted totals or rejection)
    pub result: Result<PurchaseOutcome, PurchaseError>,
}

/// Batch processor with account-based partitioning
///
/// Cloneable; every clone shares the same validator and therefore the same ledger.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    validator: Arc<SharedValidator>,
}

impl BatchProcessor {
    /// Create a new BatchProcessor
    ///
    /// # Arguments
    ///
    /// * `validator` - Arc-wrapped validator shared across async tasks
    pub fn new(validator: Arc<SharedValidator>) -> Self {
        Self { validator }
    }

    /// Partition a batch of purchases by raw account id
    ///
    /// # Guarantees
    ///
    /// - Each purchase appears in exactly one sub-batch
    /// - Purchases for each account keep their original order
    /// - Invalid account ids get a partition like any other and are rejected
    ///   by the validator
    pub fn partition_by_account(
        &self,
        batch: Vec<PurchaseRecord>,
    ) -> HashMap<i64, Vec<PurchaseRecord>> {
        let mut account_batches: HashMap<i64, Vec<PurchaseRecord>> = HashMap::new();

        for record in batch {
            account_batches
                .entry(record.account)
                .or_default()
                .push(record);
        }

        account_batches
    }

    /// Process all purchases of a single account sequentially
    ///
    /// Every purchase is processed even if an earlier one was rejected.
    /// Results are in the same order as the input.
    pub fn process_account_purchases(&self, purchases: Vec<PurchaseRecord>) -> Vec<ProcessingResult> {
        purchases
            .into_iter()
            .map(|record| {
                let result = self.validator.purchase(record.account, &record.requests);
                ProcessingResult { record, result }
            })
            .collect()
    }

    /// Process a batch of purchases with account-based partitioning
    ///
    /// 1. Partitions the batch by account id
    /// 2. Spawns a tokio task per account
    /// 3. Waits for all tasks and collects their results
    ///
    /// Results from different accounts may come back in any order.
    pub async fn process_batch(&self, batch: Vec<PurchaseRecord>) -> Vec<ProcessingResult> {
        let account_batches = self.partition_by_account(batch);

        let mut tasks = Vec::with_capacity(account_batches.len());
        for (_account, purchases) in account_batches {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move {
                processor.process_account_purchases(purchases)
            }));
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(account_results) => results.extend(account_results),
                Err(e) => error!(error = %e, "purchase task panicked"),
            }
        }

        results
    }
}
