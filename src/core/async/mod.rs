//! Asynchronous implementations of core components
//!
//! This module provides the thread-safe pieces used by the async processing
//! strategy:
//!
//! - **AsyncAccountLedger**: Thread-safe payment and reservation ledger using DashMap
//! - **BatchProcessor**: Account-partitioned concurrent settlement of purchase batches
//!
//! # Thread Safety
//!
//! - Purchases for different accounts proceed in parallel
//! - Purchases for the same account are settled in file order
//! - No global locks, fine-grained locking per account

pub mod account_ledger;
pub mod batch_processor;

pub use account_ledger::AsyncAccountLedger;
pub use batch_processor::{BatchProcessor, ProcessingResult, SharedValidator};
