//! Thread-safe account ledger for async batch processing
//!
//! This module provides the `AsyncAccountLedger`, which records payments and
//! seat reservations using concurrent data structures so that purchases for
//! different accounts can be settled from several threads at once.
//!
//! # Design
//!
//! The ledger uses `DashMap` (a concurrent HashMap) with fine-grained locking.
//! Calls for different accounts do not block each other; calls for the same
//! account are serialized by the entry lock.

use crate::core::traits::{PaymentProcessor, SeatReservation};
use crate::types::{AccountId, AccountSummary};
use dashmap::DashMap;
use tracing::debug;

/// Thread-safe payment and seat reservation ledger
///
/// Implements both collaborator traits and is meant to be shared behind an
/// `Arc` by every task of a batch.
#[derive(Debug)]
pub struct AsyncAccountLedger {
    /// Concurrent map of account ids to their summaries
    accounts: DashMap<AccountId, AccountSummary>,
}

impl AsyncAccountLedger {
    /// Create a new empty AsyncAccountLedger
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Get a snapshot of the summary for an account
    pub fn get(&self, account: AccountId) -> Option<AccountSummary> {
        self.accounts.get(&account).map(|entry| entry.value().clone())
    }

    /// Get a snapshot of all account summaries
    ///
    /// Returned in no particular order; the CSV writer sorts them.
    pub fn get_all_accounts(&self) -> Vec<AccountSummary> {
        self.accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    fn update<F>(&self, account: AccountId, f: F)
    where
        F: FnOnce(&mut AccountSummary),
    {
        let mut entry = self
            .accounts
            .entry(account)
            .or_insert_with(|| AccountSummary::new(account));
        f(entry.value_mut());
    }
}

impl Default for AsyncAccountLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentProcessor for AsyncAccountLedger {
    fn make_payment(&self, account: AccountId, amount: u64) {
        debug!(%account, amount, "payment taken");
        self.update(account, |summary| summary.record_payment(amount));
    }
}

impl SeatReservation for AsyncAccountLedger {
    fn reserve_seat(&self, account: AccountId, seats: u64) {
        debug!(%account, seats, "seats reserved");
        self.update(account, |summary| summary.record_reservation(seats));
    }
}
