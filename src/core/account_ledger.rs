//! Account ledger module
//!
//! This module provides the `AccountLedger`, a single-threaded stand-in for
//! the payment processor and the seat reservation service. Every call it
//! receives is folded into a per-account `AccountSummary`, which is what the
//! command-line front-end reports once a batch has been processed.
//!
//! The AccountLedger is responsible for:
//! - Creating an account summary on the first call for that account
//! - Summing amounts charged and seats reserved
//! - Counting payments taken
//! - Providing sorted account listings for output

use crate::core::traits::{PaymentProcessor, SeatReservation};
use crate::types::{AccountId, AccountSummary};
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::debug;

/// Records payments and seat reservations per account
///
/// The collaborator traits take `&self`, so the map sits behind a `RefCell`.
/// Use `AsyncAccountLedger` when the ledger has to be shared across threads.
#[derive(Debug, Default)]
pub struct AccountLedger {
    /// Map of account ids to their summaries
    accounts: RefCell<HashMap<AccountId, AccountSummary>>,
}

impl AccountLedger {
    /// Create a new AccountLedger with no accounts
    pub fn new() -> Self {
        AccountLedger {
            accounts: RefCell::new(HashMap::new()),
        }
    }

    /// Get the summary for an account, if that account has been seen
    pub fn get(&self, account: AccountId) -> Option<AccountSummary> {
        self.accounts.borrow().get(&account).cloned()
    }

    /// Get all account summaries sorted by account id
    ///
    /// Provides deterministic output for CSV generation.
    pub fn get_all_accounts(&self) -> Vec<AccountSummary> {
        let mut accounts: Vec<AccountSummary> = self.accounts.borrow().values().cloned().collect();
        accounts.sort_by_key(|summary| summary.account);
        accounts
    }

    fn update<F>(&self, account: AccountId, f: F)
    where
        F: FnOnce(&mut AccountSummary),
    {
        let mut accounts = self.accounts.borrow_mut();
        let summary = accounts
            .entry(account)
            .or_insert_with(|| AccountSummary::new(account));
        f(summary);
    }
}

impl PaymentProcessor for AccountLedger {
    fn make_payment(&self, account: AccountId, amount: u64) {
        debug!(%account, amount, "payment taken");
        self.update(account, |summary| summary.record_payment(amount));
    }
}

impl SeatReservation for AccountLedger {
    fn reserve_seat(&self, account: AccountId, seats: u64) {
        debug!(%account, seats, "seats reserved");
        self.update(account, |summary| summary.record_reservation(seats));
    }
}
