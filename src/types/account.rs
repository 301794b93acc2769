//! Account-related types for the Rust Ticket Service
//!
//! This module defines the validated account identifier and the per-account
//! summary kept by the account ledgers.

use super::error::PurchaseError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Purchaser account identifier
///
/// Always greater than zero. Built from a raw integer with `TryFrom<i64>` or
/// from text with `FromStr`, both of which reject anything else with
/// `PurchaseError::InvalidAccount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AccountId(u64);

impl AccountId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for AccountId {
    type Error = PurchaseError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .ok()
            .filter(|id| *id > 0)
            .map(AccountId)
            .ok_or_else(|| PurchaseError::invalid_account(value))
    }
}

impl FromStr for AccountId {
    type Err = PurchaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|_| PurchaseError::invalid_account(s.trim()))?;
        AccountId::try_from(value)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account state as seen by the ledger
///
/// Records what the collaborators were asked to do for an account over the
/// whole batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSummary {
    /// The purchaser account
    pub account: AccountId,

    /// Sum of all amounts charged to this account
    pub amount_paid: u64,

    /// Sum of all seats reserved for this account
    pub seats_reserved: u64,

    /// Number of payments taken, one per accepted purchase
    pub purchases: u64,
}

impl AccountSummary {
    /// Create a summary with nothing paid or reserved yet
    pub fn new(account: AccountId) -> Self {
        AccountSummary {
            account,
            amount_paid: 0,
            seats_reserved: 0,
            purchases: 0,
        }
    }

    /// Record one payment against the account
    pub fn record_payment(&mut self, amount: u64) {
        self.amount_paid = self.amount_paid.saturating_add(amount);
        self.purchases = self.purchases.saturating_add(1);
    }

    /// Record one seat reservation against the account
    pub fn record_reservation(&mut self, seats: u64) {
        self.seats_reserved = self.seats_reserved.saturating_add(seats);
    }
}
