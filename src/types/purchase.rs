//! Purchase-related types for the Rust Ticket Service
//!
//! This module defines the outcome of a validated purchase and the purchase
//! records assembled from batch input.

use super::ticket::TicketTypeRequest;

/// Purchase identifier from the input file
///
/// Groups consecutive input lines into one purchase.
pub type PurchaseId = u32;

/// Totals of an accepted purchase
///
/// Derived for the duration of one `purchase` call and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PurchaseOutcome {
    /// Amount passed to the payment processor
    pub total_amount: u64,

    /// Seats passed to the seat reservation service
    pub total_seats: u64,
}

/// One purchase assembled from the input file
///
/// The account is kept as the raw integer read from the file so that the
/// validator, not the reader, decides whether it is acceptable.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseRecord {
    /// Purchase identifier from the input
    pub purchase: PurchaseId,

    /// Raw account identifier
    pub account: i64,

    /// Ticket requests in file order
    pub requests: Vec<TicketTypeRequest>,
}
