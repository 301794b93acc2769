//! Ticket-related types for the Rust Ticket Service
//!
//! This module defines the three ticket categories, their fixed prices and
//! seating rules, and the immutable `TicketTypeRequest` pair that callers
//! build for each purchase.

use super::error::{InputError, PurchaseError};
use super::purchase::PurchaseId;
use std::fmt;

/// Maximum number of seats a single purchase may reserve
pub const MAX_SEATS_PER_PURCHASE: u64 = 20;

/// Ticket categories supported by the ticket service
///
/// The set is fixed. Prices are in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketType {
    /// Full price ticket, occupies one seat
    Adult,

    /// Half price ticket, occupies one seat
    ///
    /// Must be accompanied by an adult.
    Child,

    /// Free ticket, sits on an adult's lap and occupies no seat
    Infant,
}

impl TicketType {
    /// Price of one ticket of this type
    pub const fn price(self) -> u64 {
        match self {
            TicketType::Adult => 20,
            TicketType::Child => 10,
            TicketType::Infant => 0,
        }
    }

    /// Whether a ticket of this type takes up a seat
    pub const fn occupies_seat(self) -> bool {
        !matches!(self, TicketType::Infant)
    }

    /// Whether this ticket type needs an accompanying adult
    pub const fn requires_adult(self) -> bool {
        matches!(self, TicketType::Child | TicketType::Infant)
    }

    /// Parse a ticket type name as found in an input file
    ///
    /// Matching is case-insensitive: `adult`, `CHILD` and `Infant` are all accepted.
    ///
    /// # Errors
    ///
    /// Returns `InputError::InvalidTicketType` for any other name.
    pub fn parse(value: &str, purchase: PurchaseId) -> Result<Self, InputError> {
        match value.trim().to_lowercase().as_str() {
            "adult" => Ok(TicketType::Adult),
            "child" => Ok(TicketType::Child),
            "infant" => Ok(TicketType::Infant),
            _ => Err(InputError::invalid_ticket_type(value, purchase)),
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TicketType::Adult => "ADULT",
            TicketType::Child => "CHILD",
            TicketType::Infant => "INFANT",
        };
        f.write_str(name)
    }
}

/// Request for a number of tickets of a single type
///
/// Immutable once built. The count is always greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketTypeRequest {
    ticket_type: TicketType,
    count: u32,
}

impl TicketTypeRequest {
    /// Create a new ticket request
    ///
    /// # Arguments
    ///
    /// * `ticket_type` - The category of ticket being requested
    /// * `count` - Number of tickets, must be positive
    ///
    /// # Errors
    ///
    /// Returns `PurchaseError::InvalidPurchase` if `count` is zero.
    pub fn new(ticket_type: TicketType, count: u32) -> Result<Self, PurchaseError> {
        if count == 0 {
            return Err(PurchaseError::empty_request(ticket_type));
        }

        Ok(Self { ticket_type, count })
    }

    pub fn ticket_type(&self) -> TicketType {
        self.ticket_type
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}
