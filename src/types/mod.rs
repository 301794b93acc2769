//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account identifier and ledger summaries
//! - `ticket`: Ticket categories and ticket requests
//! - `purchase`: Purchase records and outcomes
//! - `error`: Error types for the ticket service

pub mod account;
pub mod error;
pub mod purchase;
pub mod ticket;

pub use account::{AccountId, AccountSummary};
pub use error::{InputError, PurchaseError};
pub use purchase::{PurchaseId, PurchaseOutcome, PurchaseRecord};
pub use ticket::{TicketType, TicketTypeRequest, MAX_SEATS_PER_PURCHASE};
