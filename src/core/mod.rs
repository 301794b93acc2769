//! Core business logic module
//!
//! This module contains the purchase processing components:
//! - `traits` - Collaborator traits for payment and seat reservation
//! - `purchase_validator` - Purchase pricing and policy enforcement
//! - `account_ledger` - Single-threaded ledger implementing both collaborators
//! - `async` - Thread-safe ledger and batch processor for the async strategy

pub mod account_ledger;
pub mod r#async;
pub mod purchase_validator;
pub mod traits;

pub use account_ledger::AccountLedger;
pub use purchase_validator::PurchaseValidator;
pub use r#async::{AsyncAccountLedger, BatchProcessor};
pub use traits::{PaymentProcessor, SeatReservation};
