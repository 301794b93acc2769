//! Rust Ticket Service Library
//! # Overview
//!
//! This library validates and prices ticket purchases for an account, then
//! hands payment and seat reservation to external collaborators. A CSV batch
//! front-end with a sync and an async strategy drives it from the command line.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (TicketTypeRequest, AccountId, errors, etc.)
//! - [`cli`] - CLI arguments parsing and log setup
//! - [`core`] - Business logic components:
//!   - [`core::purchase_validator`] - Purchase pricing and policy enforcement
//!   - [`core::traits`] - Payment processor and seat reservation collaborators
//!   - [`core::account_ledger`] - Ledger implementing both collaborators
//! - [`io`] - CSV reading, purchase grouping and account output
//! - [`strategy`] - Sync and async processing pipelines
//!
//! # Ticket Types
//!
//! - **Adult**: 20 per ticket, one seat
//! - **Child**: 10 per ticket, one seat, needs an adult
//! - **Infant**: free, no seat (sits on an adult's lap), needs an adult
//!
//! # Purchase Rules
//!
//! - At most 20 seats per purchase
//! - Child and infant tickets may never outnumber adult tickets at any point
//!   in the request sequence
//! - No child or infant tickets without an adult ticket

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{AccountLedger, PaymentProcessor, PurchaseValidator, SeatReservation};
pub use io::write_accounts_csv;
pub use types::{
    AccountId, AccountSummary, InputError, PurchaseError, PurchaseOutcome, PurchaseRecord,
    TicketType, TicketTypeRequest,
};
