//! Error types for the Rust Ticket Service
//!
//! This module defines the errors raised while validating a purchase and the
//! errors raised while reading purchases from batch input.
//!
//! # Error Categories
//!
//! - **Purchase Errors**: malformed account or purchase policy violation. These
//!   are the only errors the purchase validator ever returns.
//! - **Input Errors**: file not found, I/O failures, malformed CSV lines and
//!   inconsistent purchase groups.

use super::purchase::PurchaseId;
use super::ticket::{TicketType, MAX_SEATS_PER_PURCHASE};
use std::fmt::Display;
use thiserror::Error;

/// Error returned by the purchase validator
///
/// Both variants are terminal for the call. Neither collaborator has been
/// invoked when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    /// Account identifier is not an integer greater than zero
    ///
    /// Raised before any ticket request is examined.
    #[error("Invalid account: {message}")]
    InvalidAccount {
        /// Description of the rejected identifier
        message: String,
    },

    /// Purchase breaks the ticket purchase policy
    ///
    /// Seat limit exceeded, more children and infants than adults at some
    /// point in the request sequence, or no adult at all.
    #[error("Invalid purchase: {message}")]
    InvalidPurchase {
        /// Description of the violated rule
        message: String,
    },
}

impl PurchaseError {
    /// Create an InvalidAccount error for a rejected identifier
    pub fn invalid_account(value: impl Display) -> Self {
        PurchaseError::InvalidAccount {
            message: format!("account id must be an integer greater than zero, got '{value}'"),
        }
    }

    /// Create an InvalidPurchase error for a request with no tickets
    pub fn empty_request(ticket_type: TicketType) -> Self {
        PurchaseError::InvalidPurchase {
            message: format!("{ticket_type} request must ask for at least one ticket"),
        }
    }

    /// Create an InvalidPurchase error for a purchase over the seat limit
    pub fn seat_limit_exceeded(seats: u64) -> Self {
        PurchaseError::InvalidPurchase {
            message: format!(
                "{seats} seats requested, at most {MAX_SEATS_PER_PURCHASE} allowed per purchase"
            ),
        }
    }

    /// Create an InvalidPurchase error for children and infants outnumbering adults
    pub fn minors_exceed_adults(minors: u64, adults: u64) -> Self {
        PurchaseError::InvalidPurchase {
            message: format!(
                "{minors} child or infant tickets requested with only {adults} adult tickets"
            ),
        }
    }

    /// Create an InvalidPurchase error for a purchase with no adult ticket
    pub fn no_accompanying_adult() -> Self {
        PurchaseError::InvalidPurchase {
            message: "child or infant tickets cannot be purchased without an adult ticket"
                .to_string(),
        }
    }
}

/// Error raised while reading purchases from batch input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV line could not be deserialized
    ///
    /// The line is skipped and processing continues with the next one.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Account column is not an integer
    ///
    /// The whole purchase is rejected.
    #[error("Invalid account '{value}' in purchase {purchase}")]
    InvalidAccountField {
        /// The account text as read
        value: String,
        /// Purchase the line belongs to
        purchase: PurchaseId,
    },

    /// Ticket type column is not one of adult, child or infant
    ///
    /// The whole purchase is rejected.
    #[error("Invalid ticket type '{value}' in purchase {purchase}")]
    InvalidTicketType {
        /// The ticket type text as read
        value: String,
        /// Purchase the line belongs to
        purchase: PurchaseId,
    },

    /// Ticket count column is not a positive integer
    ///
    /// The whole purchase is rejected.
    #[error("Invalid ticket count '{value}' in purchase {purchase}")]
    InvalidTicketCount {
        /// The ticket count text as read
        value: String,
        /// Purchase the line belongs to
        purchase: PurchaseId,
    },

    /// Lines of one purchase name different accounts
    ///
    /// The whole purchase is rejected.
    #[error("Account mismatch in purchase {purchase}: expected account {expected}, got {found}")]
    AccountMismatch {
        /// Purchase whose lines disagree
        purchase: PurchaseId,
        /// Account named by the first line
        expected: String,
        /// Account named by a later line
        found: String,
    },
}

impl From<std::io::Error> for InputError {
    fn from(error: std::io::Error) -> Self {
        InputError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for InputError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        InputError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// csv-async reports the position inside its message
impl From<csv_async::Error> for InputError {
    fn from(error: csv_async::Error) -> Self {
        InputError::ParseError {
            line: None,
            message: error.to_string(),
        }
    }
}

impl InputError {
    /// Create an InvalidAccountField error
    pub fn invalid_account_field(value: &str, purchase: PurchaseId) -> Self {
        InputError::InvalidAccountField {
            value: value.to_string(),
            purchase,
        }
    }

    /// Create an InvalidTicketType error
    pub fn invalid_ticket_type(value: &str, purchase: PurchaseId) -> Self {
        InputError::InvalidTicketType {
            value: value.to_string(),
            purchase,
        }
    }

    /// Create an InvalidTicketCount error
    pub fn invalid_ticket_count(value: &str, purchase: PurchaseId) -> Self {
        InputError::InvalidTicketCount {
            value: value.to_string(),
            purchase,
        }
    }

    /// Create an AccountMismatch error
    pub fn account_mismatch(purchase: PurchaseId, expected: &str, found: &str) -> Self {
        InputError::AccountMismatch {
            purchase,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::invalid_account(
        PurchaseError::invalid_account(0),
        "Invalid account: account id must be an integer greater than zero, got '0'"
    )]
    #[case::seat_limit(
        PurchaseError::seat_limit_exceeded(21),
        "Invalid purchase: 21 seats requested, at most 20 allowed per purchase"
    )]
    #[case::minors_exceed_adults(
        PurchaseError::minors_exceed_adults(3, 2),
        "Invalid purchase: 3 child or infant tickets requested with only 2 adult tickets"
    )]
    #[case::no_adult(
        PurchaseError::no_accompanying_adult(),
        "Invalid purchase: child or infant tickets cannot be purchased without an adult ticket"
    )]
    #[case::empty_request(
        PurchaseError::empty_request(TicketType::Child),
        "Invalid purchase: CHILD request must ask for at least one ticket"
    )]
    fn test_purchase_error_display(#[case] error: PurchaseError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::file_not_found(
        InputError::FileNotFound { path: "purchases.csv".to_string() },
        "File not found: purchases.csv"
    )]
    #[case::parse_error_with_line(
        InputError::ParseError { line: Some(4), message: "invalid digit".to_string() },
        "CSV parse error at line 4: invalid digit"
    )]
    #[case::parse_error_without_line(
        InputError::ParseError { line: None, message: "invalid digit".to_string() },
        "CSV parse error: invalid digit"
    )]
    #[case::invalid_account_field(
        InputError::invalid_account_field("abc", 2),
        "Invalid account 'abc' in purchase 2"
    )]
    #[case::invalid_ticket_type(
        InputError::invalid_ticket_type("senior", 3),
        "Invalid ticket type 'senior' in purchase 3"
    )]
    #[case::invalid_ticket_count(
        InputError::invalid_ticket_count("0", 5),
        "Invalid ticket count '0' in purchase 5"
    )]
    #[case::account_mismatch(
        InputError::account_mismatch(9, "1", "2"),
        "Account mismatch in purchase 9: expected account 1, got 2"
    )]
    fn test_input_error_display(#[case] error: InputError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: InputError = io_error.into();
        assert!(matches!(error, InputError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
