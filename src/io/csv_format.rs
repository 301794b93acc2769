//! CSV format handling for purchase lines and account output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Grouping of consecutive lines into purchases
//! - Conversion from grouped lines to domain types
//! - Account output serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{
    AccountSummary, InputError, PurchaseId, PurchaseRecord, TicketType, TicketTypeRequest,
};
use serde::Deserialize;
use std::io::Write;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns: purchase, account, type, tickets.
/// Type and tickets are both empty on a line that only opens a purchase.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    pub purchase: PurchaseId,
    pub account: String,
    #[serde(rename = "type")]
    pub ticket_type: Option<String>,
    pub tickets: Option<String>,
}

/// Lines collected for one purchase, not yet converted
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPurchase {
    pub purchase: PurchaseId,
    pub lines: Vec<CsvRecord>,
}

/// Groups consecutive lines with the same purchase id
///
/// Feed lines in file order with `push`; a purchase is complete once a line
/// with a different id arrives or `finish` is called at end of input. The
/// same id appearing again later starts a new purchase.
#[derive(Debug, Default)]
pub struct PurchaseGrouper {
    pending: Option<PendingPurchase>,
}

impl PurchaseGrouper {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Add a line, returning the previous purchase if this line closed it
    pub fn push(&mut self, record: CsvRecord) -> Option<PendingPurchase> {
        if let Some(pending) = self.pending.as_mut() {
            if pending.purchase == record.purchase {
                pending.lines.push(record);
                return None;
            }
        }

        self.pending.replace(PendingPurchase {
            purchase: record.purchase,
            lines: vec![record],
        })
    }

    /// Close the purchase still being collected, if any
    pub fn finish(&mut self) -> Option<PendingPurchase> {
        self.pending.take()
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Convert one line into a ticket request
///
/// A line with neither type nor tickets carries no request.
fn convert_ticket_line(
    line: &CsvRecord,
    purchase: PurchaseId,
) -> Result<Option<TicketTypeRequest>, InputError> {
    match (non_blank(&line.ticket_type), non_blank(&line.tickets)) {
        (None, None) => Ok(None),
        (Some(ticket_type), Some(tickets)) => {
            let ticket_type = TicketType::parse(ticket_type, purchase)?;
            let count = tickets
                .parse::<u32>()
                .map_err(|_| InputError::invalid_ticket_count(tickets, purchase))?;
            TicketTypeRequest::new(ticket_type, count)
                .map(Some)
                .map_err(|_| InputError::invalid_ticket_count(tickets, purchase))
        }
        (None, Some(_)) => Err(InputError::invalid_ticket_type("", purchase)),
        (Some(_), None) => Err(InputError::invalid_ticket_count("", purchase)),
    }
}

/// Convert a PendingPurchase into a PurchaseRecord
///
/// This function:
/// - Parses every line's account into an integer (range is left to the validator)
/// - Checks every line names the same account, so `1` and `01` agree
/// - Converts each line into a ticket request, keeping file order
///
/// Any failure rejects the whole purchase.
///
/// # Returns
///
/// Result containing either:
/// - Ok(PurchaseRecord) - Successfully converted purchase
/// - Err(InputError) - The first problem found in the purchase
pub fn convert_purchase(pending: PendingPurchase) -> Result<PurchaseRecord, InputError> {
    let PendingPurchase { purchase, lines } = pending;

    let parse_account = |line: &CsvRecord| {
        let text = line.account.trim();
        text.parse::<i64>()
            .map_err(|_| InputError::invalid_account_field(text, purchase))
    };

    let first = lines
        .first()
        .ok_or_else(|| InputError::invalid_account_field("", purchase))?;
    let account = parse_account(first)?;

    for line in &lines[1..] {
        if parse_account(line)? != account {
            return Err(InputError::account_mismatch(
                purchase,
                first.account.trim(),
                line.account.trim(),
            ));
        }
    }

    let mut requests = Vec::with_capacity(lines.len());
    for line in &lines {
        if let Some(request) = convert_ticket_line(line, purchase)? {
            requests.push(request);
        }
    }

    Ok(PurchaseRecord {
        purchase,
        account,
        requests,
    })
}

/// Write account summaries to CSV format
///
/// Writes accounts in CSV format with columns: account, amount_paid,
/// seats_reserved, purchases. Accounts are sorted by account id for
/// deterministic output. The header is written even when there are no accounts.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_accounts_csv(
    accounts: &[AccountSummary],
    output: &mut dyn Write,
) -> Result<(), String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);

    writer
        .write_record(["account", "amount_paid", "seats_reserved", "purchases"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by_key(|summary| summary.account);

    for summary in &sorted_accounts {
        writer
            .serialize(summary)
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountId;
    use rstest::rstest;

    fn line(purchase: PurchaseId, account: &str, ticket_type: &str, tickets: &str) -> CsvRecord {
        let field = |value: &str| (!value.is_empty()).then(|| value.to_string());
        CsvRecord {
            purchase,
            account: account.to_string(),
            ticket_type: field(ticket_type),
            tickets: field(tickets),
        }
    }

    fn pending(lines: Vec<CsvRecord>) -> PendingPurchase {
        PendingPurchase {
            purchase: lines[0].purchase,
            lines,
        }
    }

    #[test]
    fn test_grouper_groups_consecutive_lines() {
        let mut grouper = PurchaseGrouper::new();

        assert!(grouper.push(line(1, "1", "adult", "2")).is_none());
        assert!(grouper.push(line(1, "1", "child", "1")).is_none());

        let first = grouper.push(line(2, "3", "adult", "1")).unwrap();
        assert_eq!(first.purchase, 1);
        assert_eq!(first.lines.len(), 2);

        let second = grouper.finish().unwrap();
        assert_eq!(second.purchase, 2);
        assert_eq!(second.lines.len(), 1);

        assert!(grouper.finish().is_none());
    }

    #[test]
    fn test_grouper_treats_repeated_id_as_new_purchase() {
        let mut grouper = PurchaseGrouper::new();

        grouper.push(line(1, "1", "adult", "1"));
        let closed = grouper.push(line(2, "1", "adult", "1")).unwrap();
        assert_eq!(closed.purchase, 1);
        let closed = grouper.push(line(1, "1", "adult", "1")).unwrap();
        assert_eq!(closed.purchase, 2);
        assert_eq!(grouper.finish().unwrap().purchase, 1);
    }

    #[test]
    fn test_convert_purchase_keeps_request_order() {
        let record = convert_purchase(pending(vec![
            line(4, "7", "adult", "2"),
            line(4, "7", "CHILD", "1"),
            line(4, "7", "Infant", "1"),
        ]))
        .unwrap();

        assert_eq!(record.purchase, 4);
        assert_eq!(record.account, 7);
        let types: Vec<TicketType> = record.requests.iter().map(|r| r.ticket_type()).collect();
        assert_eq!(
            types,
            vec![TicketType::Adult, TicketType::Child, TicketType::Infant]
        );
        assert_eq!(record.requests[0].count(), 2);
    }

    #[test]
    fn test_convert_purchase_without_tickets() {
        let record = convert_purchase(pending(vec![line(2, "1", "", "")])).unwrap();
        assert_eq!(record.account, 1);
        assert!(record.requests.is_empty());
    }

    #[test]
    fn test_convert_purchase_leaves_account_range_to_validator() {
        let record = convert_purchase(pending(vec![line(1, "0", "adult", "1")])).unwrap();
        assert_eq!(record.account, 0);

        let record = convert_purchase(pending(vec![line(1, "-5", "adult", "1")])).unwrap();
        assert_eq!(record.account, -5);
    }

    #[rstest]
    #[case::non_integer_account(
        vec![line(1, "abc", "adult", "1")],
        InputError::invalid_account_field("abc", 1)
    )]
    #[case::unknown_type(
        vec![line(1, "1", "adult", "1"), line(1, "1", "senior", "1")],
        InputError::invalid_ticket_type("senior", 1)
    )]
    #[case::zero_tickets(
        vec![line(1, "1", "adult", "0")],
        InputError::invalid_ticket_count("0", 1)
    )]
    #[case::negative_tickets(
        vec![line(1, "1", "adult", "-2")],
        InputError::invalid_ticket_count("-2", 1)
    )]
    #[case::missing_tickets(
        vec![line(1, "1", "adult", "")],
        InputError::invalid_ticket_count("", 1)
    )]
    #[case::missing_type(
        vec![line(1, "1", "", "3")],
        InputError::invalid_ticket_type("", 1)
    )]
    #[case::account_mismatch(
        vec![line(1, "1", "adult", "1"), line(1, "2", "child", "1")],
        InputError::account_mismatch(1, "1", "2")
    )]
    #[case::non_integer_account_on_later_line(
        vec![line(1, "1", "adult", "1"), line(1, "x", "child", "1")],
        InputError::invalid_account_field("x", 1)
    )]
    fn test_convert_purchase_rejects(#[case] lines: Vec<CsvRecord>, #[case] expected: InputError) {
        assert_eq!(convert_purchase(pending(lines)), Err(expected));
    }

    #[test]
    fn test_convert_purchase_compares_accounts_numerically() {
        let record = convert_purchase(pending(vec![
            line(1, "1", "adult", "2"),
            line(1, "01", "child", "1"),
            line(1, " +1", "infant", "1"),
        ]))
        .unwrap();

        assert_eq!(record.account, 1);
        assert_eq!(record.requests.len(), 3);
    }

    #[test]
    fn test_write_accounts_csv_sorted() {
        let mut first = AccountSummary::new(AccountId::try_from(2).unwrap());
        first.record_payment(20);
        first.record_reservation(1);
        let mut second = AccountSummary::new(AccountId::try_from(1).unwrap());
        second.record_payment(50);
        second.record_reservation(3);

        let mut output = Vec::new();
        write_accounts_csv(&[first, second], &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(
            output,
            "account,amount_paid,seats_reserved,purchases\n1,50,3,1\n2,20,1,1\n"
        );
    }

    #[test]
    fn test_write_accounts_csv_empty_still_has_header() {
        let mut output = Vec::new();
        write_accounts_csv(&[], &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "account,amount_paid,seats_reserved,purchases\n"
        );
    }
}
