//! Purchase validation and pricing
//!
//! This module provides the `PurchaseValidator`, the rule engine applied to
//! every ticket purchase. It prices the requests, enforces the purchase policy
//! and, only when the whole purchase is acceptable, asks the payment processor
//! and the seat reservation service to act on it.
//!
//! The validator enforces business rules such as:
//! - Account ids greater than zero, checked before any request
//! - At most 20 seats per purchase, checked after every request
//! - Never more child and infant tickets than adult tickets, checked after every request
//! - No child or infant tickets without an adult

use crate::core::traits::{PaymentProcessor, SeatReservation};
use crate::types::{
    AccountId, PurchaseError, PurchaseOutcome, TicketTypeRequest, MAX_SEATS_PER_PURCHASE,
};
use tracing::debug;

/// Running totals over a prefix of the request sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PurchaseTally {
    amount: u64,
    seats: u64,
    adults: u64,
    minors: u64,
}

impl PurchaseTally {
    fn add(&mut self, request: &TicketTypeRequest) {
        let ticket_type = request.ticket_type();
        let count = u64::from(request.count());

        self.amount += count * ticket_type.price();
        if ticket_type.occupies_seat() {
            self.seats += count;
        }

        if ticket_type.requires_adult() {
            self.minors += count;
        } else {
            self.adults += count;
        }
    }

    /// Limits that must hold after every request
    fn check_running_limits(&self) -> Result<(), PurchaseError> {
        if self.seats > MAX_SEATS_PER_PURCHASE {
            return Err(PurchaseError::seat_limit_exceeded(self.seats));
        }

        if self.minors > self.adults {
            return Err(PurchaseError::minors_exceed_adults(self.minors, self.adults));
        }

        Ok(())
    }

    /// Final check once every request has been folded in
    ///
    /// Cannot fire after `check_running_limits` has passed for every prefix,
    /// since counts only grow. Kept so the rule holds on its own.
    fn check_adult_present(&self) -> Result<(), PurchaseError> {
        if self.minors > 0 && self.adults == 0 {
            return Err(PurchaseError::no_accompanying_adult());
        }

        Ok(())
    }

    fn outcome(&self) -> PurchaseOutcome {
        PurchaseOutcome {
            total_amount: self.amount,
            total_seats: self.seats,
        }
    }
}

/// Ticket purchase validator
///
/// Owns its two collaborators for its whole lifetime and holds no other state
/// between calls.
///
/// # Examples
///
/// ```
/// use rust_ticket_service::core::{AccountLedger, PurchaseValidator};
/// use rust_ticket_service::types::{TicketType, TicketTypeRequest};
///
/// let ledger = AccountLedger::new();
/// let validator = PurchaseValidator::new(&ledger, &ledger);
///
/// let requests = [
///     TicketTypeRequest::new(TicketType::Adult, 2).unwrap(),
///     TicketTypeRequest::new(TicketType::Child, 1).unwrap(),
/// ];
/// let outcome = validator.purchase(1, &requests).unwrap();
///
/// assert_eq!(outcome.total_amount, 50);
/// assert_eq!(outcome.total_seats, 3);
/// ```
#[derive(Debug)]
pub struct PurchaseValidator<P, S> {
    payment_processor: P,
    seat_reservation: S,
}

impl<P, S> PurchaseValidator<P, S>
where
    P: PaymentProcessor,
    S: SeatReservation,
{
    /// Create a new PurchaseValidator
    ///
    /// # Arguments
    ///
    /// * `payment_processor` - Charged once per accepted purchase
    /// * `seat_reservation` - Asked once per accepted purchase to hold seats
    pub fn new(payment_processor: P, seat_reservation: S) -> Self {
        PurchaseValidator {
            payment_processor,
            seat_reservation,
        }
    }

    /// Validate, price and settle a purchase
    ///
    /// Makes a single pass over `requests` in order. On success the payment
    /// processor is called with the total amount, then the seat reservation
    /// service with the total seats. On failure neither is called.
    ///
    /// # Arguments
    ///
    /// * `account_id` - Raw purchaser account id
    /// * `requests` - Ticket requests, possibly empty
    ///
    /// # Returns
    ///
    /// * `Ok(PurchaseOutcome)` with the amount charged and seats reserved
    /// * `Err(PurchaseError)` if the purchase was rejected
    ///
    /// # Errors
    ///
    /// Returns `InvalidAccount` if `account_id` is not greater than zero.
    /// Returns `InvalidPurchase` if:
    /// - More than 20 seats are requested so far at any request
    /// - Child and infant tickets so far outnumber adult tickets at any request
    /// - Child or infant tickets are requested without any adult ticket
    pub fn purchase(
        &self,
        account_id: i64,
        requests: &[TicketTypeRequest],
    ) -> Result<PurchaseOutcome, PurchaseError> {
        let account = AccountId::try_from(account_id)?;

        let mut tally = PurchaseTally::default();
        for request in requests {
            tally.add(request);
            tally.check_running_limits()?;
        }
        tally.check_adult_present()?;

        let outcome = tally.outcome();
        self.payment_processor
            .make_payment(account, outcome.total_amount);
        self.seat_reservation
            .reserve_seat(account, outcome.total_seats);

        debug!(
            %account,
            amount = outcome.total_amount,
            seats = outcome.total_seats,
            "purchase accepted"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TicketType;
    use rstest::rstest;
    use std::cell::RefCell;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Payment(u64, u64),
        Reservation(u64, u64),
    }

    /// Test double recording every collaborator call in order
    #[derive(Default)]
    struct CallLog {
        calls: RefCell<Vec<Call>>,
    }

    impl CallLog {
        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    impl PaymentProcessor for CallLog {
        fn make_payment(&self, account: AccountId, amount: u64) {
            self.calls
                .borrow_mut()
                .push(Call::Payment(account.get(), amount));
        }
    }

    impl SeatReservation for CallLog {
        fn reserve_seat(&self, account: AccountId, seats: u64) {
            self.calls
                .borrow_mut()
                .push(Call::Reservation(account.get(), seats));
        }
    }

    fn request(ticket_type: TicketType, count: u32) -> TicketTypeRequest {
        TicketTypeRequest::new(ticket_type, count).unwrap()
    }

    fn adult(count: u32) -> TicketTypeRequest {
        request(TicketType::Adult, count)
    }

    fn child(count: u32) -> TicketTypeRequest {
        request(TicketType::Child, count)
    }

    fn infant(count: u32) -> TicketTypeRequest {
        request(TicketType::Infant, count)
    }

    #[test]
    fn test_adults_and_child_are_charged_and_seated() {
        let log = CallLog::default();
        let validator = PurchaseValidator::new(&log, &log);

        let outcome = validator.purchase(1, &[adult(2), child(1)]).unwrap();

        assert_eq!(outcome.total_amount, 50);
        assert_eq!(outcome.total_seats, 3);
        assert_eq!(
            log.calls(),
            vec![Call::Payment(1, 50), Call::Reservation(1, 3)]
        );
    }

    #[test]
    fn test_empty_purchase_still_calls_collaborators() {
        let log = CallLog::default();
        let validator = PurchaseValidator::new(&log, &log);

        let outcome = validator.purchase(1, &[]).unwrap();

        assert_eq!(outcome, PurchaseOutcome::default());
        assert_eq!(
            log.calls(),
            vec![Call::Payment(1, 0), Call::Reservation(1, 0)]
        );
    }

    #[test]
    fn test_infant_is_free_and_takes_no_seat() {
        let log = CallLog::default();
        let validator = PurchaseValidator::new(&log, &log);

        validator.purchase(1, &[adult(1), infant(1)]).unwrap();

        assert_eq!(
            log.calls(),
            vec![Call::Payment(1, 20), Call::Reservation(1, 1)]
        );
    }

    #[test]
    fn test_twenty_one_single_adult_requests_are_rejected() {
        let log = CallLog::default();
        let validator = PurchaseValidator::new(&log, &log);

        let requests = vec![adult(1); 21];
        let result = validator.purchase(1, &requests);

        assert_eq!(result, Err(PurchaseError::seat_limit_exceeded(21)));
        assert!(log.calls().is_empty());
    }

    #[rstest]
    #[case::zero(0)]
    #[case::negative(-1)]
    #[case::min(i64::MIN)]
    fn test_non_positive_account_is_rejected(#[case] account_id: i64) {
        let log = CallLog::default();
        let validator = PurchaseValidator::new(&log, &log);

        let result = validator.purchase(account_id, &[adult(1)]);

        assert!(matches!(result, Err(PurchaseError::InvalidAccount { .. })));
        assert!(log.calls().is_empty());
    }

    #[test]
    fn test_account_is_checked_before_requests() {
        let log = CallLog::default();
        let validator = PurchaseValidator::new(&log, &log);

        // Requests alone would fail the seat limit
        let result = validator.purchase(0, &[adult(25)]);

        assert!(matches!(result, Err(PurchaseError::InvalidAccount { .. })));
    }

    #[rstest]
    #[case::adults_only(vec![adult(20)], 400, 20)]
    #[case::adults_and_children(vec![adult(10), child(10)], 300, 20)]
    #[case::infants_take_no_seats(vec![adult(20), infant(20)], 400, 20)]
    #[case::split_adult_requests(vec![adult(1), child(1), adult(1), infant(1)], 50, 3)]
    #[case::child_after_enough_adults(vec![adult(3), child(2), infant(1)], 80, 5)]
    fn test_accepted_purchases_are_priced(
        #[case] requests: Vec<TicketTypeRequest>,
        #[case] amount: u64,
        #[case] seats: u64,
    ) {
        let log = CallLog::default();
        let validator = PurchaseValidator::new(&log, &log);

        let outcome = validator.purchase(7, &requests).unwrap();

        assert_eq!(outcome.total_amount, amount);
        assert_eq!(outcome.total_seats, seats);
        assert_eq!(
            log.calls(),
            vec![Call::Payment(7, amount), Call::Reservation(7, seats)]
        );
    }

    #[rstest]
    #[case::single_large_request(vec![adult(21)])]
    #[case::adults_and_children(vec![adult(11), child(10)])]
    #[case::limit_crossed_midway(vec![adult(15), adult(6), infant(1)])]
    #[case::child_only(vec![child(1)])]
    #[case::infant_only(vec![infant(1)])]
    #[case::child_before_adult(vec![child(1), adult(1)])]
    #[case::infant_before_adult(vec![infant(2), adult(5)])]
    #[case::minors_overtake_adults(vec![adult(1), infant(1), child(1)])]
    #[case::children_and_infants_only(vec![child(2), infant(1)])]
    fn test_policy_violations_are_rejected(#[case] requests: Vec<TicketTypeRequest>) {
        let log = CallLog::default();
        let validator = PurchaseValidator::new(&log, &log);

        let result = validator.purchase(1, &requests);

        assert!(matches!(result, Err(PurchaseError::InvalidPurchase { .. })));
        assert!(log.calls().is_empty());
    }

    #[test]
    fn test_seat_limit_reported_before_ratio() {
        let log = CallLog::default();
        let validator = PurchaseValidator::new(&log, &log);

        let result = validator.purchase(1, &[child(21)]);

        assert_eq!(result, Err(PurchaseError::seat_limit_exceeded(21)));
    }

    #[test]
    fn test_ratio_is_checked_at_each_prefix() {
        let log = CallLog::default();
        let validator = PurchaseValidator::new(&log, &log);

        // The final totals (2 minors, 5 adults) would be acceptable
        let result = validator.purchase(1, &[infant(2), adult(5)]);

        assert_eq!(result, Err(PurchaseError::minors_exceed_adults(2, 0)));
    }

    #[test]
    fn test_validator_is_reusable_across_purchases() {
        let log = CallLog::default();
        let validator = PurchaseValidator::new(&log, &log);

        assert!(validator.purchase(1, &[child(1)]).is_err());
        validator.purchase(2, &[adult(1)]).unwrap();

        assert_eq!(
            log.calls(),
            vec![Call::Payment(2, 20), Call::Reservation(2, 1)]
        );
    }

    #[test]
    fn test_tally_final_check_rejects_minors_without_adults() {
        let tally = PurchaseTally {
            minors: 1,
            ..PurchaseTally::default()
        };
        assert_eq!(
            tally.check_adult_present(),
            Err(PurchaseError::no_accompanying_adult())
        );

        let tally = PurchaseTally::default();
        assert!(tally.check_adult_present().is_ok());
    }

    #[test]
    fn test_tally_buckets_by_adult_requirement() {
        let mut tally = PurchaseTally::default();
        tally.add(&adult(3));
        tally.add(&child(1));
        tally.add(&infant(2));

        assert_eq!(tally.adults, 3);
        assert_eq!(tally.minors, 3);
        assert_eq!(tally.seats, 4);
        assert_eq!(tally.amount, 70);
    }
}
