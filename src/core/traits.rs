//! Collaborator traits for payment and seat reservation
//!
//! The purchase validator never talks to a payment gateway or booking system
//! directly. It is handed one implementation of each trait at construction and
//! calls them only after a purchase has passed validation.
//!
//! Both traits are implemented for `&T` and `Arc<T>` so a single ledger can be
//! shared as both collaborators, either borrowed (sync) or reference counted
//! across tasks (async).

use crate::types::AccountId;
use std::sync::Arc;

/// Takes payment for an accepted purchase
///
/// Assumed to always succeed.
pub trait PaymentProcessor {
    /// Charge `amount` currency units to `account`
    fn make_payment(&self, account: AccountId, amount: u64);
}

/// Reserves seats for an accepted purchase
///
/// Assumed to always succeed.
pub trait SeatReservation {
    /// Reserve `seats` seats for `account`
    fn reserve_seat(&self, account: AccountId, seats: u64);
}

impl<T: PaymentProcessor + ?Sized> PaymentProcessor for &T {
    fn make_payment(&self, account: AccountId, amount: u64) {
        (**self).make_payment(account, amount)
    }
}

impl<T: PaymentProcessor + ?Sized> PaymentProcessor for Arc<T> {
    fn make_payment(&self, account: AccountId, amount: u64) {
        (**self).make_payment(account, amount)
    }
}

impl<T: SeatReservation + ?Sized> SeatReservation for &T {
    fn reserve_seat(&self, account: AccountId, seats: u64) {
        (**self).reserve_seat(account, seats)
    }
}

impl<T: SeatReservation + ?Sized> SeatReservation for Arc<T> {
    fn reserve_seat(&self, account: AccountId, seats: u64) {
        (**self).reserve_seat(account, seats)
    }
}
