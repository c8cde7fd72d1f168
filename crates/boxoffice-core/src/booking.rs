//! Admitting bookings only when the customer and the event they name exist.

use boxoffice_model::{Booking, Customer, EventKind, Id, MusicShow, TheaterPlay};
use thiserror::Error;

use crate::store::{IdsExhausted, Store};

/// A booking that names a record which is not in its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("no customer with id {0}")]
    UnknownCustomer(Id),
    #[error("no {} with id {id}", kind_name(.kind))]
    UnknownEvent { kind: EventKind, id: Id },
    #[error(transparent)]
    IdsExhausted(#[from] IdsExhausted),
}

const fn kind_name(kind: &EventKind) -> &'static str {
    match kind {
        EventKind::Theater => "theater play",
        EventKind::Music => "music show",
    }
}

/// Whether the catalog selected by `kind` holds a show with `event_id`.
#[must_use]
pub fn event_exists(
    theater: &Store<TheaterPlay>,
    music: &Store<MusicShow>,
    kind: EventKind,
    event_id: Id,
) -> bool {
    match kind {
        EventKind::Theater => theater.contains(event_id),
        EventKind::Music => music.contains(event_id),
    }
}

/// Create a booking after checking that the customer exists and that the
/// event exists in the catalog `kind` selects.
///
/// The customer is checked first. Nothing is written to `bookings` unless both
/// checks pass. References are only checked here: later removal of the
/// customer or show leaves the booking in place.
///
/// # Errors
///
/// Returns [`BookingError::UnknownCustomer`] or [`BookingError::UnknownEvent`]
/// naming the missing reference, and [`BookingError::IdsExhausted`] when the
/// booking store has no identifier left.
pub fn create_booking<'a>(
    customers: &Store<Customer>,
    theater: &Store<TheaterPlay>,
    music: &Store<MusicShow>,
    bookings: &'a mut Store<Booking>,
    customer_id: Id,
    (kind, event_id): (EventKind, Id),
) -> Result<&'a Booking, BookingError> {
    if !customers.contains(customer_id) {
        return Err(BookingError::UnknownCustomer(customer_id));
    }
    if !event_exists(theater, music, kind, event_id) {
        return Err(BookingError::UnknownEvent { kind, id: event_id });
    }
    bookings.create(|id| Ok(Booking::new(id, customer_id, kind, event_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct Fixture {
        customers: Store<Customer>,
        theater: Store<TheaterPlay>,
        music: Store<MusicShow>,
        bookings: Store<Booking>,
    }

    impl Fixture {
        fn new() -> Self {
            let mut customers = Store::new("customers.csv", Customer::FORMAT);
            customers.upsert(Customer::new(1, "Ana").unwrap());
            let mut theater = Store::new("theater.csv", TheaterPlay::FORMAT);
            let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
            theater.upsert(TheaterPlay::new(1, "Hamlet", "X", "VenueA", date).unwrap());
            Self {
                customers,
                theater,
                music: Store::new("music.csv", MusicShow::FORMAT),
                bookings: Store::new("bookings.csv", Booking::FORMAT),
            }
        }

        fn book(
            &mut self,
            customer_id: Id,
            kind: EventKind,
            event_id: Id,
        ) -> Result<Booking, BookingError> {
            create_booking(
                &self.customers,
                &self.theater,
                &self.music,
                &mut self.bookings,
                customer_id,
                (kind, event_id),
            )
            .copied()
        }
    }

    #[test]
    fn admits_booking_with_valid_references() {
        let mut f = Fixture::new();
        let booking = f.book(1, EventKind::Theater, 1).unwrap();
        assert_eq!(booking, Booking::new(1, 1, EventKind::Theater, 1));
        assert_eq!(f.bookings.len(), 1);
    }

    #[test]
    fn rejects_unknown_customer_without_mutation() {
        let mut f = Fixture::new();
        f.book(1, EventKind::Theater, 1).unwrap();
        let err = f.book(2, EventKind::Theater, 1).unwrap_err();
        assert_eq!(err, BookingError::UnknownCustomer(2));
        assert_eq!(f.bookings.len(), 1);
        assert!(f.bookings.get(1).is_some());
    }

    #[test]
    fn looks_up_event_in_the_catalog_of_its_kind() {
        let mut f = Fixture::new();
        // Show 1 exists only as a theater play.
        let err = f.book(1, EventKind::Music, 1).unwrap_err();
        assert_eq!(
            err,
            BookingError::UnknownEvent {
                kind: EventKind::Music,
                id: 1
            }
        );
        assert!(f.bookings.is_empty());
        assert_eq!(err.to_string(), "no music show with id 1");
    }

    #[test]
    fn customer_is_reported_before_event() {
        let mut f = Fixture::new();
        let err = f.book(9, EventKind::Music, 9).unwrap_err();
        assert_eq!(err, BookingError::UnknownCustomer(9));
    }

    #[test]
    fn full_booking_store_rejects_without_mutation() {
        let mut f = Fixture::new();
        f.bookings
            .upsert(Booking::new(Id::MAX, 1, EventKind::Theater, 1));
        let err = f.book(1, EventKind::Theater, 1).unwrap_err();
        assert_eq!(
            err,
            BookingError::IdsExhausted(IdsExhausted { kind: "booking" })
        );
        assert_eq!(f.bookings.len(), 1);
    }

    #[test]
    fn removing_customer_keeps_existing_bookings() {
        let mut f = Fixture::new();
        f.book(1, EventKind::Theater, 1).unwrap();
        f.customers.remove(1);
        assert_eq!(f.bookings.get(1).unwrap().customer_id(), 1);
        assert!(f.book(1, EventKind::Theater, 1).is_err());
    }
}
