//! The four stores of one box office, owned together.

use boxoffice_model::{Booking, Customer, EventKind, Id, MusicShow, TheaterPlay};

use crate::booking::{self, BookingError};
use crate::config::BoxOfficeConfig;
use crate::stats::{self, TicketStats};
use crate::store::{Store, StoreError};

/// Theater and music catalogs, customers and bookings.
///
/// Fields are public so callers can borrow one store mutably while reading
/// the others.
#[derive(Debug)]
pub struct BoxOffice {
    pub theater: Store<TheaterPlay>,
    pub music: Store<MusicShow>,
    pub customers: Store<Customer>,
    pub bookings: Store<Booking>,
}

/// Record counts per store, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub theater: usize,
    pub music: usize,
    pub customers: usize,
    pub bookings: usize,
}

impl BoxOffice {
    /// Empty stores backed by the files `config` names. Nothing is read yet.
    #[must_use]
    pub fn new(config: &BoxOfficeConfig) -> Self {
        Self {
            theater: Store::new(config.theater_path(), TheaterPlay::FORMAT),
            music: Store::new(config.music_path(), MusicShow::FORMAT),
            customers: Store::new(config.customers_path(), Customer::FORMAT),
            bookings: Store::new(config.bookings_path(), Booking::FORMAT),
        }
    }

    /// Build the stores and load all four from disk.
    ///
    /// # Errors
    ///
    /// Returns the first [`StoreError`] met while loading.
    pub fn open(config: &BoxOfficeConfig) -> Result<Self, StoreError> {
        let mut office = Self::new(config);
        office.load()?;
        Ok(office)
    }

    /// # Errors
    ///
    /// Returns the first [`StoreError`] met; stores loaded before it keep their new contents.
    pub fn load(&mut self) -> Result<(), StoreError> {
        self.theater.load()?;
        self.music.load()?;
        self.customers.load()?;
        self.bookings.load()
    }

    /// Write all four stores back to their files.
    ///
    /// # Errors
    ///
    /// Returns the first [`StoreError`] met; later stores are not written.
    pub fn flush(&self) -> Result<(), StoreError> {
        self.theater.flush()?;
        self.music.flush()?;
        self.customers.flush()?;
        self.bookings.flush()
    }

    #[must_use]
    pub fn counts(&self) -> Counts {
        Counts {
            theater: self.theater.len(),
            music: self.music.len(),
            customers: self.customers.len(),
            bookings: self.bookings.len(),
        }
    }

    /// Book `customer_id` onto the `kind` show `event_id`.
    ///
    /// # Errors
    ///
    /// See [`booking::create_booking`].
    pub fn book(
        &mut self,
        customer_id: Id,
        kind: EventKind,
        event_id: Id,
    ) -> Result<&Booking, BookingError> {
        booking::create_booking(
            &self.customers,
            &self.theater,
            &self.music,
            &mut self.bookings,
            customer_id,
            (kind, event_id),
        )
    }

    /// Remove a booking. Returns `None` when there was none with `id`.
    pub fn cancel(&mut self, id: Id) -> Option<Booking> {
        self.bookings.remove(id)
    }

    /// Title of the show a booking points at, if it still exists.
    #[must_use]
    pub fn event_title(&self, kind: EventKind, event_id: Id) -> Option<&str> {
        match kind {
            EventKind::Theater => self.theater.get(event_id).map(TheaterPlay::title),
            EventKind::Music => self.music.get(event_id).map(MusicShow::title),
        }
    }

    pub fn bookings_for_customer(&self, customer_id: Id) -> impl Iterator<Item = &Booking> {
        self.bookings
            .iter()
            .filter(move |b| b.customer_id() == customer_id)
    }

    /// Number of bookings still naming the show; removal does not cascade.
    #[must_use]
    pub fn bookings_for_event(&self, kind: EventKind, event_id: Id) -> usize {
        self.bookings
            .iter()
            .filter(|b| b.event_kind() == kind && b.event_id() == event_id)
            .count()
    }

    #[must_use]
    pub fn stats(&self) -> TicketStats {
        stats::ticket_stats(&self.bookings, &self.theater, &self.music)
    }
}
