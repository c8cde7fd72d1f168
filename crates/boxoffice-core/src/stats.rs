//! Ticket counts per show, derived from the bookings.

use std::collections::HashMap;

use boxoffice_model::{Booking, EventKind, Id, MusicShow, Show, TheaterPlay};
use serde::Serialize;

use crate::store::Store;

/// Number of bookings for one show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowTally {
    pub show_id: Id,
    pub title: String,
    pub bookings: usize,
}

/// Per-show booking counts for both catalogs, each in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketStats {
    pub theater: Vec<ShowTally>,
    pub music: Vec<ShowTally>,
    /// Bookings whose show is no longer in its catalog.
    pub orphaned: usize,
}

/// Count bookings of `kind`, grouped by event identifier.
#[must_use]
pub fn bookings_per_event<'a>(
    bookings: impl IntoIterator<Item = &'a Booking>,
    kind: EventKind,
) -> HashMap<Id, usize> {
    let mut counts = HashMap::new();
    for booking in bookings {
        if booking.event_kind() == kind {
            *counts.entry(booking.event_id()).or_insert(0) += 1;
        }
    }
    counts
}

fn tally<'a, S: Show + 'a>(
    shows: impl IntoIterator<Item = &'a S>,
    counts: &mut HashMap<Id, usize>,
) -> Vec<ShowTally> {
    shows
        .into_iter()
        .map(|show| ShowTally {
            show_id: show.id(),
            title: show.title().to_string(),
            bookings: counts.remove(&show.id()).unwrap_or(0),
        })
        .collect()
}

/// Join booking counts against both catalogs.
///
/// Every show appears, with 0 when nothing references it. Never mutates a store.
#[must_use]
pub fn ticket_stats(
    bookings: &Store<Booking>,
    theater: &Store<TheaterPlay>,
    music: &Store<MusicShow>,
) -> TicketStats {
    let mut theater_counts = bookings_per_event(bookings, EventKind::Theater);
    let mut music_counts = bookings_per_event(bookings, EventKind::Music);

    let theater = tally(theater, &mut theater_counts);
    let music = tally(music, &mut music_counts);

    // Whatever was not claimed by a show refers to a removed one.
    let orphaned = theater_counts.values().chain(music_counts.values()).sum();

    TicketStats {
        theater,
        music,
        orphaned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn bookings(rows: &[(Id, Id, EventKind, Id)]) -> Store<Booking> {
        let mut store = Store::new("bookings.csv", Booking::FORMAT);
        for &(id, customer, kind, event) in rows {
            store.upsert(Booking::new(id, customer, kind, event));
        }
        store
    }

    #[test]
    fn counts_per_show_with_zero_for_unbooked() {
        let bookings = bookings(&[
            (1, 1, EventKind::Theater, 10),
            (2, 1, EventKind::Theater, 10),
            (3, 1, EventKind::Music, 20),
        ]);
        let mut theater = Store::new("theater.csv", TheaterPlay::FORMAT);
        theater.upsert(TheaterPlay::new(10, "Hamlet", "X", "VenueA", date()).unwrap());
        theater.upsert(TheaterPlay::new(11, "Medea", "Y", "VenueB", date()).unwrap());
        let music = Store::new("music.csv", MusicShow::FORMAT);

        let stats = ticket_stats(&bookings, &theater, &music);
        assert_eq!(
            stats.theater,
            vec![
                ShowTally {
                    show_id: 10,
                    title: "Hamlet".into(),
                    bookings: 2
                },
                ShowTally {
                    show_id: 11,
                    title: "Medea".into(),
                    bookings: 0
                },
            ]
        );
        assert!(stats.music.is_empty());
        // Booking 3 points at music show 20, which is not in the catalog.
        assert_eq!(stats.orphaned, 1);
    }

    #[test]
    fn same_id_in_both_catalogs_is_counted_separately() {
        let bookings = bookings(&[
            (1, 1, EventKind::Theater, 1),
            (2, 1, EventKind::Music, 1),
            (3, 2, EventKind::Music, 1),
        ]);
        let mut theater = Store::new("theater.csv", TheaterPlay::FORMAT);
        theater.upsert(TheaterPlay::new(1, "Hamlet", "X", "V", date()).unwrap());
        let mut music = Store::new("music.csv", MusicShow::FORMAT);
        music.upsert(MusicShow::new(1, "Live", "S", "V", date()).unwrap());

        let stats = ticket_stats(&bookings, &theater, &music);
        assert_eq!(stats.theater[0].bookings, 1);
        assert_eq!(stats.music[0].bookings, 2);
        assert_eq!(stats.orphaned, 0);
    }

    #[test]
    fn groups_by_event_within_kind() {
        let bookings = bookings(&[
            (1, 1, EventKind::Music, 5),
            (2, 2, EventKind::Music, 5),
            (3, 3, EventKind::Music, 6),
            (4, 3, EventKind::Theater, 5),
        ]);
        let counts = bookings_per_event(&bookings, EventKind::Music);
        assert_eq!(counts.get(&5), Some(&2));
        assert_eq!(counts.get(&6), Some(&1));
        assert_eq!(counts.len(), 2);
    }
}
