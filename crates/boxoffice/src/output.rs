//! Human and JSON rendering of records and statistics

use std::io::Write;

use anyhow::Result;
use boxoffice_core::model::field::format_date;
use boxoffice_core::model::{Booking, Customer, MusicShow, TheaterPlay};
use boxoffice_core::{BoxOffice, TicketStats};
use serde::Serialize;

use crate::cli::StoreName;

pub fn theater_line(play: &TheaterPlay) -> String {
    format!(
        "#{id:<4} {title} - {protagonist} @ {venue}, {date}",
        id = play.id(),
        title = play.title(),
        protagonist = play.protagonist(),
        venue = play.venue(),
        date = format_date(play.date()),
    )
}

pub fn music_line(show: &MusicShow) -> String {
    format!(
        "#{id:<4} {title} - {singer} @ {venue}, {date}",
        id = show.id(),
        title = show.title(),
        singer = show.singer(),
        venue = show.venue(),
        date = format_date(show.date()),
    )
}

pub fn customer_line(customer: &Customer) -> String {
    format!("#{:<4} {}", customer.id(), customer.name())
}

/// A booking with its references resolved where they still exist.
#[derive(Serialize)]
pub struct BookingView<'a> {
    #[serde(flatten)]
    pub booking: &'a Booking,
    pub customer: Option<&'a str>,
    pub event: Option<&'a str>,
}

impl<'a> BookingView<'a> {
    pub fn new(office: &'a BoxOffice, booking: &'a Booking) -> Self {
        Self {
            booking,
            customer: office
                .customers
                .get(booking.customer_id())
                .map(Customer::name),
            event: office.event_title(booking.event_kind(), booking.event_id()),
        }
    }

    pub fn line(&self) -> String {
        let b = self.booking;
        format!(
            "#{id:<4} customer {cid} ({customer}) -> {kind} {eid} ({event})",
            id = b.id(),
            cid = b.customer_id(),
            customer = self.customer.unwrap_or("removed"),
            kind = b.event_kind(),
            eid = b.event_id(),
            event = self.event.unwrap_or("removed"),
        )
    }
}

pub fn booking_views(office: &BoxOffice) -> Vec<BookingView<'_>> {
    office
        .bookings
        .iter()
        .map(|b| BookingView::new(office, b))
        .collect()
}

/// Print every record of one store.
pub fn write_store(
    out: &mut impl Write,
    office: &BoxOffice,
    store: StoreName,
    json: bool,
) -> Result<()> {
    if json {
        let text = match store {
            StoreName::Theater => serde_json::to_string_pretty(&office.theater.iter().collect::<Vec<_>>())?,
            StoreName::Music => serde_json::to_string_pretty(&office.music.iter().collect::<Vec<_>>())?,
            StoreName::Customers => {
                serde_json::to_string_pretty(&office.customers.iter().collect::<Vec<_>>())?
            }
            StoreName::Bookings => serde_json::to_string_pretty(&booking_views(office))?,
        };
        writeln!(out, "{text}")?;
        return Ok(());
    }

    let lines: Vec<String> = match store {
        StoreName::Theater => office.theater.iter().map(theater_line).collect(),
        StoreName::Music => office.music.iter().map(music_line).collect(),
        StoreName::Customers => office.customers.iter().map(customer_line).collect(),
        StoreName::Bookings => booking_views(office).iter().map(BookingView::line).collect(),
    };
    if lines.is_empty() {
        writeln!(out, "(no records)")?;
    }
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

pub fn write_stats(out: &mut impl Write, stats: &TicketStats, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(stats)?)?;
        return Ok(());
    }

    writeln!(out, "Theater plays:")?;
    if stats.theater.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for tally in &stats.theater {
        writeln!(out, "  • {}: {}", tally.title, tally.bookings)?;
    }
    writeln!(out, "Music shows:")?;
    if stats.music.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for tally in &stats.music {
        writeln!(out, "  • {}: {}", tally.title, tally.bookings)?;
    }
    if stats.orphaned > 0 {
        writeln!(
            out,
            "{} booking(s) refer to shows that were removed",
            stats.orphaned
        )?;
    }
    Ok(())
}
