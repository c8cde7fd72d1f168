//! Interactive menu over the four stores

use std::io::{BufRead, Write};

use anyhow::Result;
use boxoffice_core::model::{Customer, EventKind, Id, MusicShow, TheaterPlay};
use boxoffice_core::{BookingError, BoxOffice};

use crate::output::{self, BookingView, customer_line, music_line, theater_line};
use crate::prompt::{EndOfInput, Prompt};
use crate::session;

const MAIN_MENU: &str = "\
Box office
  1. Theater plays
  2. Music shows
  3. Customers
  4. Book a theater play
  5. Book a music show
  6. Ticket statistics
  7. Bookings
  0. Exit";

const CRUD_MENU: &str = "  a. Add\n  b. Edit\n  c. Delete\n  d. List\n  x. Back";

const BOOKINGS_MENU: &str = "Bookings\n  a. List\n  b. Cancel\n  x. Back";

enum Crud {
    Add,
    Edit,
    Delete,
    List,
    Back,
}

pub struct Shell<'a, R, W> {
    office: &'a mut BoxOffice,
    autosave: bool,
    prompt: Prompt<R, W>,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub const fn new(office: &'a mut BoxOffice, autosave: bool, input: R, output: W) -> Self {
        Self {
            office,
            autosave,
            prompt: Prompt::new(input, output),
        }
    }

    pub fn into_output(self) -> W {
        self.prompt.into_output()
    }

    /// Serve menu choices until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.step() {
                Ok(true) => {}
                Ok(false) => return Ok(()),
                Err(e) if e.is::<EndOfInput>() => {
                    tracing::debug!("input closed, leaving shell");
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn step(&mut self) -> Result<bool> {
        self.prompt.say(MAIN_MENU)?;
        match self.prompt.choice("Choice")?.as_str() {
            "1" => self.theater_menu()?,
            "2" => self.music_menu()?,
            "3" => self.customer_menu()?,
            "4" => self.book(EventKind::Theater)?,
            "5" => self.book(EventKind::Music)?,
            "6" => self.stats()?,
            "7" => self.bookings_menu()?,
            "0" => return Ok(false),
            other => self.prompt.error(format_args!("Unknown choice '{other}'"))?,
        }
        Ok(true)
    }

    fn crud_choice(&mut self, title: &str) -> Result<Crud> {
        self.prompt.say(title)?;
        self.prompt.say(CRUD_MENU)?;
        Ok(match self.prompt.choice("Choice")?.as_str() {
            "a" => Crud::Add,
            "b" => Crud::Edit,
            "c" => Crud::Delete,
            "d" => Crud::List,
            _ => Crud::Back,
        })
    }

    /// Persist right away when autosave is on; otherwise the caller saves at exit.
    fn changed(&mut self) -> Result<()> {
        if self.autosave {
            session::save(self.office)?;
        }
        Ok(())
    }

    fn theater_menu(&mut self) -> Result<()> {
        match self.crud_choice("Theater plays")? {
            Crud::Add => {
                let title = self.prompt.text("title", "Title")?;
                let protagonist = self.prompt.text("protagonist", "Protagonist")?;
                let venue = self.prompt.text("venue", "Venue")?;
                let date = self.prompt.date("Date")?;
                let created = self
                    .office
                    .theater
                    .create(|id| {
                        TheaterPlay::new(id, title, protagonist, venue, date)
                            .map_err(anyhow::Error::from)
                    })
                    .map(TheaterPlay::id);
                let id = match created {
                    Ok(id) => id,
                    Err(e) => return self.not_added(&e),
                };
                tracing::info!(id, "theater play added");
                self.changed()?;
                self.prompt.success(format_args!("Added theater play #{id}"))?;
            }
            Crud::Edit => {
                let id = self.prompt.id("Id")?;
                let Some(mut play) = self.office.theater.get(id).cloned() else {
                    return self.prompt.error(format_args!("No theater play #{id}"));
                };
                if let Some(v) = self.prompt.text_or_keep("title", "New title", play.title())? {
                    play.set_title(v)?;
                }
                if let Some(v) =
                    self.prompt
                        .text_or_keep("protagonist", "New protagonist", play.protagonist())?
                {
                    play.set_protagonist(v)?;
                }
                if let Some(v) = self.prompt.text_or_keep("venue", "New venue", play.venue())? {
                    play.set_venue(v)?;
                }
                if let Some(d) = self.prompt.date_or_keep("New date", play.date())? {
                    play.set_date(d)?;
                }
                self.office.theater.upsert(play);
                tracing::info!(id, "theater play updated");
                self.changed()?;
                self.prompt.success(format_args!("Updated theater play #{id}"))?;
            }
            Crud::Delete => {
                let id = self.prompt.id("Id")?;
                if self.office.theater.remove(id).is_none() {
                    return self.prompt.error(format_args!("No theater play #{id}"));
                }
                tracing::info!(id, "theater play removed");
                self.changed()?;
                self.prompt.success(format_args!("Deleted theater play #{id}"))?;
                self.note_dangling(self.office.bookings_for_event(EventKind::Theater, id))?;
            }
            Crud::List => self.list_shows(EventKind::Theater)?,
            Crud::Back => {}
        }
        Ok(())
    }

    fn music_menu(&mut self) -> Result<()> {
        match self.crud_choice("Music shows")? {
            Crud::Add => {
                let title = self.prompt.text("title", "Title")?;
                let singer = self.prompt.text("singer", "Singer")?;
                let venue = self.prompt.text("venue", "Venue")?;
                let date = self.prompt.date("Date")?;
                let created = self
                    .office
                    .music
                    .create(|id| {
                        MusicShow::new(id, title, singer, venue, date).map_err(anyhow::Error::from)
                    })
                    .map(MusicShow::id);
                let id = match created {
                    Ok(id) => id,
                    Err(e) => return self.not_added(&e),
                };
                tracing::info!(id, "music show added");
                self.changed()?;
                self.prompt.success(format_args!("Added music show #{id}"))?;
            }
            Crud::Edit => {
                let id = self.prompt.id("Id")?;
                let Some(mut show) = self.office.music.get(id).cloned() else {
                    return self.prompt.error(format_args!("No music show #{id}"));
                };
                if let Some(v) = self.prompt.text_or_keep("title", "New title", show.title())? {
                    show.set_title(v)?;
                }
                if let Some(v) = self.prompt.text_or_keep("singer", "New singer", show.singer())? {
                    show.set_singer(v)?;
                }
                if let Some(v) = self.prompt.text_or_keep("venue", "New venue", show.venue())? {
                    show.set_venue(v)?;
                }
                if let Some(d) = self.prompt.date_or_keep("New date", show.date())? {
                    show.set_date(d)?;
                }
                self.office.music.upsert(show);
                tracing::info!(id, "music show updated");
                self.changed()?;
                self.prompt.success(format_args!("Updated music show #{id}"))?;
            }
            Crud::Delete => {
                let id = self.prompt.id("Id")?;
                if self.office.music.remove(id).is_none() {
                    return self.prompt.error(format_args!("No music show #{id}"));
                }
                tracing::info!(id, "music show removed");
                self.changed()?;
                self.prompt.success(format_args!("Deleted music show #{id}"))?;
                self.note_dangling(self.office.bookings_for_event(EventKind::Music, id))?;
            }
            Crud::List => self.list_shows(EventKind::Music)?,
            Crud::Back => {}
        }
        Ok(())
    }

    fn customer_menu(&mut self) -> Result<()> {
        match self.crud_choice("Customers")? {
            Crud::Add => {
                let name = self.prompt.text("name", "Name")?;
                let created = self
                    .office
                    .customers
                    .create(|id| Customer::new(id, name).map_err(anyhow::Error::from))
                    .map(Customer::id);
                let id = match created {
                    Ok(id) => id,
                    Err(e) => return self.not_added(&e),
                };
                tracing::info!(id, "customer added");
                self.changed()?;
                self.prompt.success(format_args!("Added customer #{id}"))?;
            }
            Crud::Edit => {
                let id = self.prompt.id("Id")?;
                let Some(current) = self.office.customers.get(id).map(|c| c.name().to_string())
                else {
                    return self.prompt.error(format_args!("No customer #{id}"));
                };
                let renamed = self.prompt.text_or_keep("name", "New name", &current)?;
                if let Some((customer, name)) = self.office.customers.get_mut(id).zip(renamed) {
                    customer.set_name(name)?;
                }
                tracing::info!(id, "customer updated");
                self.changed()?;
                self.prompt.success(format_args!("Updated customer #{id}"))?;
            }
            Crud::Delete => {
                let id = self.prompt.id("Id")?;
                if self.office.customers.remove(id).is_none() {
                    return self.prompt.error(format_args!("No customer #{id}"));
                }
                tracing::info!(id, "customer removed");
                self.changed()?;
                self.prompt.success(format_args!("Deleted customer #{id}"))?;
                let remaining = self.office.bookings_for_customer(id).count();
                self.note_dangling(remaining)?;
            }
            Crud::List => {
                if self.office.customers.is_empty() {
                    self.prompt.say("(no records)")?;
                }
                let lines: Vec<String> = self.office.customers.iter().map(customer_line).collect();
                for line in lines {
                    self.prompt.say(line)?;
                }
            }
            Crud::Back => {}
        }
        Ok(())
    }

    fn not_added(&mut self, error: &anyhow::Error) -> Result<()> {
        tracing::warn!(%error, "record not added");
        self.prompt.error(error)
    }

    fn note_dangling(&mut self, bookings: usize) -> Result<()> {
        if bookings > 0 {
            self.prompt
                .say(format_args!("  {bookings} booking(s) still refer to it"))?;
        }
        Ok(())
    }

    fn list_shows(&mut self, kind: EventKind) -> Result<()> {
        let lines: Vec<String> = match kind {
            EventKind::Theater => self.office.theater.iter().map(theater_line).collect(),
            EventKind::Music => self.office.music.iter().map(music_line).collect(),
        };
        if lines.is_empty() {
            self.prompt.say("(no records)")?;
        }
        for line in lines {
            self.prompt.say(line)?;
        }
        Ok(())
    }

    fn book(&mut self, kind: EventKind) -> Result<()> {
        let customer_id = self.prompt.id("Customer id")?;
        // Fail before listing shows, as the booking itself would.
        if !self.office.customers.contains(customer_id) {
            tracing::warn!(customer_id, "booking rejected: unknown customer");
            return self
                .prompt
                .error(BookingError::UnknownCustomer(customer_id));
        }

        self.list_shows(kind)?;
        let event_id: Id = self.prompt.id("Show id")?;

        match self.office.book(customer_id, kind, event_id).map(|b| b.id()) {
            Ok(id) => {
                tracing::info!(id, customer_id, %kind, event_id, "booking admitted");
                self.changed()?;
                self.prompt.success(format_args!("Booking #{id} confirmed"))
            }
            Err(e) => {
                tracing::warn!(error = %e, "booking rejected");
                self.prompt.error(e)
            }
        }
    }

    fn stats(&mut self) -> Result<()> {
        let stats = self.office.stats();
        output::write_stats(self.prompt.output(), &stats, false)
    }

    fn bookings_menu(&mut self) -> Result<()> {
        self.prompt.say(BOOKINGS_MENU)?;
        match self.prompt.choice("Choice")?.as_str() {
            "a" => {
                if self.office.bookings.is_empty() {
                    self.prompt.say("(no records)")?;
                }
                let office: &BoxOffice = self.office;
                let lines: Vec<String> = office
                    .bookings
                    .iter()
                    .map(|b| BookingView::new(office, b).line())
                    .collect();
                for line in lines {
                    self.prompt.say(line)?;
                }
            }
            "b" => {
                let id = self.prompt.id("Booking id")?;
                if self.office.cancel(id).is_none() {
                    return self.prompt.error(format_args!("No booking #{id}"));
                }
                tracing::info!(id, "booking cancelled");
                self.changed()?;
                self.prompt.success(format_args!("Cancelled booking #{id}"))?;
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxoffice_core::BoxOfficeConfig;

    fn run(office: &mut BoxOffice, script: &str) -> String {
        let mut shell = Shell::new(office, false, script.as_bytes(), Vec::new());
        shell.run().unwrap();
        String::from_utf8(shell.into_output()).unwrap()
    }

    fn empty_office() -> BoxOffice {
        BoxOffice::new(&BoxOfficeConfig::default())
    }

    #[test]
    fn exits_on_zero_and_on_end_of_input() {
        let mut office = empty_office();
        assert!(run(&mut office, "0\n").contains("Box office"));
        assert!(run(&mut office, "").contains("Box office"));
    }

    #[test]
    fn adds_and_renames_customer() {
        let mut office = empty_office();
        let out = run(&mut office, "3\na\nAna\n3\nb\n1\nAnna\n0\n");
        assert!(out.contains("✔ Added customer #1"));
        assert!(out.contains("New name [Ana]: "));
        assert_eq!(office.customers.get(1).map(Customer::name), Some("Anna"));
    }

    #[test]
    fn edit_keeps_blank_fields() {
        let mut office = empty_office();
        run(
            &mut office,
            "1\na\nHamlet\nX\nVenueA\n2024-05-01\n1\nb\n1\n\nY\n\n\n0\n",
        );
        let play = office.theater.get(1).unwrap();
        assert_eq!(play.title(), "Hamlet");
        assert_eq!(play.protagonist(), "Y");
        assert_eq!(play.venue(), "VenueA");
    }

    #[test]
    fn booking_with_unknown_customer_is_refused() {
        let mut office = empty_office();
        let out = run(&mut office, "4\n2\n0\n");
        assert!(out.contains("✖ no customer with id 2"));
        assert!(office.bookings.is_empty());
    }

    #[test]
    fn books_and_reports_statistics() {
        let mut office = empty_office();
        let out = run(
            &mut office,
            "3\na\nAna\n2\na\nLive\nSinger\nOdeon\n2025-01-10\n5\n1\n1\n5\n1\n9\n6\n0\n",
        );
        assert!(out.contains("✔ Booking #1 confirmed"));
        assert!(out.contains("✖ no music show with id 9"));
        assert!(out.contains("  • Live: 1"));
        assert_eq!(office.bookings.len(), 1);
    }

    #[test]
    fn deleting_a_booked_show_leaves_the_booking() {
        let mut office = empty_office();
        let out = run(
            &mut office,
            "3\na\nAna\n1\na\nHamlet\nX\nV\n2024-05-01\n4\n1\n1\n1\nc\n1\n7\na\n0\n",
        );
        assert!(out.contains("1 booking(s) still refer to it"));
        assert!(out.contains("-> THEATER 1 (removed)"));
        assert_eq!(office.bookings.len(), 1);
        assert!(office.theater.is_empty());
    }

    #[test]
    fn cancels_booking_and_reports_missing_ones() {
        let mut office = empty_office();
        let out = run(
            &mut office,
            "3\na\nAna\n1\na\nHamlet\nX\nV\n2024-05-01\n4\n1\n1\n7\nb\n1\n7\nb\n1\n0\n",
        );
        assert!(out.contains("✔ Cancelled booking #1"));
        assert!(out.contains("✖ No booking #1"));
        assert!(office.bookings.is_empty());
    }

    #[test]
    fn adding_past_the_largest_identifier_is_refused() {
        let mut office = empty_office();
        office
            .customers
            .upsert(Customer::new(Id::MAX, "Max").unwrap());
        let out = run(&mut office, "3\na\nAna\n3\nd\n0\n");
        assert!(out.contains("✖ no customer identifier left above 4294967295"));
        assert!(out.contains("Max"));
        assert_eq!(office.customers.len(), 1);
    }

    #[test]
    fn unknown_main_choice_is_reported() {
        let mut office = empty_office();
        assert!(run(&mut office, "9\n0\n").contains("Unknown choice '9'"));
    }
}
