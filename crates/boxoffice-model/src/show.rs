//! Catalog entries: theater plays and music shows.

use chrono::NaiveDate;
use serde::Serialize;

use crate::codec::{DecodeError, Fields, Line};
use crate::field::{self, FieldError};
use crate::{Id, RecordFormat};

/// What the statistics need from either kind of show.
pub trait Show {
    fn id(&self) -> Id;
    fn title(&self) -> &str;
}

/// A theater play: `id|title|protagonist|venue|date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TheaterPlay {
    id: Id,
    title: String,
    protagonist: String,
    venue: String,
    date: NaiveDate,
}

impl TheaterPlay {
    pub const FORMAT: RecordFormat<Self> = RecordFormat {
        kind: "theater play",
        id: Self::id,
        encode: Self::encode,
        decode: Self::decode,
    };

    /// Build a play, rejecting values the line encoding cannot hold.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] naming the first unstorable field.
    pub fn new(
        id: Id,
        title: impl Into<String>,
        protagonist: impl Into<String>,
        venue: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            id,
            title: field::text("title", title)?,
            protagonist: field::text("protagonist", protagonist)?,
            venue: field::text("venue", venue)?,
            date: field::date("date", date)?,
        })
    }

    #[must_use]
    pub const fn id(&self) -> Id {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn protagonist(&self) -> &str {
        &self.protagonist
    }

    #[must_use]
    pub fn venue(&self) -> &str {
        &self.venue
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// # Errors
    ///
    /// Rejects text containing the delimiter or a line break.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), FieldError> {
        self.title = field::text("title", title)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Rejects text containing the delimiter or a line break.
    pub fn set_protagonist(&mut self, protagonist: impl Into<String>) -> Result<(), FieldError> {
        self.protagonist = field::text("protagonist", protagonist)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Rejects text containing the delimiter or a line break.
    pub fn set_venue(&mut self, venue: impl Into<String>) -> Result<(), FieldError> {
        self.venue = field::text("venue", venue)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Rejects dates whose year does not fit in four digits.
    pub fn set_date(&mut self, date: NaiveDate) -> Result<(), FieldError> {
        self.date = field::date("date", date)?;
        Ok(())
    }

    #[must_use]
    pub fn encode(&self) -> String {
        Line::default()
            .push(self.id)
            .push(&self.title)
            .push(&self.protagonist)
            .push(&self.venue)
            .push_date(self.date)
            .finish()
    }

    /// # Errors
    ///
    /// Returns a [`DecodeError`] naming the line when it is malformed.
    pub fn decode(line: &str) -> Result<Self, DecodeError> {
        let fields = Fields::split(line, 5)?;
        Ok(Self {
            id: fields.id(0, "id")?,
            title: fields.text(1, "title")?,
            protagonist: fields.text(2, "protagonist")?,
            venue: fields.text(3, "venue")?,
            date: fields.date(4, "date")?,
        })
    }
}

impl Show for TheaterPlay {
    fn id(&self) -> Id {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}

/// A music show: `id|title|singer|venue|date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MusicShow {
    id: Id,
    title: String,
    singer: String,
    venue: String,
    date: NaiveDate,
}

impl MusicShow {
    pub const FORMAT: RecordFormat<Self> = RecordFormat {
        kind: "music show",
        id: Self::id,
        encode: Self::encode,
        decode: Self::decode,
    };

    /// Build a show, rejecting values the line encoding cannot hold.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] naming the first unstorable field.
    pub fn new(
        id: Id,
        title: impl Into<String>,
        singer: impl Into<String>,
        venue: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            id,
            title: field::text("title", title)?,
            singer: field::text("singer", singer)?,
            venue: field::text("venue", venue)?,
            date: field::date("date", date)?,
        })
    }

    #[must_use]
    pub const fn id(&self) -> Id {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn singer(&self) -> &str {
        &self.singer
    }

    #[must_use]
    pub fn venue(&self) -> &str {
        &self.venue
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// # Errors
    ///
    /// Rejects text containing the delimiter or a line break.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), FieldError> {
        self.title = field::text("title", title)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Rejects text containing the delimiter or a line break.
    pub fn set_singer(&mut self, singer: impl Into<String>) -> Result<(), FieldError> {
        self.singer = field::text("singer", singer)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Rejects text containing the delimiter or a line break.
    pub fn set_venue(&mut self, venue: impl Into<String>) -> Result<(), FieldError> {
        self.venue = field::text("venue", venue)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Rejects dates whose year does not fit in four digits.
    pub fn set_date(&mut self, date: NaiveDate) -> Result<(), FieldError> {
        self.date = field::date("date", date)?;
        Ok(())
    }

    #[must_use]
    pub fn encode(&self) -> String {
        Line::default()
            .push(self.id)
            .push(&self.title)
            .push(&self.singer)
            .push(&self.venue)
            .push_date(self.date)
            .finish()
    }

    /// # Errors
    ///
    /// Returns a [`DecodeError`] naming the line when it is malformed.
    pub fn decode(line: &str) -> Result<Self, DecodeError> {
        let fields = Fields::split(line, 5)?;
        Ok(Self {
            id: fields.id(0, "id")?,
            title: fields.text(1, "title")?,
            singer: fields.text(2, "singer")?,
            venue: fields.text(3, "venue")?,
            date: fields.date(4, "date")?,
        })
    }
}

impl Show for MusicShow {
    fn id(&self) -> Id {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn may_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn encodes_theater_play_in_field_order() {
        let play = TheaterPlay::new(1, "Hamlet", "X", "VenueA", may_first()).unwrap();
        assert_eq!(play.encode(), "1|Hamlet|X|VenueA|2024-05-01");
    }

    #[test]
    fn theater_play_survives_encoding() {
        let play = TheaterPlay::new(42, "Oedipus Rex", "", "Epidaurus", may_first()).unwrap();
        assert_eq!(TheaterPlay::decode(&play.encode()).unwrap(), play);
    }

    #[test]
    fn music_show_survives_encoding() {
        let show = MusicShow::new(3, "Live", "Haris Alexiou", "Odeon, Athens", may_first()).unwrap();
        assert_eq!(show.encode(), "3|Live|Haris Alexiou|Odeon, Athens|2024-05-01");
        assert_eq!(MusicShow::decode(&show.encode()).unwrap(), show);
    }

    #[test]
    fn rejects_invalid_calendar_date_on_decode() {
        let err = TheaterPlay::decode("1|Hamlet|X|VenueA|2024-02-30").unwrap_err();
        assert!(matches!(err, DecodeError::Date { field: "date", .. }));
    }

    #[test]
    fn rejects_short_and_long_lines() {
        assert!(matches!(
            MusicShow::decode("1|Live|Singer|Venue"),
            Err(DecodeError::FieldCount { found: 4, .. })
        ));
        assert!(matches!(
            MusicShow::decode("1|Live|Sing|er|Venue|2024-05-01"),
            Err(DecodeError::FieldCount { found: 6, .. })
        ));
    }

    #[test]
    fn setters_refuse_the_delimiter_and_keep_old_value() {
        let mut show = MusicShow::new(1, "Live", "Singer", "Venue", may_first()).unwrap();
        assert!(show.set_title("Live | Loud").is_err());
        assert_eq!(show.title(), "Live");
        show.set_singer("Other").unwrap();
        assert_eq!(show.singer(), "Other");
    }

    #[test]
    fn constructor_refuses_the_delimiter() {
        let err = TheaterPlay::new(1, "A", "B|C", "D", may_first()).unwrap_err();
        assert_eq!(err, FieldError::Delimiter { field: "protagonist" });
    }

    #[test]
    fn format_reads_identifier_through_accessor() {
        let play = TheaterPlay::new(9, "A", "B", "C", may_first()).unwrap();
        assert_eq!((TheaterPlay::FORMAT.id)(&play), 9);
    }
}
