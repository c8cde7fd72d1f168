use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::codec::{DecodeError, Fields, Line};
use crate::{Id, RecordFormat};

/// Which catalog a booking's event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Theater,
    Music,
}

impl EventKind {
    /// Persisted tag for this kind.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Theater => "THEATER",
            Self::Music => "MUSIC",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Unknown event tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEventKind(pub String);

impl fmt::Display for UnknownEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown event type '{}' - use THEATER or MUSIC", self.0)
    }
}

impl std::error::Error for UnknownEventKind {}

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "THEATER" => Ok(Self::Theater),
            "MUSIC" => Ok(Self::Music),
            other => Err(UnknownEventKind(other.to_string())),
        }
    }
}

/// A booking: `id|customerId|eventType|eventId`.
///
/// Bookings are never edited; they are only created and removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Booking {
    id: Id,
    customer_id: Id,
    event_kind: EventKind,
    event_id: Id,
}

impl Booking {
    pub const FORMAT: RecordFormat<Self> = RecordFormat {
        kind: "booking",
        id: Self::id,
        encode: Self::encode,
        decode: Self::decode,
    };

    #[must_use]
    pub const fn new(id: Id, customer_id: Id, event_kind: EventKind, event_id: Id) -> Self {
        Self {
            id,
            customer_id,
            event_kind,
            event_id,
        }
    }

    #[must_use]
    pub const fn id(&self) -> Id {
        self.id
    }

    #[must_use]
    pub const fn customer_id(&self) -> Id {
        self.customer_id
    }

    #[must_use]
    pub const fn event_kind(&self) -> EventKind {
        self.event_kind
    }

    #[must_use]
    pub const fn event_id(&self) -> Id {
        self.event_id
    }

    #[must_use]
    pub fn encode(&self) -> String {
        Line::default()
            .push(self.id)
            .push(self.customer_id)
            .push(self.event_kind)
            .push(self.event_id)
            .finish()
    }

    /// # Errors
    ///
    /// Returns a [`DecodeError`] naming the line when it is malformed.
    pub fn decode(line: &str) -> Result<Self, DecodeError> {
        let fields = Fields::split(line, 4)?;
        let event_kind = fields
            .raw(2)
            .parse()
            .map_err(|UnknownEventKind(value)| DecodeError::EventKind {
                value,
                line: fields.line(),
            })?;
        Ok(Self {
            id: fields.id(0, "id")?,
            customer_id: fields.id(1, "customerId")?,
            event_kind,
            event_id: fields.id(3, "eventId")?,
        })
    }
}
