#![warn(rust_2024_compatibility, clippy::all)]

//! Record types for the boxoffice catalog and their one-line text encoding.
//!
//! Every record kind is stored as a single line of `|`-separated fields with a
//! fixed field order and no header. The text rules in [`field`] guarantee that a
//! record held in memory always encodes to a line that decodes back to itself.

mod booking;
mod codec;
mod customer;
pub mod field;
mod show;

pub use booking::{Booking, EventKind, UnknownEventKind};
pub use codec::{DELIMITER, DecodeError};
pub use customer::Customer;
pub use field::FieldError;
pub use show::{MusicShow, Show, TheaterPlay};

/// Integer key naming a record within its own store.
pub type Id = u32;

/// Everything a store needs to know about one record kind.
///
/// The identifier accessor is passed explicitly instead of being discovered
/// at runtime, so a store can only be built for kinds that provide one.
pub struct RecordFormat<T> {
    /// Short kind name used in error messages, e.g. `"customer"`.
    pub kind: &'static str,
    pub id: fn(&T) -> Id,
    pub encode: fn(&T) -> String,
    pub decode: fn(&str) -> Result<T, DecodeError>,
}

impl<T> Clone for RecordFormat<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RecordFormat<T> {}

impl<T> std::fmt::Debug for RecordFormat<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordFormat")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
