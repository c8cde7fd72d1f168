#![warn(rust_2024_compatibility, clippy::all)]

//! Persistence and rules for the boxoffice catalog.
//!
//! A [`Store`] keeps the records of one kind in memory and mirrors them to a
//! line file. [`BoxOffice`] owns the four stores, admits bookings only when
//! their customer and show exist, and derives ticket statistics. Nothing in
//! this crate prints or logs; every failure is returned to the caller.

pub mod booking;
mod boxoffice;
pub mod config;
pub mod stats;
pub mod store;

pub use booking::{BookingError, create_booking};
pub use boxoffice::{BoxOffice, Counts};
pub use config::{BoxOfficeConfig, ConfigError};
pub use stats::{ShowTally, TicketStats, ticket_stats};
pub use store::{IdsExhausted, Store, StoreError};

pub use boxoffice_model as model;
