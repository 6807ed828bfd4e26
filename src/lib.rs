//! In-memory core for the BookaStay guesthouse booking platform: hostels and
//! their rooms, date-range availability, the booking workflow, admin
//! invitations, feedback, and dashboard statistics.
//!
//! All times are unix milliseconds and all stay ranges are half-open
//! `[check_in, check_out)`. The [`engine::Engine`] holds the live snapshots;
//! [`notify::NotifyHub`] broadcasts per-hostel change events.

pub mod engine;
pub mod expiry;
pub mod limits;
pub mod model;
pub mod notify;
pub mod observability;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use engine::{Engine, EngineError, HostelFilter, PriceBand};
pub use notify::NotifyHub;
