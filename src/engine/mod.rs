mod availability;
mod conflict;
mod error;
mod mutations;
mod queries;
mod stats;

pub use availability::{is_available, project_availability};
pub(crate) use conflict::now_ms;
pub use error::EngineError;
pub use queries::{HostelFilter, PriceBand};
pub use stats::{aggregate, summarize};

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use dashmap::DashMap;
use ulid::Ulid;

use crate::model::*;
use crate::notify::NotifyHub;

/// In-memory domain engine: hostels, bookings, invitations, feedback.
///
/// The collections are snapshots of what the remote store holds — the engine
/// owns no persistence. Bookings live in one append-ordered vector behind a
/// write lock so that a conflict check and the matching insert are atomic:
/// two racing submissions for the same room cannot both pass.
pub struct Engine {
    pub(super) hostels: DashMap<Ulid, Hostel>,
    pub(super) bookings: RwLock<Vec<Booking>>,
    pub(super) invitations: DashMap<Ulid, Invitation>,
    pub(super) feedback: RwLock<Vec<Feedback>>,
    pub notify: Arc<NotifyHub>,
}

impl Engine {
    pub fn new(notify: Arc<NotifyHub>) -> Self {
        Self {
            hostels: DashMap::new(),
            bookings: RwLock::new(Vec::new()),
            invitations: DashMap::new(),
            feedback: RwLock::new(Vec::new()),
            notify,
        }
    }

    pub fn get_hostel(&self, id: &Ulid) -> Option<Hostel> {
        self.hostels.get(id).map(|e| e.value().clone())
    }

    pub fn hostel_count(&self) -> usize {
        self.hostels.len()
    }

    // Bookings are never removed, only appended and status-flipped, so a
    // poisoned lock still guards a consistent vector — recover and continue.
    pub(super) fn bookings_read(&self) -> RwLockReadGuard<'_, Vec<Booking>> {
        self.bookings.read().unwrap_or_else(|e| e.into_inner())
    }

    pub(super) fn bookings_write(&self) -> RwLockWriteGuard<'_, Vec<Booking>> {
        self.bookings.write().unwrap_or_else(|e| e.into_inner())
    }

    pub(super) fn feedback_read(&self) -> RwLockReadGuard<'_, Vec<Feedback>> {
        self.feedback.read().unwrap_or_else(|e| e.into_inner())
    }

    pub(super) fn feedback_write(&self) -> RwLockWriteGuard<'_, Vec<Feedback>> {
        self.feedback.write().unwrap_or_else(|e| e.into_inner())
    }
}
