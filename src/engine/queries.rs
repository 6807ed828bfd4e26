use ulid::Ulid;

use crate::model::*;

use super::availability::{is_available, project_availability};
use super::stats::{aggregate, summarize};
use super::{Engine, EngineError};

/// Price band keyed off a hostel's cheapest room (RON per night).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBand {
    /// Up to 350.
    Budget,
    /// Over 350, up to 600.
    Moderate,
    /// Over 600.
    Premium,
}

impl PriceBand {
    fn matches(&self, min_price: f64) -> bool {
        match self {
            PriceBand::Budget => min_price <= 350.0,
            PriceBand::Moderate => min_price > 350.0 && min_price <= 600.0,
            PriceBand::Premium => min_price > 600.0,
        }
    }
}

/// Browse-page filters. All criteria are conjunctive; `None` means "any".
#[derive(Debug, Clone, Default)]
pub struct HostelFilter {
    /// Case-insensitive free text over name, location and description.
    pub query: Option<String>,
    /// Exact location match.
    pub location: Option<String>,
    pub price: Option<PriceBand>,
}

impl HostelFilter {
    fn accepts(&self, hostel: &Hostel) -> bool {
        if let Some(q) = &self.query {
            let q = q.to_lowercase();
            let hit = hostel.name.to_lowercase().contains(&q)
                || hostel.location.to_lowercase().contains(&q)
                || hostel.description.to_lowercase().contains(&q);
            if !hit {
                return false;
            }
        }
        if let Some(loc) = &self.location
            && &hostel.location != loc
        {
            return false;
        }
        if let Some(band) = &self.price {
            // A hostel with no rooms has no price and matches no band.
            match hostel.min_price() {
                Some(p) if band.matches(p) => {}
                _ => return false,
            }
        }
        true
    }
}

impl Engine {
    /// All hostels in creation order (ULIDs sort by time).
    pub fn list_hostels(&self) -> Vec<Hostel> {
        let mut hostels: Vec<Hostel> =
            self.hostels.iter().map(|e| e.value().clone()).collect();
        hostels.sort_by_key(|h| h.id);
        hostels
    }

    /// Filtered browse listing: featured hostels first, then rating descending.
    pub fn search_hostels(&self, filter: &HostelFilter) -> Vec<Hostel> {
        let mut hostels: Vec<Hostel> = self
            .hostels
            .iter()
            .filter(|e| filter.accepts(e.value()))
            .map(|e| e.value().clone())
            .collect();
        hostels.sort_by(|a, b| {
            b.featured
                .cmp(&a.featured)
                .then(b.rating.total_cmp(&a.rating))
                .then(a.id.cmp(&b.id))
        });
        hostels
    }

    /// Unique hostel locations, sorted, for the location filter dropdown.
    pub fn locations(&self) -> Vec<String> {
        let mut locations: Vec<String> =
            self.hostels.iter().map(|e| e.location.clone()).collect();
        locations.sort();
        locations.dedup();
        locations
    }

    // ── Availability ─────────────────────────────────────

    /// Annotated room list for a hostel and candidate stay, in room order.
    pub fn room_availability(
        &self,
        hostel_id: Ulid,
        check_in: Option<Ms>,
        check_out: Option<Ms>,
    ) -> Result<Vec<RoomAvailability>, EngineError> {
        let hostel = self
            .get_hostel(&hostel_id)
            .ok_or(EngineError::NotFound(hostel_id))?;
        metrics::counter!(crate::observability::AVAILABILITY_CHECKS_TOTAL).increment(1);
        let bookings = self.bookings_read();
        Ok(project_availability(&hostel, check_in, check_out, &bookings))
    }

    pub fn is_room_available(
        &self,
        room_id: Ulid,
        check_in: Option<Ms>,
        check_out: Option<Ms>,
    ) -> bool {
        metrics::counter!(crate::observability::AVAILABILITY_CHECKS_TOTAL).increment(1);
        let bookings = self.bookings_read();
        is_available(room_id, check_in, check_out, &bookings)
    }

    // ── Bookings ─────────────────────────────────────────

    pub fn get_booking(&self, id: Ulid) -> Option<Booking> {
        self.bookings_read().iter().find(|b| b.id == id).cloned()
    }

    /// Every booking, in creation order.
    pub fn bookings_snapshot(&self) -> Vec<Booking> {
        self.bookings_read().clone()
    }

    pub fn bookings_for_hostel(&self, hostel_id: Ulid) -> Vec<Booking> {
        self.bookings_read()
            .iter()
            .filter(|b| b.hostel_id == hostel_id)
            .cloned()
            .collect()
    }

    /// A guest's reservation history, matched by email.
    pub fn bookings_for_guest(&self, email: &str) -> Vec<Booking> {
        self.bookings_read()
            .iter()
            .filter(|b| b.guest_email.eq_ignore_ascii_case(email))
            .cloned()
            .collect()
    }

    // ── Statistics ───────────────────────────────────────

    /// Dashboard statistics over the current snapshots, recomputed in full.
    pub fn stats(&self) -> (Vec<HostelStats>, OverallStats) {
        let hostels = self.list_hostels();
        let per_hostel = {
            let bookings = self.bookings_read();
            aggregate(&hostels, &bookings)
        };
        let overall = summarize(&per_hostel);
        (per_hostel, overall)
    }

    // ── Invitations & feedback ───────────────────────────

    pub fn get_invitation(&self, id: Ulid) -> Option<Invitation> {
        self.invitations.get(&id).map(|e| e.value().clone())
    }

    /// Invitations addressed to an email, newest first.
    pub fn invitations_for_email(&self, email: &str) -> Vec<Invitation> {
        let mut invitations: Vec<Invitation> = self
            .invitations
            .iter()
            .filter(|e| e.email.eq_ignore_ascii_case(email))
            .map(|e| e.value().clone())
            .collect();
        invitations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        invitations
    }

    pub fn feedback_for_hostel(&self, hostel_id: Ulid) -> Vec<Feedback> {
        self.feedback_read()
            .iter()
            .filter(|f| f.hostel_id == hostel_id)
            .cloned()
            .collect()
    }

    pub fn list_feedback(&self) -> Vec<Feedback> {
        self.feedback_read().clone()
    }
}
