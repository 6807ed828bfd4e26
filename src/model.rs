use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unix milliseconds — the only time type.
pub type Ms = i64;

/// One day in milliseconds.
pub const DAY_MS: Ms = 86_400_000;

/// Half-open stay range `[check_in, check_out)`.
///
/// `check_out` is exclusive: a guest checking out the morning another guest
/// checks in does not conflict. Construction performs no validation — the
/// booking workflow rejects `check_out <= check_in` before any range is
/// stored, and the availability checker is defined for arbitrary inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub check_in: Ms,
    pub check_out: Ms,
}

impl DateRange {
    pub fn new(check_in: Ms, check_out: Ms) -> Self {
        Self { check_in, check_out }
    }

    pub fn duration_ms(&self) -> Ms {
        self.check_out - self.check_in
    }

    /// Number of nights, rounding partial days up. Whole-day ranges are exact.
    pub fn nights(&self) -> i64 {
        (self.duration_ms() + DAY_MS - 1).div_euclid(DAY_MS)
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }
}

/// Booking lifecycle. `Pending` exists in the model for unpaid/cash flows but
/// no operation in this crate currently produces it; any non-`Cancelled`
/// booking blocks availability, and only `Confirmed` bookings earn revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Pending,
}

impl BookingStatus {
    pub fn blocks_availability(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

/// A bookable unit within a hostel. `available` is a static admin-set flag
/// (room in service or not) — distinct from date-range availability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Ulid,
    pub name: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub capacity: u32,
    pub beds: String,
    /// Nightly price in RON.
    pub price: f64,
    pub image: String,
    pub amenities: Vec<String>,
    pub available: bool,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hostel {
    pub id: Ulid,
    pub name: String,
    pub location: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Ordered; first image is the primary one.
    pub images: Vec<String>,
    /// 0–10.
    pub rating: f64,
    pub reviews: u32,
    pub description: String,
    pub amenities: Vec<String>,
    /// Ordered; availability projections preserve this order.
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoPoint>,
    /// Hostel-admin user assigned to this hostel, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_id: Option<Ulid>,
}

impl Hostel {
    pub fn room(&self, room_id: Ulid) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == room_id)
    }

    /// Cheapest nightly price across rooms. None for a hostel with no rooms.
    pub fn min_price(&self) -> Option<f64> {
        self.rooms
            .iter()
            .map(|r| r.price)
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// A reservation of one room for a date range. Hostel and room names are
/// denormalized at creation so dashboards survive later renames or deletes.
/// `total_price` is frozen at creation time and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Ulid,
    pub hostel_id: Ulid,
    pub hostel_name: String,
    pub room_id: Ulid,
    pub room_name: String,
    #[serde(flatten)]
    pub range: DateRange,
    pub guests: u32,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: Ms,
}

/// Input to the booking workflow. The engine derives the id, denormalized
/// names, total price, status and creation timestamp.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub hostel_id: Ulid,
    pub room_id: Ulid,
    pub range: DateRange,
    pub guests: u32,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
}

/// A room annotated with date-range availability for a candidate stay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAvailability {
    pub room: Room,
    pub is_available: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Rejected,
    Expired,
}

/// Platform-admin invitation for a user to manage one hostel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub id: Ulid,
    pub email: String,
    pub hostel_id: Ulid,
    pub hostel_name: String,
    pub invited_by: Ulid,
    pub invited_by_name: String,
    pub status: InvitationStatus,
    pub created_at: Ms,
    pub expires_at: Ms,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<Ms>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<Ms>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Issue,
    Suggestion,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStatus {
    New,
    Reviewed,
    Resolved,
}

/// Message from a hostel admin to the platform admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: Ulid,
    pub hostel_id: Ulid,
    pub hostel_name: String,
    pub admin_id: Ulid,
    pub admin_name: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
    pub status: FeedbackStatus,
    pub created_at: Ms,
}

/// Change notifications broadcast per hostel — flat, no nesting.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    HostelCreated { id: Ulid },
    HostelUpdated { id: Ulid },
    HostelDeleted { id: Ulid },
    AdminAssigned { hostel_id: Ulid, user_id: Ulid },
    BookingCreated { id: Ulid, hostel_id: Ulid, room_id: Ulid, range: DateRange },
    BookingCancelled { id: Ulid, hostel_id: Ulid },
    BookingUpdated { id: Ulid, hostel_id: Ulid, status: BookingStatus },
    InvitationSent { id: Ulid, hostel_id: Ulid },
    InvitationAccepted { id: Ulid, hostel_id: Ulid },
    InvitationRejected { id: Ulid, hostel_id: Ulid },
    InvitationExpired { id: Ulid, hostel_id: Ulid },
    FeedbackFiled { id: Ulid, hostel_id: Ulid },
}

impl Event {
    /// The hostel whose channel this event is broadcast on.
    pub fn hostel_id(&self) -> Ulid {
        match self {
            Event::HostelCreated { id }
            | Event::HostelUpdated { id }
            | Event::HostelDeleted { id } => *id,
            Event::AdminAssigned { hostel_id, .. }
            | Event::BookingCreated { hostel_id, .. }
            | Event::BookingCancelled { hostel_id, .. }
            | Event::BookingUpdated { hostel_id, .. }
            | Event::InvitationSent { hostel_id, .. }
            | Event::InvitationAccepted { hostel_id, .. }
            | Event::InvitationRejected { hostel_id, .. }
            | Event::InvitationExpired { hostel_id, .. }
            | Event::FeedbackFiled { hostel_id, .. } => *hostel_id,
        }
    }
}

// ── Aggregation outputs ──────────────────────────────────────────

/// Per-hostel booking statistics.
///
/// `occupancy_rate` is derived from the static `Room::available` flag, not
/// from date-range availability — two different notions of "availability"
/// that the dashboards have always conflated. Kept as-is because downstream
/// reporting depends on the flag-based number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostelStats {
    pub hostel_id: Ulid,
    pub hostel_name: String,
    pub total_bookings: usize,
    pub active_bookings: usize,
    pub cancelled_bookings: usize,
    /// RON, confirmed bookings only.
    pub revenue: f64,
    /// Percent of rooms flagged unavailable, 0–100.
    pub occupancy_rate: f64,
    /// Mean nights per confirmed booking; 0 with no confirmed bookings.
    pub average_stay: f64,
}

/// Platform-wide roll-up over all hostels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_revenue: f64,
    pub total_bookings: usize,
    /// Unweighted mean of per-hostel occupancy rates; 0 with no hostels.
    pub average_occupancy: f64,
}
