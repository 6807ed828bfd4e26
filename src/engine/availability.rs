use ulid::Ulid;

use crate::model::*;

// ── Availability Algorithm ────────────────────────────────────────

/// True if the room is free for the candidate `[check_in, check_out)` range.
///
/// With either date absent the room is reported available — the caller has
/// not picked a full range yet and the UI lists everything. Cancelled
/// bookings never block, even for an identical range. Pure over its inputs:
/// no clock, no caching, safe to re-run on every refresh.
///
/// Zero- and negative-length candidates are not rejected here; the booking
/// workflow validates range order before trusting the answer.
pub fn is_available(
    room_id: Ulid,
    check_in: Option<Ms>,
    check_out: Option<Ms>,
    bookings: &[Booking],
) -> bool {
    let (Some(check_in), Some(check_out)) = (check_in, check_out) else {
        return true;
    };
    let candidate = DateRange::new(check_in, check_out);
    !bookings.iter().any(|b| {
        b.room_id == room_id
            && b.status.blocks_availability()
            && b.range.overlaps(&candidate)
    })
}

/// Annotate every room of a hostel with availability for the candidate range.
///
/// Room order is the hostel's own order; the hostel is not mutated. Derived
/// fresh from the inputs on every call, so a changed bookings snapshot is
/// reflected immediately.
pub fn project_availability(
    hostel: &Hostel,
    check_in: Option<Ms>,
    check_out: Option<Ms>,
    bookings: &[Booking],
) -> Vec<RoomAvailability> {
    hostel
        .rooms
        .iter()
        .map(|room| RoomAvailability {
            room: room.clone(),
            is_available: is_available(room.id, check_in, check_out, bookings),
        })
        .collect()
}
