use ulid::Ulid;

use crate::model::*;

use super::EngineError;

pub(crate) fn now_ms() -> Ms {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as Ms)
        .unwrap_or(0)
}

/// Booking-workflow gate for a candidate stay. Availability answers are only
/// meaningful for well-formed ranges, so order and bounds are checked here
/// before any conflict test runs.
pub(crate) fn validate_range(range: &DateRange) -> Result<(), EngineError> {
    use crate::limits::*;
    if range.check_out <= range.check_in {
        return Err(EngineError::InvalidRange(*range));
    }
    if range.check_in < MIN_VALID_TIMESTAMP_MS || range.check_out > MAX_VALID_TIMESTAMP_MS {
        return Err(EngineError::LimitExceeded("stay dates out of range"));
    }
    if range.nights() > MAX_STAY_NIGHTS {
        return Err(EngineError::LimitExceeded("stay too long"));
    }
    Ok(())
}

/// Scan the bookings snapshot for an active booking on the same room whose
/// range intersects the candidate. Returns the blocking booking's id.
pub(crate) fn check_no_conflict(
    room_id: Ulid,
    range: &DateRange,
    bookings: &[Booking],
) -> Result<(), EngineError> {
    for b in bookings {
        if b.room_id == room_id
            && b.status.blocks_availability()
            && b.range.overlaps(range)
        {
            return Err(EngineError::Conflict(b.id));
        }
    }
    Ok(())
}
