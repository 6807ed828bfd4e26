use crate::model::{DAY_MS, Ms};

pub const MAX_NAME_LEN: usize = 256;
pub const MAX_DESCRIPTION_LEN: usize = 8_192;
pub const MAX_AMENITIES: usize = 64;

pub const MAX_HOSTELS: usize = 10_000;
pub const MAX_ROOMS_PER_HOSTEL: usize = 500;
pub const MAX_BOOKINGS: usize = 1_000_000;

/// Longest accepted stay.
pub const MAX_STAY_NIGHTS: i64 = 365;

/// 2000-01-01T00:00:00Z — anything earlier is a unit bug (seconds vs ms).
pub const MIN_VALID_TIMESTAMP_MS: Ms = 946_684_800_000;
/// 2100-01-01T00:00:00Z.
pub const MAX_VALID_TIMESTAMP_MS: Ms = 4_102_444_800_000;

/// Admin invitations lapse after a week.
pub const INVITATION_TTL_MS: Ms = 7 * DAY_MS;
