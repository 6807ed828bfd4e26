use ulid::Ulid;

use crate::model::DateRange;

#[derive(Debug)]
pub enum EngineError {
    NotFound(Ulid),
    AlreadyExists(Ulid),
    /// The room is taken for the requested range; carries the blocking booking.
    Conflict(Ulid),
    CapacityExceeded { capacity: u32, guests: u32 },
    InvalidRange(DateRange),
    MissingField(&'static str),
    AlreadyCancelled(Ulid),
    /// Invitation is no longer pending (accepted, rejected or expired).
    InvitationClosed(Ulid),
    LimitExceeded(&'static str),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::NotFound(id) => write!(f, "not found: {id}"),
            EngineError::AlreadyExists(id) => write!(f, "already exists: {id}"),
            EngineError::Conflict(id) => write!(f, "dates conflict with booking: {id}"),
            EngineError::CapacityExceeded { capacity, guests } => {
                write!(f, "room sleeps {capacity}, requested {guests} guests")
            }
            EngineError::InvalidRange(range) => {
                write!(
                    f,
                    "invalid stay range [{}, {})",
                    range.check_in, range.check_out
                )
            }
            EngineError::MissingField(field) => write!(f, "missing required field: {field}"),
            EngineError::AlreadyCancelled(id) => {
                write!(f, "booking already cancelled: {id}")
            }
            EngineError::InvitationClosed(id) => {
                write!(f, "invitation no longer pending: {id}")
            }
            EngineError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
