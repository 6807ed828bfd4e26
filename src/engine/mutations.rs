use ulid::Ulid;

use crate::limits::*;
use crate::model::*;

use super::conflict::{check_no_conflict, now_ms, validate_range};
use super::{Engine, EngineError};

fn validate_hostel(hostel: &Hostel) -> Result<(), EngineError> {
    if hostel.name.trim().is_empty() {
        return Err(EngineError::MissingField("name"));
    }
    if hostel.name.len() > MAX_NAME_LEN {
        return Err(EngineError::LimitExceeded("hostel name too long"));
    }
    if hostel.description.len() > MAX_DESCRIPTION_LEN {
        return Err(EngineError::LimitExceeded("description too long"));
    }
    if hostel.amenities.len() > MAX_AMENITIES {
        return Err(EngineError::LimitExceeded("too many amenities"));
    }
    if hostel.rooms.len() > MAX_ROOMS_PER_HOSTEL {
        return Err(EngineError::LimitExceeded("too many rooms"));
    }
    if !(0.0..=10.0).contains(&hostel.rating) {
        return Err(EngineError::LimitExceeded("rating out of range"));
    }
    // Embedded rooms go through the same gate as add_room/update_room.
    for room in &hostel.rooms {
        validate_room(room)?;
    }
    Ok(())
}

fn validate_room(room: &Room) -> Result<(), EngineError> {
    if room.name.trim().is_empty() {
        return Err(EngineError::MissingField("name"));
    }
    if room.name.len() > MAX_NAME_LEN {
        return Err(EngineError::LimitExceeded("room name too long"));
    }
    if room.price < 0.0 {
        return Err(EngineError::LimitExceeded("negative price"));
    }
    Ok(())
}

impl Engine {
    // ── Hostels ──────────────────────────────────────────

    pub fn create_hostel(&self, hostel: Hostel) -> Result<(), EngineError> {
        if self.hostels.len() >= MAX_HOSTELS {
            return Err(EngineError::LimitExceeded("too many hostels"));
        }
        validate_hostel(&hostel)?;
        if self.hostels.contains_key(&hostel.id) {
            return Err(EngineError::AlreadyExists(hostel.id));
        }
        let id = hostel.id;
        self.hostels.insert(id, hostel);
        metrics::gauge!(crate::observability::HOSTELS_ACTIVE).set(self.hostels.len() as f64);
        tracing::info!("hostel created: {id}");
        self.notify.send(&Event::HostelCreated { id });
        Ok(())
    }

    /// Replace a hostel's attributes. The assigned admin is not touched here;
    /// `assign_admin` is the only path that changes it.
    pub fn update_hostel(&self, hostel: Hostel) -> Result<(), EngineError> {
        validate_hostel(&hostel)?;
        let mut entry = self
            .hostels
            .get_mut(&hostel.id)
            .ok_or(EngineError::NotFound(hostel.id))?;
        let admin_id = entry.admin_id;
        let id = hostel.id;
        *entry = Hostel { admin_id, ..hostel };
        drop(entry);
        self.notify.send(&Event::HostelUpdated { id });
        Ok(())
    }

    /// Remove a hostel. Its bookings are kept — dashboards still report on
    /// them through the denormalized names.
    pub fn delete_hostel(&self, id: Ulid) -> Result<(), EngineError> {
        if self.hostels.remove(&id).is_none() {
            return Err(EngineError::NotFound(id));
        }
        metrics::gauge!(crate::observability::HOSTELS_ACTIVE).set(self.hostels.len() as f64);
        tracing::info!("hostel deleted: {id}");
        self.notify.send(&Event::HostelDeleted { id });
        self.notify.remove(&id);
        Ok(())
    }

    pub fn assign_admin(&self, hostel_id: Ulid, user_id: Ulid) -> Result<(), EngineError> {
        let mut entry = self
            .hostels
            .get_mut(&hostel_id)
            .ok_or(EngineError::NotFound(hostel_id))?;
        entry.admin_id = Some(user_id);
        drop(entry);
        self.notify.send(&Event::AdminAssigned { hostel_id, user_id });
        Ok(())
    }

    // ── Rooms ────────────────────────────────────────────

    pub fn add_room(&self, hostel_id: Ulid, room: Room) -> Result<(), EngineError> {
        validate_room(&room)?;
        let mut entry = self
            .hostels
            .get_mut(&hostel_id)
            .ok_or(EngineError::NotFound(hostel_id))?;
        if entry.rooms.len() >= MAX_ROOMS_PER_HOSTEL {
            return Err(EngineError::LimitExceeded("too many rooms"));
        }
        if entry.rooms.iter().any(|r| r.id == room.id) {
            return Err(EngineError::AlreadyExists(room.id));
        }
        entry.rooms.push(room);
        drop(entry);
        self.notify.send(&Event::HostelUpdated { id: hostel_id });
        Ok(())
    }

    /// Replace a room in place, preserving its position in the hostel's order.
    pub fn update_room(&self, hostel_id: Ulid, room: Room) -> Result<(), EngineError> {
        validate_room(&room)?;
        let mut entry = self
            .hostels
            .get_mut(&hostel_id)
            .ok_or(EngineError::NotFound(hostel_id))?;
        let pos = entry
            .rooms
            .iter()
            .position(|r| r.id == room.id)
            .ok_or(EngineError::NotFound(room.id))?;
        entry.rooms[pos] = room;
        drop(entry);
        self.notify.send(&Event::HostelUpdated { id: hostel_id });
        Ok(())
    }

    pub fn remove_room(&self, hostel_id: Ulid, room_id: Ulid) -> Result<(), EngineError> {
        let mut entry = self
            .hostels
            .get_mut(&hostel_id)
            .ok_or(EngineError::NotFound(hostel_id))?;
        let pos = entry
            .rooms
            .iter()
            .position(|r| r.id == room_id)
            .ok_or(EngineError::NotFound(room_id))?;
        entry.rooms.remove(pos);
        drop(entry);
        self.notify.send(&Event::HostelUpdated { id: hostel_id });
        Ok(())
    }

    /// Flip the static in-service flag — the one occupancy reporting reads.
    pub fn set_room_available(
        &self,
        hostel_id: Ulid,
        room_id: Ulid,
        available: bool,
    ) -> Result<(), EngineError> {
        let mut entry = self
            .hostels
            .get_mut(&hostel_id)
            .ok_or(EngineError::NotFound(hostel_id))?;
        let room = entry
            .rooms
            .iter_mut()
            .find(|r| r.id == room_id)
            .ok_or(EngineError::NotFound(room_id))?;
        room.available = available;
        drop(entry);
        self.notify.send(&Event::HostelUpdated { id: hostel_id });
        Ok(())
    }

    // ── Bookings ─────────────────────────────────────────

    /// The booking workflow: required fields, date order, room capacity and
    /// date-range conflicts are all rejected here. The conflict check and the
    /// insert happen under one write lock, so two racing submissions for the
    /// same room and range cannot both land.
    pub fn create_booking(&self, req: NewBooking) -> Result<Booking, EngineError> {
        if req.guest_name.trim().is_empty() {
            return Err(EngineError::MissingField("guest name"));
        }
        if req.guest_email.trim().is_empty() {
            return Err(EngineError::MissingField("guest email"));
        }
        if req.guests == 0 {
            return Err(EngineError::MissingField("guests"));
        }
        validate_range(&req.range)?;

        let (hostel_name, room_name, capacity, price) = {
            let hostel = self
                .hostels
                .get(&req.hostel_id)
                .ok_or(EngineError::NotFound(req.hostel_id))?;
            let room = hostel
                .room(req.room_id)
                .ok_or(EngineError::NotFound(req.room_id))?;
            (
                hostel.name.clone(),
                room.name.clone(),
                room.capacity,
                room.price,
            )
        };

        // Capacity is enforced at creation only; stored bookings are not
        // revisited when a room is later downsized.
        if req.guests > capacity {
            return Err(EngineError::CapacityExceeded {
                capacity,
                guests: req.guests,
            });
        }

        let booking = {
            let mut bookings = self.bookings_write();
            if bookings.len() >= MAX_BOOKINGS {
                return Err(EngineError::LimitExceeded("too many bookings"));
            }
            check_no_conflict(req.room_id, &req.range, &bookings)?;

            let booking = Booking {
                id: Ulid::new(),
                hostel_id: req.hostel_id,
                hostel_name,
                room_id: req.room_id,
                room_name,
                range: req.range,
                guests: req.guests,
                guest_name: req.guest_name,
                guest_email: req.guest_email,
                guest_phone: req.guest_phone,
                total_price: req.range.nights() as f64 * price,
                status: BookingStatus::Confirmed,
                created_at: now_ms(),
            };
            bookings.push(booking.clone());
            booking
        };

        metrics::counter!(crate::observability::BOOKINGS_TOTAL).increment(1);
        tracing::info!(
            "booking {} confirmed: room {} nights {}",
            booking.id,
            booking.room_id,
            booking.range.nights()
        );
        self.notify.send(&Event::BookingCreated {
            id: booking.id,
            hostel_id: booking.hostel_id,
            room_id: booking.room_id,
            range: booking.range,
        });
        Ok(booking)
    }

    /// Cancellation fully releases the room for its range. Bookings are never
    /// deleted; this is the only guest-facing status transition.
    pub fn cancel_booking(&self, id: Ulid) -> Result<Booking, EngineError> {
        let booking = {
            let mut bookings = self.bookings_write();
            let booking = bookings
                .iter_mut()
                .find(|b| b.id == id)
                .ok_or(EngineError::NotFound(id))?;
            match booking.status {
                BookingStatus::Cancelled => return Err(EngineError::AlreadyCancelled(id)),
                BookingStatus::Confirmed | BookingStatus::Pending => {
                    booking.status = BookingStatus::Cancelled;
                }
            }
            booking.clone()
        };

        metrics::counter!(crate::observability::BOOKINGS_CANCELLED_TOTAL).increment(1);
        tracing::info!("booking {id} cancelled");
        self.notify.send(&Event::BookingCancelled {
            id,
            hostel_id: booking.hostel_id,
        });
        Ok(booking)
    }

    /// Admin edit path: the per-hostel dashboard flips status both ways.
    /// No conflict re-check on re-confirmation — the admin overrides.
    pub fn set_booking_status(
        &self,
        id: Ulid,
        status: BookingStatus,
    ) -> Result<Booking, EngineError> {
        let booking = {
            let mut bookings = self.bookings_write();
            let booking = bookings
                .iter_mut()
                .find(|b| b.id == id)
                .ok_or(EngineError::NotFound(id))?;
            booking.status = status;
            booking.clone()
        };
        self.notify.send(&Event::BookingUpdated {
            id,
            hostel_id: booking.hostel_id,
            status,
        });
        Ok(booking)
    }

    // ── Invitations ──────────────────────────────────────

    pub fn invite_admin(
        &self,
        email: &str,
        hostel_id: Ulid,
        invited_by: Ulid,
        invited_by_name: &str,
    ) -> Result<Invitation, EngineError> {
        if email.trim().is_empty() {
            return Err(EngineError::MissingField("email"));
        }
        let hostel_name = self
            .hostels
            .get(&hostel_id)
            .map(|h| h.name.clone())
            .ok_or(EngineError::NotFound(hostel_id))?;

        let now = now_ms();
        let invitation = Invitation {
            id: Ulid::new(),
            email: email.to_string(),
            hostel_id,
            hostel_name,
            invited_by,
            invited_by_name: invited_by_name.to_string(),
            status: InvitationStatus::Pending,
            created_at: now,
            expires_at: now + INVITATION_TTL_MS,
            accepted_at: None,
            rejected_at: None,
        };
        self.invitations.insert(invitation.id, invitation.clone());
        tracing::info!("invitation {} sent for hostel {hostel_id}", invitation.id);
        self.notify.send(&Event::InvitationSent {
            id: invitation.id,
            hostel_id,
        });
        Ok(invitation)
    }

    /// Accepting a pending, unexpired invitation makes the user the hostel's
    /// assigned admin. A lapsed invitation is flipped to expired on the spot.
    pub fn accept_invitation(&self, id: Ulid, user_id: Ulid) -> Result<Invitation, EngineError> {
        let now = now_ms();
        let invitation = {
            let mut entry = self
                .invitations
                .get_mut(&id)
                .ok_or(EngineError::NotFound(id))?;
            if entry.status != InvitationStatus::Pending {
                return Err(EngineError::InvitationClosed(id));
            }
            if now >= entry.expires_at {
                entry.status = InvitationStatus::Expired;
                return Err(EngineError::InvitationClosed(id));
            }
            if !self.hostels.contains_key(&entry.hostel_id) {
                return Err(EngineError::NotFound(entry.hostel_id));
            }
            entry.status = InvitationStatus::Accepted;
            entry.accepted_at = Some(now);
            entry.clone()
        };

        self.assign_admin(invitation.hostel_id, user_id)?;
        self.notify.send(&Event::InvitationAccepted {
            id,
            hostel_id: invitation.hostel_id,
        });
        Ok(invitation)
    }

    pub fn reject_invitation(&self, id: Ulid) -> Result<Invitation, EngineError> {
        let invitation = {
            let mut entry = self
                .invitations
                .get_mut(&id)
                .ok_or(EngineError::NotFound(id))?;
            if entry.status != InvitationStatus::Pending {
                return Err(EngineError::InvitationClosed(id));
            }
            entry.status = InvitationStatus::Rejected;
            entry.rejected_at = Some(now_ms());
            entry.clone()
        };
        self.notify.send(&Event::InvitationRejected {
            id,
            hostel_id: invitation.hostel_id,
        });
        Ok(invitation)
    }

    /// Pending invitations past their expiry, for the background sweeper.
    pub fn collect_expired_invitations(&self, now: Ms) -> Vec<Ulid> {
        self.invitations
            .iter()
            .filter(|e| e.status == InvitationStatus::Pending && e.expires_at <= now)
            .map(|e| e.id)
            .collect()
    }

    pub fn expire_invitation(&self, id: Ulid) -> Result<(), EngineError> {
        let hostel_id = {
            let mut entry = self
                .invitations
                .get_mut(&id)
                .ok_or(EngineError::NotFound(id))?;
            if entry.status != InvitationStatus::Pending {
                return Err(EngineError::InvitationClosed(id));
            }
            entry.status = InvitationStatus::Expired;
            entry.hostel_id
        };
        metrics::counter!(crate::observability::INVITATIONS_EXPIRED_TOTAL).increment(1);
        self.notify.send(&Event::InvitationExpired { id, hostel_id });
        Ok(())
    }

    // ── Feedback ─────────────────────────────────────────

    pub fn file_feedback(
        &self,
        hostel_id: Ulid,
        admin_id: Ulid,
        admin_name: &str,
        message: &str,
        kind: FeedbackKind,
    ) -> Result<Feedback, EngineError> {
        if message.trim().is_empty() {
            return Err(EngineError::MissingField("message"));
        }
        let hostel_name = self
            .hostels
            .get(&hostel_id)
            .map(|h| h.name.clone())
            .ok_or(EngineError::NotFound(hostel_id))?;

        let feedback = Feedback {
            id: Ulid::new(),
            hostel_id,
            hostel_name,
            admin_id,
            admin_name: admin_name.to_string(),
            message: message.to_string(),
            kind,
            status: FeedbackStatus::New,
            created_at: now_ms(),
        };
        self.feedback_write().push(feedback.clone());
        self.notify.send(&Event::FeedbackFiled {
            id: feedback.id,
            hostel_id,
        });
        Ok(feedback)
    }

    pub fn set_feedback_status(
        &self,
        id: Ulid,
        status: FeedbackStatus,
    ) -> Result<(), EngineError> {
        let mut feedback = self.feedback_write();
        let item = feedback
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(EngineError::NotFound(id))?;
        item.status = status;
        Ok(())
    }
}
