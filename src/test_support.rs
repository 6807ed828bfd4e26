//! Shared fixtures for unit tests.

use ulid::Ulid;

use crate::model::*;

/// 2026-01-01T00:00:00Z.
pub(crate) const BASE: Ms = 1_767_225_600_000;

pub(crate) fn day_range(from_day: i64, to_day: i64) -> DateRange {
    DateRange::new(BASE + from_day * DAY_MS, BASE + to_day * DAY_MS)
}

pub(crate) fn sample_room(name: &str, price: f64, capacity: u32) -> Room {
    Room {
        id: Ulid::new(),
        name: name.into(),
        room_type: "double".into(),
        capacity,
        beds: "1 double".into(),
        price,
        image: String::new(),
        amenities: vec!["wifi".into()],
        available: true,
        description: String::new(),
    }
}

/// Hostel with two rooms: a 2-person at 250 RON and a 4-person at 400 RON.
pub(crate) fn sample_hostel(name: &str, location: &str) -> Hostel {
    Hostel {
        id: Ulid::new(),
        name: name.into(),
        location: location.into(),
        address: "Str. Principală 1".into(),
        phone: "+40 700 000 000".into(),
        email: "contact@bookastay.ro".into(),
        images: vec!["cover.jpg".into()],
        rating: 8.7,
        reviews: 12,
        description: "Pensiune liniștită".into(),
        amenities: vec!["parking".into(), "wifi".into()],
        rooms: vec![
            sample_room("Camera 1", 250.0, 2),
            sample_room("Camera 2", 400.0, 4),
        ],
        featured: false,
        coordinates: None,
        admin_id: None,
    }
}

pub(crate) fn new_booking(hostel: &Hostel, room_idx: usize, from_day: i64, to_day: i64) -> NewBooking {
    NewBooking {
        hostel_id: hostel.id,
        room_id: hostel.rooms[room_idx].id,
        range: day_range(from_day, to_day),
        guests: 2,
        guest_name: "Popescu Ion".into(),
        guest_email: "ion@exemplu.ro".into(),
        guest_phone: "+40 711 111 111".into(),
    }
}
