use crate::model::*;

// ── Statistics Aggregator ─────────────────────────────────────────

/// Per-hostel booking statistics, one entry per hostel in input order.
///
/// Full recompute on every call — the dataset lives in memory and is small,
/// so there is no incremental path. Empty inputs produce empty/zero output,
/// never a panic.
pub fn aggregate(hostels: &[Hostel], bookings: &[Booking]) -> Vec<HostelStats> {
    hostels.iter().map(|h| hostel_stats(h, bookings)).collect()
}

fn hostel_stats(hostel: &Hostel, bookings: &[Booking]) -> HostelStats {
    let mut total_bookings = 0usize;
    let mut active_bookings = 0usize;
    let mut cancelled_bookings = 0usize;
    let mut revenue = 0.0;
    let mut total_nights = 0i64;

    for b in bookings.iter().filter(|b| b.hostel_id == hostel.id) {
        total_bookings += 1;
        match b.status {
            BookingStatus::Confirmed => {
                active_bookings += 1;
                revenue += b.total_price;
                total_nights += b.range.nights();
            }
            BookingStatus::Cancelled => cancelled_bookings += 1,
            // Counted in the total only: no revenue, not active, not cancelled.
            BookingStatus::Pending => {}
        }
    }

    // Static-flag occupancy, not date-range availability (see HostelStats).
    let total_rooms = hostel.rooms.len();
    let occupied_rooms = hostel.rooms.iter().filter(|r| !r.available).count();
    let occupancy_rate = if total_rooms > 0 {
        (occupied_rooms as f64 / total_rooms as f64) * 100.0
    } else {
        0.0
    };

    let average_stay = if active_bookings > 0 {
        total_nights as f64 / active_bookings as f64
    } else {
        0.0
    };

    HostelStats {
        hostel_id: hostel.id,
        hostel_name: hostel.name.clone(),
        total_bookings,
        active_bookings,
        cancelled_bookings,
        revenue,
        occupancy_rate,
        average_stay,
    }
}

/// Platform-wide roll-up. Average occupancy is the unweighted mean of the
/// per-hostel rates and is 0 for an empty input.
pub fn summarize(stats: &[HostelStats]) -> OverallStats {
    let total_revenue = stats.iter().map(|s| s.revenue).sum();
    let total_bookings = stats.iter().map(|s| s.total_bookings).sum();
    let average_occupancy = if stats.is_empty() {
        0.0
    } else {
        stats.iter().map(|s| s.occupancy_rate).sum::<f64>() / stats.len() as f64
    };
    OverallStats {
        total_revenue,
        total_bookings,
        average_occupancy,
    }
}
