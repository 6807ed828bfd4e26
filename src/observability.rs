use std::net::SocketAddr;

use crate::model::Event;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: domain events emitted. Labels: event.
pub const EVENTS_TOTAL: &str = "bookastay_events_total";

/// Counter: availability checks and projections served.
pub const AVAILABILITY_CHECKS_TOTAL: &str = "bookastay_availability_checks_total";

/// Counter: bookings confirmed.
pub const BOOKINGS_TOTAL: &str = "bookastay_bookings_total";

/// Counter: bookings cancelled.
pub const BOOKINGS_CANCELLED_TOTAL: &str = "bookastay_bookings_cancelled_total";

// ── USE metrics (resource utilization) ──────────────────────────

/// Gauge: hostels currently registered.
pub const HOSTELS_ACTIVE: &str = "bookastay_hostels_active";

/// Counter: invitations lapsed by the expiry sweeper.
pub const INVITATIONS_EXPIRED_TOTAL: &str = "bookastay_invitations_expired_total";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}

/// Map an Event variant to a short label for metrics.
pub fn event_label(event: &Event) -> &'static str {
    match event {
        Event::HostelCreated { .. } => "hostel_created",
        Event::HostelUpdated { .. } => "hostel_updated",
        Event::HostelDeleted { .. } => "hostel_deleted",
        Event::AdminAssigned { .. } => "admin_assigned",
        Event::BookingCreated { .. } => "booking_created",
        Event::BookingCancelled { .. } => "booking_cancelled",
        Event::BookingUpdated { .. } => "booking_updated",
        Event::InvitationSent { .. } => "invitation_sent",
        Event::InvitationAccepted { .. } => "invitation_accepted",
        Event::InvitationRejected { .. } => "invitation_rejected",
        Event::InvitationExpired { .. } => "invitation_expired",
        Event::FeedbackFiled { .. } => "feedback_filed",
    }
}
