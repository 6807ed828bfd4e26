use dashmap::DashMap;
use tokio::sync::broadcast;
use ulid::Ulid;

use crate::model::Event;

const CHANNEL_CAPACITY: usize = 256;

/// Broadcast hub for live change notifications, one channel per hostel.
/// Backs the UI surfaces that refresh dashboards and toast on changes.
pub struct NotifyHub {
    channels: DashMap<Ulid, broadcast::Sender<Event>>,
}

impl Default for NotifyHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifyHub {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Subscribe to a hostel's events. Creates the channel if needed.
    pub fn subscribe(&self, hostel_id: Ulid) -> broadcast::Receiver<Event> {
        let sender = self
            .channels
            .entry(hostel_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0);
        sender.subscribe()
    }

    /// Broadcast an event on its hostel's channel. No-op if nobody listens.
    pub fn send(&self, event: &Event) {
        metrics::counter!(
            crate::observability::EVENTS_TOTAL,
            "event" => crate::observability::event_label(event)
        )
        .increment(1);
        if let Some(sender) = self.channels.get(&event.hostel_id()) {
            let _ = sender.send(event.clone());
        }
    }

    /// Remove a channel (e.g. when a hostel is deleted).
    pub fn remove(&self, hostel_id: &Ulid) {
        self.channels.remove(hostel_id);
    }
}
