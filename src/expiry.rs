use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::engine::{now_ms, Engine};

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Background task that lapses pending invitations past their expiry.
pub async fn run_invitation_sweeper(engine: Arc<Engine>) {
    let mut interval = tokio::time::interval(SWEEP_INTERVAL);
    loop {
        interval.tick().await;
        for id in engine.collect_expired_invitations(now_ms()) {
            match engine.expire_invitation(id) {
                Ok(()) => info!("expired invitation {id}"),
                // May have been accepted or rejected in the meantime
                Err(e) => tracing::debug!("sweeper skip {id}: {e}"),
            }
        }
    }
}
