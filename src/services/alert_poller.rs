use tokio::time;

use crate::services::{
    backend::BackendClient,
    feed_controller::{ALERT_POLL_INTERVAL, FeedEvent, FeedSender},
};

/// Re-fetches the backend alert events every [`ALERT_POLL_INTERVAL`]; the first
/// fetch runs immediately and doubles as the initial load.
pub fn spawn_alert_event_poller(backend: BackendClient, tx: FeedSender) {
    tokio::spawn(async move {
        let mut interval = time::interval(ALERT_POLL_INTERVAL);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            let result = backend.fetch_alert_events().await;
            if tx.send(FeedEvent::AlertEventsPolled(result)).await.is_err() {
                break;
            }
        }
    });
}

pub fn spawn_rules_load(backend: BackendClient, tx: FeedSender) {
    tokio::spawn(async move {
        let result = backend.fetch_rules().await;
        let _ = tx.send(FeedEvent::RulesLoaded(result)).await;
    });
}
