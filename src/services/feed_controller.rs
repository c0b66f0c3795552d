//! Decides which data source drives the dashboard.
//!
//! The socket reader, the fallback ticker and the alert poller are separate
//! tasks, but none of them touch the dashboard directly: they send
//! [`FeedEvent`]s into one channel and the controller loop applies them one at
//! a time. After each event the names of the panels that changed are
//! broadcast so open pages can refresh them.
//!
//! `Disconnected -> Connecting -> Live | Fallback`. Fallback is one-way: the
//! real socket is never retried once the synthetic feed has started.

use std::time::Duration;

use rand::{SeedableRng, rngs::StdRng};
use tokio::{
    sync::{broadcast, mpsc},
    time,
};

use crate::{
    AppState,
    error::BackendError,
    models::{AlertEvent, AlertRule, FeedStatus},
    services::{
        alert_poller,
        dashboard::{BatchOutcome, SharedDashboard},
        format::now_ts,
        price_stream,
        wire::{self, InboundFrame},
    },
};

pub const FALLBACK_TICK: Duration = Duration::from_millis(2500);
pub const ALERT_POLL_INTERVAL: Duration = Duration::from_secs(5);

pub const PRICES_UPDATED: &str = "pricesUpdated";
pub const CHART_UPDATED: &str = "chartUpdated";
pub const ALERTS_UPDATED: &str = "alertsUpdated";
pub const RULES_UPDATED: &str = "rulesUpdated";
pub const STATUS_UPDATED: &str = "statusUpdated";

#[derive(Debug)]
pub enum FeedEvent {
    SocketConnecting,
    SocketOpened,
    SocketFrame(String),
    SocketClosed(String),
    FallbackTick,
    AlertEventsPolled(Result<Vec<AlertEvent>, BackendError>),
    RulesLoaded(Result<Vec<AlertRule>, BackendError>),
}

pub type FeedSender = mpsc::Sender<FeedEvent>;

pub fn channel() -> (FeedSender, mpsc::Receiver<FeedEvent>) {
    mpsc::channel(256)
}

pub struct FeedController {
    dashboard: SharedDashboard,
    events_tx: broadcast::Sender<String>,
    feed_tx: FeedSender,
    rng: StdRng,
    fallback_active: bool,
}

impl FeedController {
    pub fn new(
        dashboard: SharedDashboard,
        events_tx: broadcast::Sender<String>,
        feed_tx: FeedSender,
    ) -> Self {
        Self {
            dashboard,
            events_tx,
            feed_tx,
            rng: StdRng::from_entropy(),
            fallback_active: false,
        }
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback_active
    }

    pub async fn run(mut self, mut rx: mpsc::Receiver<FeedEvent>) {
        while let Some(event) = rx.recv().await {
            self.handle(event).await;
        }
    }

    /// Applies one event and returns the panels it changed (already broadcast).
    pub async fn handle(&mut self, event: FeedEvent) -> Vec<&'static str> {
        let changed = self.apply(event).await;

        for name in &changed {
            // no open pages is fine
            let _ = self.events_tx.send(name.to_string());
        }

        changed
    }

    async fn apply(&mut self, event: FeedEvent) -> Vec<&'static str> {
        let now = now_ts();

        match event {
            FeedEvent::SocketConnecting => {
                if self.fallback_active {
                    return vec![];
                }
                self.dashboard.write().await.set_status(FeedStatus::Connecting);
                vec![STATUS_UPDATED]
            }

            FeedEvent::SocketOpened => {
                if self.fallback_active {
                    tracing::info!("price stream opened after fallback started; staying on mock feed");
                    return vec![];
                }
                tracing::info!("price stream connected");
                self.dashboard.write().await.set_status(FeedStatus::Live);
                vec![STATUS_UPDATED]
            }

            FeedEvent::SocketFrame(text) => self.apply_frame(&text, &now).await,

            FeedEvent::SocketClosed(reason) => {
                if self.fallback_active {
                    return vec![];
                }
                tracing::warn!("price stream unavailable ({}), switching to mock feed", reason);
                self.start_fallback(&now).await;
                vec![STATUS_UPDATED, PRICES_UPDATED, CHART_UPDATED]
            }

            FeedEvent::FallbackTick => {
                if !self.fallback_active {
                    return vec![];
                }
                let mut dashboard = self.dashboard.write().await;
                let out = dashboard.fallback_tick(&mut self.rng, &now);
                drop(dashboard);

                panels_for(&out)
            }

            FeedEvent::AlertEventsPolled(Ok(events)) => {
                self.dashboard.write().await.replace_alerts(events);
                vec![ALERTS_UPDATED]
            }

            FeedEvent::AlertEventsPolled(Err(err)) => {
                tracing::warn!("alert events refresh failed: {}", err);
                if self.dashboard.write().await.alerts_refresh_failed() {
                    vec![ALERTS_UPDATED]
                } else {
                    vec![]
                }
            }

            FeedEvent::RulesLoaded(Ok(rules)) => {
                tracing::info!("loaded {} alert rules", rules.len());
                self.dashboard.write().await.set_rules(rules);
                vec![RULES_UPDATED]
            }

            FeedEvent::RulesLoaded(Err(err)) => {
                tracing::warn!("alert rules load failed: {}", err);
                self.dashboard.write().await.rules_failed();
                vec![RULES_UPDATED]
            }
        }
    }

    async fn apply_frame(&mut self, text: &str, now: &str) -> Vec<&'static str> {
        // frames that race the fallback switch are stale
        if self.fallback_active {
            return vec![];
        }

        let Some(frame) = wire::parse_frame(text) else {
            tracing::debug!("dropping unrecognized price stream frame");
            return vec![];
        };

        match frame {
            InboundFrame::PriceUpdate(quotes) => {
                let out = self.dashboard.write().await.apply_price_batch(quotes, now);
                panels_for(&out)
            }
            InboundFrame::Alert(event) => {
                self.dashboard.write().await.push_alert(event);
                vec![ALERTS_UPDATED]
            }
        }
    }

    async fn start_fallback(&mut self, now: &str) {
        self.fallback_active = true;
        self.dashboard.write().await.enter_fallback(now);
        spawn_fallback_ticker(self.feed_tx.clone());
    }
}

fn panels_for(out: &BatchOutcome) -> Vec<&'static str> {
    let mut changed = vec![];
    if out.changed_prices() {
        changed.push(PRICES_UPDATED);
    }
    if out.chart_appended {
        changed.push(CHART_UPDATED);
    }
    if out.alerts_raised > 0 {
        changed.push(ALERTS_UPDATED);
    }
    changed
}

fn spawn_fallback_ticker(tx: FeedSender) {
    tokio::spawn(async move {
        let mut interval = time::interval(FALLBACK_TICK);
        // the first tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;
            if tx.send(FeedEvent::FallbackTick).await.is_err() {
                break;
            }
        }
    });
}

/// Starts the controller loop and every task that feeds it.
pub fn spawn(state: &AppState) {
    let (tx, rx) = channel();

    let controller = FeedController::new(
        state.dashboard.clone(),
        state.events_tx.clone(),
        tx.clone(),
    );
    tokio::spawn(controller.run(rx));

    price_stream::spawn_price_stream(state.settings.ws_url.clone(), tx.clone());
    alert_poller::spawn_rules_load(state.backend.clone(), tx.clone());
    alert_poller::spawn_alert_event_poller(state.backend.clone(), tx);
}
