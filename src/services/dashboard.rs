//! The dashboard state object.
//!
//! Every feed source (socket, fallback ticker, alert poller) and every user
//! action mutates the dashboard through the methods here, and the web layer
//! only ever reads it. Nothing in this module does I/O.

use std::sync::Arc;

use rand::Rng;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::{
    models::{AlertEvent, AlertRule, ChartSample, Direction, FeedStatus, Quote},
    services::{
        alert_buffer::AlertEventBuffer,
        chart_history::ChartHistory,
        feed_store::FeedStore,
        format::format_time,
        wire::WireQuote,
    },
};

pub type SharedDashboard = Arc<RwLock<Dashboard>>;

/// Absolute price move between two consecutive quotes that raises a local alert.
pub const MOVE_ALERT_THRESHOLD: f64 = 1.5;

pub const FALLBACK_SEED_PRICE: f64 = 100.0;
pub const FALLBACK_PRICE_FLOOR: f64 = 1.0;
pub const FALLBACK_MAX_DELTA: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub enum RulesPanel {
    Loading,
    Loaded(Vec<AlertRule>),
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertsPanel {
    Pending,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub updated: usize,
    pub alerts_raised: usize,
    pub chart_appended: bool,
}

impl BatchOutcome {
    pub fn changed_prices(&self) -> bool {
        self.updated > 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub symbol: String,
    pub labels: Vec<String>,
    pub prices: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    store: FeedStore,
    alerts: AlertEventBuffer,
    chart: ChartHistory,
    status: FeedStatus,
    rules: RulesPanel,
    alerts_panel: AlertsPanel,
}

impl Dashboard {
    pub fn new(tracked: Vec<String>, chart_symbol: impl Into<String>) -> Self {
        Self {
            store: FeedStore::new(tracked),
            alerts: AlertEventBuffer::new(),
            chart: ChartHistory::new(chart_symbol),
            status: FeedStatus::Disconnected,
            rules: RulesPanel::Loading,
            alerts_panel: AlertsPanel::Pending,
        }
    }

    pub fn shared(self) -> SharedDashboard {
        Arc::new(RwLock::new(self))
    }

    pub fn store(&self) -> &FeedStore {
        &self.store
    }

    pub fn alerts(&self) -> &AlertEventBuffer {
        &self.alerts
    }

    pub fn chart(&self) -> &ChartHistory {
        &self.chart
    }

    pub fn chart_symbol(&self) -> &str {
        self.chart.symbol()
    }

    pub fn status(&self) -> FeedStatus {
        self.status
    }

    pub fn set_status(&mut self, status: FeedStatus) {
        self.status = status;
    }

    pub fn rules(&self) -> &RulesPanel {
        &self.rules
    }

    pub fn alerts_panel(&self) -> AlertsPanel {
        self.alerts_panel
    }

    // ---------------- Prices ----------------

    /// Stores one quote and raises a local move alert when it jumped far enough
    /// from the previous one. Returns whether an alert was raised.
    fn record_quote(&mut self, quote: Quote, now: &str) -> bool {
        let new_price = quote.price;
        let symbol = quote.symbol.clone();

        let Some(prev) = self.store.upsert(quote) else {
            return false;
        };

        let delta = new_price - prev.price;
        if delta.abs() < MOVE_ALERT_THRESHOLD {
            return false;
        }

        self.alerts.push(AlertEvent::price_move(
            &symbol,
            Direction::from_delta(delta),
            new_price,
            now.to_string(),
        ));
        true
    }

    fn append_chart_from_store(&mut self) -> bool {
        let Some(sample) = self.store.get(self.chart.symbol()).map(ChartSample::from) else {
            return false;
        };
        self.chart.append(sample);
        true
    }

    /// Applies a `price_update` batch from the live socket.
    pub fn apply_price_batch(&mut self, quotes: Vec<WireQuote>, now: &str) -> BatchOutcome {
        let mut out = BatchOutcome::default();
        let mut selected_updated = false;

        for wire in quotes {
            let prior = self.store.get(wire.symbol.trim().to_uppercase().as_str());
            let Some(quote) = wire.into_quote(prior, now) else {
                continue;
            };

            if quote.symbol == self.chart.symbol() {
                selected_updated = true;
            }

            out.updated += 1;
            if self.record_quote(quote, now) {
                out.alerts_raised += 1;
            }
        }

        if selected_updated {
            out.chart_appended = self.append_chart_from_store();
        }

        out
    }

    pub fn push_alert(&mut self, event: AlertEvent) {
        self.alerts.push(event);
    }

    // ---------------- Fallback feed ----------------

    /// Switches to the synthetic feed, seeding every tracked symbol that has no quote yet.
    pub fn enter_fallback(&mut self, now: &str) {
        self.status = FeedStatus::Fallback;

        let missing: Vec<String> = self
            .store
            .tracked()
            .iter()
            .filter(|s| self.store.get(s).is_none())
            .cloned()
            .collect();

        for symbol in missing {
            self.store.upsert(Quote {
                symbol,
                price: FALLBACK_SEED_PRICE,
                change: 0.0,
                percent_change: 0.0,
                ts: now.to_string(),
            });
        }
    }

    /// Moves one symbol by `delta`, never below [`FALLBACK_PRICE_FLOOR`].
    /// Returns the stored quote, or `None` when the symbol has no prior quote.
    pub fn apply_synthetic_move(&mut self, symbol: &str, delta: f64, now: &str) -> Option<&Quote> {
        self.synthetic_move(symbol, delta, now)?;
        self.store.get(symbol)
    }

    // Some(raised_alert) when the symbol had a quote to move from.
    fn synthetic_move(&mut self, symbol: &str, delta: f64, now: &str) -> Option<bool> {
        let prev_price = self.store.get(symbol)?.price;
        let price = (prev_price + delta).max(FALLBACK_PRICE_FLOOR);
        let change = price - prev_price;
        let percent_change = if prev_price != 0.0 {
            change / prev_price * 100.0
        } else {
            0.0
        };

        let quote = Quote {
            symbol: symbol.to_string(),
            price,
            change,
            percent_change,
            ts: now.to_string(),
        };

        Some(self.record_quote(quote, now))
    }

    /// One synthetic tick: every tracked symbol drifts by a uniform delta in
    /// `[-FALLBACK_MAX_DELTA, FALLBACK_MAX_DELTA]`.
    pub fn fallback_tick<R: Rng>(&mut self, rng: &mut R, now: &str) -> BatchOutcome {
        let mut out = BatchOutcome::default();
        let tracked = self.store.tracked().to_vec();

        for symbol in &tracked {
            let delta = rng.gen_range(-FALLBACK_MAX_DELTA..=FALLBACK_MAX_DELTA);

            if let Some(raised) = self.synthetic_move(symbol, delta, now) {
                out.updated += 1;
                if raised {
                    out.alerts_raised += 1;
                }
            }
        }

        if out.updated > 0 {
            out.chart_appended = self.append_chart_from_store();
        }

        out
    }

    // ---------------- Backend-polled panels ----------------

    pub fn replace_alerts(&mut self, events: Vec<AlertEvent>) {
        self.alerts.replace(events);
        self.alerts_panel = AlertsPanel::Ready;
    }

    /// A failed poll keeps whatever is displayed; only the very first load shows a failure.
    /// Returns whether the panel changed.
    pub fn alerts_refresh_failed(&mut self) -> bool {
        if self.alerts_panel == AlertsPanel::Pending {
            self.alerts_panel = AlertsPanel::Failed;
            return true;
        }
        false
    }

    pub fn set_rules(&mut self, rules: Vec<AlertRule>) {
        self.rules = RulesPanel::Loaded(rules);
    }

    pub fn rules_failed(&mut self) {
        self.rules = RulesPanel::Failed;
    }

    // ---------------- Chart ----------------

    pub fn select_symbol(&mut self, symbol: &str) -> Result<(), String> {
        let sym = symbol.trim().to_uppercase();
        if !self.store.tracked().iter().any(|s| *s == sym) {
            return Err(format!("{sym} is not a tracked symbol"));
        }

        self.chart.retarget(sym);
        self.append_chart_from_store();
        Ok(())
    }

    pub fn chart_series(&self) -> ChartSeries {
        let (labels, prices) = self
            .chart
            .list()
            .map(|s| (format_time(Some(&s.ts)), s.price))
            .unzip();

        ChartSeries {
            symbol: self.chart.symbol().to_string(),
            labels,
            prices,
        }
    }
}
