//! Backend payload shapes and their normalization into the dashboard models.
//!
//! Everything the backend sends passes through here exactly once; the rest of
//! the crate only sees [`Quote`] and [`AlertEvent`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::{AlertEvent, Direction, Quote};
use crate::services::format::now_ts;

/// One entry of a `price_update` frame.
#[derive(Debug, Clone, Deserialize)]
pub struct WireQuote {
    pub symbol: String,
    pub price: f64,
    #[serde(default)]
    pub change: Option<f64>,
    #[serde(default, rename = "percentChange", alias = "percent_change")]
    pub percent_change: Option<f64>,
    #[serde(default, alias = "timestamp", deserialize_with = "de_opt_ts")]
    pub ts: Option<String>,
}

impl WireQuote {
    /// Builds the stored quote, filling missing deltas from the previous quote.
    /// Returns `None` for prices that cannot be displayed.
    pub fn into_quote(self, prior: Option<&Quote>, now: &str) -> Option<Quote> {
        let symbol = self.symbol.trim().to_uppercase();
        if symbol.is_empty() || !self.price.is_finite() || self.price < 0.0 {
            return None;
        }

        let prior_price = prior.map(|q| q.price);
        let change = self
            .change
            .filter(|c| c.is_finite())
            .unwrap_or_else(|| prior_price.map(|p| self.price - p).unwrap_or(0.0));

        let percent_change = self
            .percent_change
            .filter(|p| p.is_finite())
            .unwrap_or_else(|| match prior_price {
                Some(p) if p != 0.0 => change / p * 100.0,
                _ => 0.0,
            });

        Some(Quote {
            symbol,
            price: self.price,
            change,
            percent_change,
            ts: self.ts.unwrap_or_else(|| now.to_string()),
        })
    }
}

// timestamps arrive either as text or as epoch seconds/millis
fn de_opt_ts<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(v.and_then(ts_text))
}

fn ts_text(v: Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s),
        Value::Number(n) => {
            let raw = n.as_i64()?;
            let dt: Option<DateTime<Utc>> = if raw.abs() >= 1_000_000_000_000 {
                DateTime::from_timestamp_millis(raw)
            } else {
                DateTime::from_timestamp(raw, 0)
            };
            dt.map(|d| d.to_rfc3339())
        }
        _ => None,
    }
}

/// Alert event as served by `/alerts/events` (or `/alerts/recent`) and pushed on the socket.
///
/// Accepted names, first present wins:
/// - symbol: `symbol`, `rule_symbol`, `ticker`
/// - text: `message`, `text`
/// - time: `triggered_at`, `time_utc`, `time`
/// - `direction` (`up`/`down`, `above`/`below`) and `price` are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAlertEvent {
    symbol: Option<String>,
    rule_symbol: Option<String>,
    ticker: Option<String>,

    message: Option<String>,
    text: Option<String>,

    direction: Option<String>,
    price: Option<f64>,

    #[serde(default, deserialize_with = "de_opt_ts")]
    triggered_at: Option<String>,
    #[serde(default, deserialize_with = "de_opt_ts")]
    time_utc: Option<String>,
    #[serde(default, deserialize_with = "de_opt_ts")]
    time: Option<String>,
}

impl RawAlertEvent {
    pub fn normalize(self, observed_at: &str) -> Option<AlertEvent> {
        let symbol = [self.symbol, self.rule_symbol, self.ticker]
            .into_iter()
            .flatten()
            .map(|s| s.trim().to_uppercase())
            .find(|s| !s.is_empty())?;

        let message = self.message.or(self.text).filter(|m| !m.trim().is_empty());
        let direction = self.direction.as_deref().and_then(Direction::parse);
        let price = self.price.filter(|p| p.is_finite());

        let triggered_at = self
            .triggered_at
            .or(self.time_utc)
            .or(self.time)
            .unwrap_or_else(|| observed_at.to_string());

        Some(AlertEvent {
            symbol,
            direction,
            message,
            price,
            triggered_at,
        })
    }
}

/// Normalizes a JSON value into an alert event, dropping anything that does not fit.
pub fn alert_from_value(value: Value, observed_at: &str) -> Option<AlertEvent> {
    serde_json::from_value::<RawAlertEvent>(value)
        .ok()?
        .normalize(observed_at)
}

/// Normalizes a backend alert-events list; invalid entries are skipped.
pub fn alerts_from_values(values: Vec<Value>, observed_at: &str) -> Vec<AlertEvent> {
    values
        .into_iter()
        .filter_map(|v| alert_from_value(v, observed_at))
        .collect()
}

#[derive(Debug, Clone)]
pub enum InboundFrame {
    PriceUpdate(Vec<WireQuote>),
    Alert(AlertEvent),
}

/// Classifies one socket text frame. Malformed or unrecognized frames yield `None`.
pub fn parse_frame(text: &str) -> Option<InboundFrame> {
    let mut msg: Value = serde_json::from_str(text).ok()?;

    if msg.get("type").and_then(Value::as_str) == Some("price_update") {
        let data = msg.get_mut("data")?.take();
        let Value::Array(items) = data else {
            return None;
        };

        let quotes = items
            .into_iter()
            .filter_map(|item| serde_json::from_value::<WireQuote>(item).ok())
            .collect();

        return Some(InboundFrame::PriceUpdate(quotes));
    }

    // alerts may be tagged on either key
    let is_alert = ["type", "kind"]
        .iter()
        .any(|key| msg.get(*key).and_then(Value::as_str) == Some("alert"));
    if !is_alert {
        return None;
    }

    let payload = if msg.get("data").is_some_and(Value::is_object) {
        msg["data"].take()
    } else if msg.get("alert").is_some_and(Value::is_object) {
        msg["alert"].take()
    } else {
        msg
    };

    alert_from_value(payload, &now_ts()).map(InboundFrame::Alert)
}
