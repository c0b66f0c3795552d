use reqwest::Client;
use serde_json::Value;

use crate::{
    error::BackendError,
    models::{AlertEvent, AlertRule},
    services::{format::now_ts, wire},
};

/// REST side of the price/alert backend.
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
    alert_events_path: String,
}

impl BackendClient {
    pub fn new(base_url: &str, alert_events_path: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            alert_events_path: alert_events_path.to_string(),
        }
    }

    pub fn from_settings(settings: &crate::config::Settings) -> Self {
        Self::new(&settings.api_base_url, &settings.alert_events_path)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str) -> Result<Value, BackendError> {
        let res = self.http.get(self.url(path)).send().await?;

        if !res.status().is_success() {
            return Err(BackendError::Status(res.status()));
        }

        let body = res.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    // GET /alerts/rules
    pub async fn fetch_rules(&self) -> Result<Vec<AlertRule>, BackendError> {
        let body = self.get_json("/alerts/rules").await?;
        Ok(serde_json::from_value(body)?)
    }

    // GET /alerts/events (or /alerts/recent on older backends)
    pub async fn fetch_alert_events(&self) -> Result<Vec<AlertEvent>, BackendError> {
        let body = self.get_json(&self.alert_events_path).await?;

        // a null body means "nothing yet"
        let items = match body {
            Value::Null => Vec::new(),
            other => serde_json::from_value::<Vec<Value>>(other)?,
        };

        Ok(wire::alerts_from_values(items, &now_ts()))
    }
}
