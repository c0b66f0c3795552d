use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use serde_json::json;

use crate::{
    render,
    services::{
        dashboard::{AlertsPanel, RulesPanel},
        format::format_time,
    },
    AppState,
};

// GET /alerts/recent
pub async fn get_recent_alerts(State(state): State<AppState>) -> impl IntoResponse {
    let dashboard = state.dashboard.read().await;

    let items: Vec<serde_json::Value> = dashboard
        .alerts()
        .list()
        .map(|a| {
            json!({
                "symbol": a.symbol,
                "text": a.describe(),
                "time": format_time(Some(&a.triggered_at)),
            })
        })
        .collect();

    // an empty buffer after a failed first load still shows the failure
    let failed = dashboard.alerts_panel() == AlertsPanel::Failed && items.is_empty();
    drop(dashboard);

    let ctx = json!({ "alerts": items, "failed": failed });
    let html = render::render_partial(&state, "partials/recent_alerts", &ctx);
    (StatusCode::OK, Html(html))
}

// GET /alerts/rules
pub async fn get_alert_rules(State(state): State<AppState>) -> impl IntoResponse {
    let ctx = match state.dashboard.read().await.rules() {
        RulesPanel::Loading => json!({ "loading": true }),
        RulesPanel::Failed => json!({ "failed": true }),
        RulesPanel::Loaded(rules) => {
            let items: Vec<serde_json::Value> = rules
                .iter()
                .map(|r| json!({ "id": r.id, "headline": r.headline() }))
                .collect();
            json!({ "rules": items })
        }
    };

    let html = render::render_partial(&state, "partials/alert_rules", &ctx);
    (StatusCode::OK, Html(html))
}
