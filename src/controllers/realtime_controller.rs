use std::{convert::Infallible, time::Duration};

use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, IntoResponse,
    },
};
use futures_util::StreamExt;
use serde_json::json;
use tokio::sync::broadcast::error::RecvError;

use crate::{
    render,
    services::feed_controller::{
        ALERTS_UPDATED, CHART_UPDATED, PRICES_UPDATED, RULES_UPDATED, STATUS_UPDATED,
    },
    AppState,
};

const ALL_PANELS: [&str; 5] = [
    PRICES_UPDATED,
    CHART_UPDATED,
    ALERTS_UPDATED,
    RULES_UPDATED,
    STATUS_UPDATED,
];

// GET /events  (SSE)
pub async fn sse_events(
    State(state): State<AppState>,
) -> Sse<impl futures_util::stream::Stream<Item = Result<Event, Infallible>>> {
    let rx = state.events_tx.subscribe();

    let stream = futures_util::stream::unfold(rx, |mut rx| async {
        let names = match rx.recv().await {
            Ok(name) => vec![name],
            // missed updates: have the page refetch every panel
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!("sse client lagged by {} events, resyncing", skipped);
                ALL_PANELS.iter().map(|n| n.to_string()).collect()
            }
            Err(RecvError::Closed) => return None,
        };

        let events: Vec<Result<Event, Infallible>> = names
            .into_iter()
            .map(|name| Ok(Event::default().event(name).data("1")))
            .collect();

        Some((futures_util::stream::iter(events), rx))
    })
    .flatten();

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(20))
            .text("keep-alive"),
    )
}

// GET /status
pub async fn get_status(State(state): State<AppState>) -> impl IntoResponse {
    let status = state.dashboard.read().await.status();
    let ctx = json!({ "connected": status.is_connected(), "label": status.label() });

    let html = render::render_partial(&state, "partials/status_pill", &ctx);
    (StatusCode::OK, Html(html))
}
