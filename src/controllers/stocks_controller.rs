use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{
    render,
    services::{
        dashboard::Dashboard,
        feed_controller::CHART_UPDATED,
        format::{fmt2, fmt_signed, format_time},
    },
    AppState,
};

fn table_ctx(dashboard: &Dashboard) -> serde_json::Value {
    let selected = dashboard.chart_symbol();

    let rows: Vec<serde_json::Value> = dashboard
        .store()
        .all()
        .map(|q| {
            json!({
                "symbol": q.symbol,
                "selected": q.symbol == selected,
                "price": fmt2(q.price),
                "change": fmt_signed(q.change),
                "percent_change": fmt_signed(q.percent_change),
                "class": if q.is_up() { "price-up" } else { "price-down" },
                "time": format_time(Some(&q.ts)),
            })
        })
        .collect();

    json!({ "rows": rows })
}

// GET /stocks/table
pub async fn get_stocks_table(State(state): State<AppState>) -> impl IntoResponse {
    let ctx = table_ctx(&*state.dashboard.read().await);
    let html = render::render_partial(&state, "partials/stocks_table", &ctx);
    (StatusCode::OK, Html(html))
}

// POST /stocks/:symbol/select
pub async fn post_select_symbol(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Response {
    let mut dashboard = state.dashboard.write().await;

    if let Err(e) = dashboard.select_symbol(&symbol) {
        return (
            StatusCode::NOT_FOUND,
            Html(format!(
                r#"<tr><td colspan="5" class="price-down">{}</td></tr>"#,
                handlebars::html_escape(&e)
            )),
        )
            .into_response();
    }

    let ctx = table_ctx(&dashboard);
    drop(dashboard);

    // other open pages should follow the chart too
    let _ = state.events_tx.send(CHART_UPDATED.to_string());

    let html = render::render_partial(&state, "partials/stocks_table", &ctx);
    let mut res = (StatusCode::OK, Html(html)).into_response();
    res.headers_mut()
        .insert("HX-Trigger", HeaderValue::from_static(CHART_UPDATED));
    res
}

// GET /chart/series
pub async fn get_chart_series(State(state): State<AppState>) -> impl IntoResponse {
    let series = state.dashboard.read().await.chart_series();
    Json(series)
}
