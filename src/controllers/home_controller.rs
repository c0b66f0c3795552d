use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

use crate::{controllers::theme_controller::theme_from_jar, render, AppState};

fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

pub async fn home(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let chart_symbol = state.dashboard.read().await.chart_symbol().to_string();
    let body = render::render_partial(
        &state,
        "pages/dashboard",
        &json!({ "chart_symbol": chart_symbol }),
    );

    let theme = theme_from_jar(&state, &jar);

    match render::render_full(&state, "SmartStock Monitor", body, theme) {
        Ok(page) => (StatusCode::OK, Html(page)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(e)).into_response(),
    }
}

pub async fn not_found(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    uri: Uri,
) -> impl IntoResponse {
    let body = render::render_partial(&state, "pages/not_found", &json!({ "path": uri.path() }));

    if is_htmx(&headers) {
        return (StatusCode::NOT_FOUND, Html(body)).into_response();
    }

    let theme = theme_from_jar(&state, &jar);

    match render::render_full(&state, "404", body, theme) {
        Ok(page) => (StatusCode::NOT_FOUND, Html(page)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(e)).into_response(),
    }
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Html("ok".to_string()))
}
