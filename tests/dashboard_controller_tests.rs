use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use smartstock::{
    config::Settings,
    models::{AlertRule, FeedStatus},
    routes,
    services::wire::WireQuote,
    AppState,
};
use tower::ServiceExt;

fn test_state() -> AppState {
    AppState::new(Settings::local())
}

async fn response_body_string(res: axum::response::Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder().method("POST").uri(uri).body(Body::empty()).unwrap()
}

fn wq(symbol: &str, price: f64) -> WireQuote {
    WireQuote {
        symbol: symbol.to_string(),
        price,
        change: None,
        percent_change: None,
        ts: Some("2024-05-01T10:00:00Z".to_string()),
    }
}

#[tokio::test]
async fn health_returns_ok() {
    let res = routes::app(test_state()).oneshot(get("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(response_body_string(res).await, "ok");
}

#[tokio::test]
async fn home_defaults_to_dark_theme() {
    let res = routes::app(test_state()).oneshot(get("/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(body.contains(r#"data-theme="dark""#));
    assert!(body.contains("Dark Mode"));
    assert!(body.contains("stocks-table-body"));
}

#[tokio::test]
async fn home_uses_theme_cookie() {
    let req = Request::builder()
        .uri("/")
        .header(header::COOKIE, "theme=light")
        .body(Body::empty())
        .unwrap();

    let body = response_body_string(routes::app(test_state()).oneshot(req).await.unwrap()).await;
    assert!(body.contains(r#"data-theme="light""#));
    assert!(body.contains("Light Mode"));
}

#[tokio::test]
async fn theme_toggle_flips_cookie() {
    let res = routes::app(test_state()).oneshot(post("/theme/toggle")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let cookie = res.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap().to_string();
    assert!(cookie.starts_with("theme=light"));
    assert_eq!(response_body_string(res).await, "Light Mode");

    let req = Request::builder()
        .method("POST")
        .uri("/theme/toggle")
        .header(header::COOKIE, "theme=light")
        .body(Body::empty())
        .unwrap();
    let res = routes::app(test_state()).oneshot(req).await.unwrap();
    let cookie = res.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with("theme=dark"));
}

#[tokio::test]
async fn stocks_table_renders_tracked_rows() {
    let state = test_state();

    let body = response_body_string(routes::app(state.clone()).oneshot(get("/stocks/table")).await.unwrap()).await;
    assert!(body.contains("Waiting for prices"));

    {
        let mut d = state.dashboard.write().await;
        d.apply_price_batch(vec![wq("TSLA", 200.0), wq("AAPL", 100.0)], "NOW");
        d.apply_price_batch(vec![wq("TSLA", 198.0)], "NOW");
    }

    let body = response_body_string(routes::app(state).oneshot(get("/stocks/table")).await.unwrap()).await;
    let aapl = body.find("<td>AAPL</td>").unwrap();
    let tsla = body.find("<td>TSLA</td>").unwrap();
    assert!(aapl < tsla, "rows follow tracked order");
    assert!(body.contains("row-selected"));
    assert!(body.contains("198.00"));
    assert!(body.contains("-2.00"));
    assert!(body.contains("price-down"));
    assert!(body.contains("+0.00"));
}

#[tokio::test]
async fn selecting_symbol_retargets_chart() {
    let state = test_state();
    state.dashboard.write().await.apply_price_batch(vec![wq("NVDA", 900.0)], "NOW");

    let res = routes::app(state.clone()).oneshot(post("/stocks/nvda/select")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers().get("HX-Trigger").unwrap(), "chartUpdated");

    let res = routes::app(state.clone()).oneshot(get("/chart/series")).await.unwrap();
    let series: serde_json::Value =
        serde_json::from_str(&response_body_string(res).await).unwrap();
    assert_eq!(series["symbol"], "NVDA");
    assert_eq!(series["prices"], serde_json::json!([900.0]));

    let res = routes::app(state).oneshot(post("/stocks/GOOG/select")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn recent_alerts_placeholders() {
    let state = test_state();

    let body = response_body_string(routes::app(state.clone()).oneshot(get("/alerts/recent")).await.unwrap()).await;
    assert!(body.contains("No alerts yet."));

    state.dashboard.write().await.alerts_refresh_failed();
    let body = response_body_string(routes::app(state.clone()).oneshot(get("/alerts/recent")).await.unwrap()).await;
    assert!(body.contains("Failed to load alerts."));

    {
        let mut d = state.dashboard.write().await;
        d.apply_price_batch(vec![wq("AAPL", 100.0)], "NOW");
        d.apply_price_batch(vec![wq("AAPL", 102.0)], "NOW");
    }
    let body = response_body_string(routes::app(state).oneshot(get("/alerts/recent")).await.unwrap()).await;
    assert!(body.contains("AAPL moved up to 102.00"));
}

#[tokio::test]
async fn alert_rules_panel_states() {
    let state = test_state();

    let body = response_body_string(routes::app(state.clone()).oneshot(get("/alerts/rules")).await.unwrap()).await;
    assert!(body.contains("Loading rules"));

    state.dashboard.write().await.rules_failed();
    let body = response_body_string(routes::app(state.clone()).oneshot(get("/alerts/rules")).await.unwrap()).await;
    assert!(body.contains("Failed to load rules."));

    state.dashboard.write().await.set_rules(vec![AlertRule {
        id: 7,
        symbol: "AAPL".into(),
        operator: "above".into(),
        threshold: 150.0,
    }]);
    let body = response_body_string(routes::app(state).oneshot(get("/alerts/rules")).await.unwrap()).await;
    assert!(body.contains("AAPL ABOVE 150"));
    assert!(body.contains("#7"));
}

#[tokio::test]
async fn status_pill_reflects_feed_status() {
    let state = test_state();

    let body = response_body_string(routes::app(state.clone()).oneshot(get("/status")).await.unwrap()).await;
    assert!(body.contains("pill-disconnected"));

    state.dashboard.write().await.set_status(FeedStatus::Live);
    let body = response_body_string(routes::app(state.clone()).oneshot(get("/status")).await.unwrap()).await;
    assert!(body.contains("pill-connected"));
    assert!(body.contains("Live data: connected"));

    state.dashboard.write().await.enter_fallback("NOW");
    let body = response_body_string(routes::app(state).oneshot(get("/status")).await.unwrap()).await;
    assert!(body.contains("Live data: mock demo"));
}

#[tokio::test]
async fn unknown_path_is_404() {
    let res = routes::app(test_state()).oneshot(get("/nope")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn lagged_event_stream_asks_for_every_panel() {
    let state = test_state();
    let events_tx = state.events_tx.clone();

    let res = routes::app(state).oneshot(get("/events")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // overflow the subscriber before it reads anything
    for _ in 0..100 {
        events_tx.send("pricesUpdated".to_string()).unwrap();
    }

    let mut body = res.into_body();
    let mut seen = String::new();
    let expected = [
        "event: pricesUpdated",
        "event: chartUpdated",
        "event: alertsUpdated",
        "event: rulesUpdated",
        "event: statusUpdated",
    ];

    tokio::time::timeout(std::time::Duration::from_secs(2), async {
        while !expected.iter().all(|e| seen.contains(e)) {
            let frame = body.frame().await.unwrap().unwrap();
            if let Ok(data) = frame.into_data() {
                seen.push_str(&String::from_utf8_lossy(&data));
            }
        }
    })
    .await
    .expect("resync events were not sent");

    assert!(!seen.contains("event: ping"));
}
