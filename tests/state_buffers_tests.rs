use smartstock::models::{AlertEvent, ChartSample, Direction, Quote};
use smartstock::services::{
    alert_buffer::{AlertEventBuffer, ALERT_DISPLAY_LIMIT},
    chart_history::{ChartHistory, CHART_CAPACITY},
    feed_store::FeedStore,
};

fn tracked() -> Vec<String> {
    vec!["AAPL".into(), "TSLA".into(), "NVDA".into(), "MSFT".into()]
}

fn quote(symbol: &str, price: f64) -> Quote {
    Quote {
        symbol: symbol.to_string(),
        price,
        change: 0.0,
        percent_change: 0.0,
        ts: "2024-05-01T10:00:00Z".to_string(),
    }
}

fn alert(n: usize) -> AlertEvent {
    AlertEvent::price_move("AAPL", Direction::Up, n as f64, format!("t{n}"))
}

#[test]
fn feed_store_last_write_wins() {
    let mut store = FeedStore::new(tracked());

    assert!(store.upsert(quote("AAPL", 100.0)).is_none());
    store.upsert(quote("TSLA", 200.0));
    let prev = store.upsert(quote("AAPL", 101.0));

    assert_eq!(prev.map(|q| q.price), Some(100.0));
    assert_eq!(store.get("AAPL").map(|q| q.price), Some(101.0));
    assert_eq!(store.get("TSLA").map(|q| q.price), Some(200.0));
    assert!(store.get("NVDA").is_none());
}

#[test]
fn feed_store_iterates_in_tracked_order_skipping_missing() {
    let mut store = FeedStore::new(tracked());

    store.upsert(quote("MSFT", 1.0));
    store.upsert(quote("AAPL", 2.0));
    // not tracked, stored but never listed
    store.upsert(quote("GOOG", 3.0));

    let symbols: Vec<&str> = store.all().map(|q| q.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["AAPL", "MSFT"]);
}

#[test]
fn alert_buffer_keeps_six_most_recent_first() {
    let mut buf = AlertEventBuffer::new();
    for n in 1..=9 {
        buf.push(alert(n));
        assert!(buf.len() <= ALERT_DISPLAY_LIMIT);
    }

    let prices: Vec<f64> = buf.list().filter_map(|a| a.price).collect();
    assert_eq!(prices, vec![9.0, 8.0, 7.0, 6.0, 5.0, 4.0]);
}

#[test]
fn alert_buffer_replace_discards_previous_and_caps() {
    let mut buf = AlertEventBuffer::new();
    buf.push(alert(100));

    buf.replace((1..=8).map(alert).collect());

    let prices: Vec<f64> = buf.list().filter_map(|a| a.price).collect();
    assert_eq!(prices, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

    buf.replace(vec![]);
    assert!(buf.is_empty());
}

#[test]
fn chart_history_caps_at_twenty_oldest_first() {
    let mut chart = ChartHistory::new("AAPL");
    for n in 0..25 {
        chart.append(ChartSample { ts: format!("t{n}"), price: n as f64 });
    }

    assert_eq!(chart.len(), CHART_CAPACITY);
    let prices: Vec<f64> = chart.list().map(|s| s.price).collect();
    assert_eq!(prices.first(), Some(&5.0));
    assert_eq!(prices.last(), Some(&24.0));
    assert!(prices.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn chart_history_reset_then_append_holds_single_sample() {
    let mut chart = ChartHistory::new("AAPL");
    chart.append(ChartSample { ts: "a".into(), price: 1.0 });
    chart.append(ChartSample { ts: "b".into(), price: 2.0 });

    chart.reset();
    let s = ChartSample { ts: "c".into(), price: 3.0 };
    chart.append(s.clone());

    assert_eq!(chart.list().cloned().collect::<Vec<_>>(), vec![s]);
}

#[test]
fn chart_history_retarget_clears_samples() {
    let mut chart = ChartHistory::new("AAPL");
    chart.append(ChartSample { ts: "a".into(), price: 1.0 });

    chart.retarget("TSLA");

    assert_eq!(chart.symbol(), "TSLA");
    assert!(chart.is_empty());
}
