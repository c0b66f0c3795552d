use std::env;

pub const DEFAULT_TRACKED_SYMBOLS: &[&str] = &["AAPL", "TSLA", "NVDA", "MSFT"];

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,

    pub api_base_url: String,
    pub ws_url: String,
    pub alert_events_path: String,

    // display order of the stock table; never changes at runtime
    pub tracked_symbols: Vec<String>,
    pub chart_symbol: String,

    pub theme_cookie_name: String,
}

impl Settings {
    /// Settings pointing at the default local backend, without reading the environment.
    pub fn local() -> Self {
        let tracked_symbols = parse_symbols(&DEFAULT_TRACKED_SYMBOLS.join(","));
        let chart_symbol = tracked_symbols[0].clone();

        Settings {
            host: "127.0.0.1".to_string(),
            port: 3000,
            api_base_url: "http://127.0.0.1:8000".to_string(),
            ws_url: "ws://127.0.0.1:8000/ws/prices".to_string(),
            alert_events_path: "/alerts/events".to_string(),
            tracked_symbols,
            chart_symbol,
            theme_cookie_name: "theme".to_string(),
        }
    }
}

/// Trims, uppercases and dedupes a comma separated symbol list, keeping first occurrence order.
pub fn parse_symbols(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    for s in raw.split(',') {
        let sym = s.trim().to_uppercase();
        if sym.is_empty() || out.contains(&sym) {
            continue;
        }
        out.push(sym);
    }

    out
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let defaults = Settings::local();

    let host = env::var("HOST").unwrap_or(defaults.host);

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(defaults.port);

    let api_base_url = env::var("API_BASE_URL")
        .map(|s| s.trim_end_matches('/').to_string())
        .unwrap_or(defaults.api_base_url);

    let ws_url = env::var("WS_URL").unwrap_or(defaults.ws_url);

    let alert_events_path = env::var("ALERT_EVENTS_PATH")
        .map(|p| if p.starts_with('/') { p } else { format!("/{p}") })
        .unwrap_or(defaults.alert_events_path);

    let tracked_symbols = env::var("TRACKED_SYMBOLS")
        .ok()
        .map(|s| parse_symbols(&s))
        .filter(|v| !v.is_empty())
        .unwrap_or(defaults.tracked_symbols);

    let chart_symbol = env::var("CHART_SYMBOL")
        .ok()
        .map(|s| s.trim().to_uppercase())
        .filter(|s| tracked_symbols.contains(s))
        .unwrap_or_else(|| tracked_symbols[0].clone());

    let theme_cookie_name =
        env::var("THEME_COOKIE_NAME").unwrap_or(defaults.theme_cookie_name);

    Settings {
        host,
        port,
        api_base_url,
        ws_url,
        alert_events_path,
        tracked_symbols,
        chart_symbol,
        theme_cookie_name,
    }
}
