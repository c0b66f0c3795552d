use chrono::{DateTime, Local, NaiveDateTime, Utc};

pub fn fmt2(x: f64) -> String {
    format!("{:.2}", x)
}

/// Two decimals with an explicit `+` for non-negative values.
pub fn fmt_signed(x: f64) -> String {
    if x >= 0.0 {
        format!("+{:.2}", x)
    } else {
        format!("{:.2}", x)
    }
}

pub fn now_ts() -> String {
    Utc::now().to_rfc3339()
}

/// Parses the timestamp shapes the backend emits. Naive values are read as UTC.
pub fn parse_ts(ts: &str) -> Option<DateTime<Utc>> {
    let ts = ts.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(ts, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Local `HH:MM:SS` display string. Absent timestamps mean "now"; unknown text is shown as-is.
pub fn format_time(ts: Option<&str>) -> String {
    match ts.filter(|s| !s.trim().is_empty()) {
        None => format_instant(Utc::now()),
        Some(raw) => match parse_ts(raw) {
            Some(dt) => format_instant(dt),
            None => raw.to_string(),
        },
    }
}

fn format_instant(dt: DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%H:%M:%S").to_string()
}
