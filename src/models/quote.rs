use serde::Serialize;

/// Latest snapshot for one symbol. A newer quote replaces this one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    #[serde(rename = "percentChange")]
    pub percent_change: f64,

    // timestamp text as observed; RFC 3339 for locally generated quotes
    pub ts: String,
}

impl Quote {
    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSample {
    pub ts: String,
    pub price: f64,
}

impl From<&Quote> for ChartSample {
    fn from(q: &Quote) -> Self {
        ChartSample {
            ts: q.ts.clone(),
            price: q.price,
        }
    }
}
