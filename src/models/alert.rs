use serde::{Deserialize, Serialize};

use crate::services::format::fmt2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 { Direction::Up } else { Direction::Down }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "up" | "above" => Some(Direction::Up),
            "down" | "below" => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// A notification about a price move, either detected locally or pushed by the backend.
/// Never mutated once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEvent {
    pub symbol: String,
    pub direction: Option<Direction>,
    pub message: Option<String>,
    pub price: Option<f64>,
    pub triggered_at: String,
}

impl AlertEvent {
    pub fn price_move(symbol: &str, direction: Direction, price: f64, at: String) -> Self {
        AlertEvent {
            symbol: symbol.to_string(),
            direction: Some(direction),
            message: None,
            price: Some(price),
            triggered_at: at,
        }
    }

    pub fn describe(&self) -> String {
        if let Some(msg) = self.message.as_deref().filter(|m| !m.trim().is_empty()) {
            return msg.to_string();
        }

        let verb = self.direction.map(Direction::as_str).unwrap_or("moved");
        match self.price {
            Some(p) if self.direction.is_some() => {
                format!("{} moved {} to {}", self.symbol, verb, fmt2(p))
            }
            Some(p) => format!("{} moved to {}", self.symbol, fmt2(p)),
            None => format!("{} {}", self.symbol, verb),
        }
    }
}

/// Backend-owned rule. Only ever read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRule {
    pub id: i64,
    pub symbol: String,
    // "above" | "below" | whatever the backend evaluates
    pub operator: String,
    pub threshold: f64,
}

impl AlertRule {
    pub fn headline(&self) -> String {
        format!("{} {} {}", self.symbol, self.operator.to_uppercase(), self.threshold)
    }
}
