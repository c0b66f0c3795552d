use std::collections::HashMap;

use crate::models::Quote;

/// Latest quote per symbol, iterated in the fixed tracked-symbol order.
#[derive(Debug, Clone)]
pub struct FeedStore {
    tracked: Vec<String>,
    quotes: HashMap<String, Quote>,
}

impl FeedStore {
    pub fn new(tracked: Vec<String>) -> Self {
        Self {
            tracked,
            quotes: HashMap::new(),
        }
    }

    /// Replaces any previous quote for the symbol and hands the old one back.
    pub fn upsert(&mut self, quote: Quote) -> Option<Quote> {
        self.quotes.insert(quote.symbol.clone(), quote)
    }

    pub fn get(&self, symbol: &str) -> Option<&Quote> {
        self.quotes.get(symbol)
    }

    /// Tracked symbols that have a quote, in tracked order.
    pub fn all(&self) -> impl Iterator<Item = &Quote> + '_ {
        self.tracked.iter().filter_map(|s| self.quotes.get(s))
    }

    pub fn tracked(&self) -> &[String] {
        &self.tracked
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}
