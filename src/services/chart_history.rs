use std::collections::VecDeque;

use crate::models::ChartSample;

pub const CHART_CAPACITY: usize = 20;

/// Oldest-to-newest samples for exactly one symbol.
#[derive(Debug, Clone)]
pub struct ChartHistory {
    symbol: String,
    samples: VecDeque<ChartSample>,
}

impl ChartHistory {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            samples: VecDeque::with_capacity(CHART_CAPACITY + 1),
        }
    }

    pub fn append(&mut self, sample: ChartSample) {
        self.samples.push_back(sample);
        while self.samples.len() > CHART_CAPACITY {
            self.samples.pop_front();
        }
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }

    /// Clears the samples and rebinds the buffer to another symbol.
    pub fn retarget(&mut self, symbol: impl Into<String>) {
        self.reset();
        self.symbol = symbol.into();
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn list(&self) -> impl Iterator<Item = &ChartSample> + '_ {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
