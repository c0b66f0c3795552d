use std::collections::VecDeque;

use crate::models::AlertEvent;

pub const ALERT_DISPLAY_LIMIT: usize = 6;

/// Most-recent-first list of alert events, capped at [`ALERT_DISPLAY_LIMIT`].
#[derive(Debug, Clone, Default)]
pub struct AlertEventBuffer {
    events: VecDeque<AlertEvent>,
}

impl AlertEventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: AlertEvent) {
        self.events.push_front(event);
        self.events.truncate(ALERT_DISPLAY_LIMIT);
    }

    /// Drops the current contents and keeps the first entries of `events`, which
    /// must already be most-recent-first.
    pub fn replace(&mut self, events: Vec<AlertEvent>) {
        self.events = events.into_iter().take(ALERT_DISPLAY_LIMIT).collect();
    }

    pub fn list(&self) -> impl Iterator<Item = &AlertEvent> + '_ {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
