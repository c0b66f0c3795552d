pub mod format;
pub mod wire;

pub mod feed_store;
pub mod alert_buffer;
pub mod chart_history;
pub mod dashboard;

pub mod backend;
pub mod price_stream;
pub mod alert_poller;
pub mod feed_controller;
