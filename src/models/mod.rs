pub mod quote;
pub mod alert;
pub mod feed;
pub mod theme;

pub use quote::{ChartSample, Quote};
pub use alert::{AlertEvent, AlertRule, Direction};
pub use feed::FeedStatus;
pub use theme::Theme;
