use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedStatus {
    Disconnected,
    Connecting,
    Live,
    Fallback,
}

impl FeedStatus {
    pub fn label(self) -> &'static str {
        match self {
            FeedStatus::Disconnected => "Live data: disconnected",
            FeedStatus::Connecting => "Live data: connecting…",
            FeedStatus::Live => "Live data: connected",
            FeedStatus::Fallback => "Live data: mock demo",
        }
    }

    pub fn is_connected(self) -> bool {
        self == FeedStatus::Live
    }
}
