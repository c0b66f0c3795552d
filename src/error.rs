use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("backend returned {0}")]
    Status(reqwest::StatusCode),
    #[error("json decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
