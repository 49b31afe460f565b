use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx response; `message` is the body's `error` field when present.
    #[error("{message} (HTTP {status})")]
    Http { status: u16, message: String },
    /// 2xx response carrying `success: false`.
    #[error("request was not successful")]
    Rejected,
    #[error("parse error: {0}")]
    Parse(String),
    #[error("job has not been saved yet")]
    Unsaved,
}

impl ApiError {
    pub(crate) fn network(e: reqwest::Error) -> Self { Self::Network(e.to_string()) }
    pub(crate) fn parse(e: impl std::fmt::Display) -> Self { Self::Parse(e.to_string()) }
}
