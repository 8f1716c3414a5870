// src/error.rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RandomOrgError>;

#[derive(Debug, Error)]
pub enum RandomOrgError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// random.org answers errors with a non-2xx status and an `Error: ...` body.
    #[error("random.org returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not parse integer from response line {line:?}")]
    Parse { line: String },

    #[error("raw value {0} is outside the random.org source range")]
    OutOfSourceRange(i64),

    #[error("expected {expected} integers, server returned {received}")]
    ShortResponse { expected: usize, received: usize },

    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: String, max: String },

    #[error("random.org quota exhausted ({0} bits remaining)")]
    QuotaExhausted(i64),

    #[error("rescaled value does not fit the requested integer type")]
    Overflow,

    #[error("invalid request URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl RandomOrgError {
    pub fn invalid_range<T: ToString>(min: &T, max: &T) -> Self {
        RandomOrgError::InvalidRange {
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}
