//! Error types for form aggregation

use thiserror::Error;

use crate::types::PlayerId;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("API error: status {status} for {url}")]
    Api { status: u16, url: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid window size: {0} (must be at least 1)")]
    InvalidWindow(usize),

    #[error("Duplicate player id in roster: {0}")]
    DuplicatePlayer(PlayerId),

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, FormError>;
