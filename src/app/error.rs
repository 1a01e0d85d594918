use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrainrError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error("Bookmark not found: {0}")]
    BookmarkNotFound(u64),

    #[error("Unknown topic: {0}")]
    UnknownTopic(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

/// Failures of the article feed pipeline.
///
/// Kept separate from [`BrainrError`] so that it can be cloned into the
/// feed's `Failed` state and shown again on every redraw.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("Could not reach Wikipedia: {0}")]
    Transport(String),

    #[error("No articles with images were found")]
    EmptyResult,

    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl FeedError {
    pub fn from_brainr(err: &BrainrError) -> Self {
        match err {
            BrainrError::Feed(inner) => inner.clone(),
            other => FeedError::Transport(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, BrainrError>;
