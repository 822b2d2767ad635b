//! Error types for the lekdet-core library.

use thiserror::Error;

/// Main error type for the lekdet library.
#[derive(Error, Debug)]
pub enum LekdetError {
    /// Article store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Supplemental analyzer error.
    #[error("analyzer error: {0}")]
    Analyzer(#[from] AnalyzerError),

    /// Reference draw data is malformed.
    #[error("invalid draw {date}: {reason}")]
    InvalidDraw { date: String, reason: String },

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by the supplemental analyzer collaborator.
///
/// The ingest pipeline never propagates these; a failed call counts as zero
/// additional candidates.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// The analyzer is not configured (missing key, disabled).
    #[error("analyzer unavailable: {0}")]
    Unavailable(String),

    /// Transport or remote service failure.
    #[error("request failed: {0}")]
    Request(String),

    /// The reply did not contain a usable JSON array.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Errors related to the article store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// An article with this url is already stored.
    #[error("duplicate article url: {0}")]
    DuplicateUrl(String),

    /// No article with this id.
    #[error("article not found: {0}")]
    ArticleNotFound(u64),

    /// The article record is unusable.
    #[error("invalid article: {0}")]
    InvalidArticle(String),
}

/// Result type for the lekdet library.
pub type Result<T> = std::result::Result<T, LekdetError>;
