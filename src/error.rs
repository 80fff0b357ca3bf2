//! Error types for revq.

use thiserror::Error;

/// Top-level error type.
///
/// Field-level problems in a judgment are never errors: the validator
/// resolves them via fallback. These variants cover the structural
/// failures that must propagate to the caller.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Underlying SQLite failure. The enclosing transaction is rolled
    /// back, so prior store state is unchanged.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A requested run does not exist.
    #[error("analysis run {0} not found")]
    RunNotFound(i64),

    /// An insert referenced a run that does not exist.
    #[error("cannot insert records: analysis run {0} does not exist")]
    MissingRun(i64),

    /// Caller-supplied filter configuration is self-contradictory.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// The enrichment provider reported terminal failure for a review.
    #[error("judgment unavailable for review {0}")]
    JudgmentUnavailable(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}
