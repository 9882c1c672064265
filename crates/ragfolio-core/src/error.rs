use thiserror::Error;

/// Failure classes of the retrieval core.
///
/// `SourceUnavailable` and `IndexUnavailable` are recoverable by design:
/// a failed content source contributes zero chunks to a build, and a
/// missing or corrupt index degrades search to an empty response.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Content source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Index unavailable: {0}")]
    IndexUnavailable(String),

    #[error("Failed to persist index: {0}")]
    Persist(String),
}

pub type Result<T> = std::result::Result<T, Error>;
