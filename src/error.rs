use std::error::Error as StdError;

use thiserror::Error;

/// Versealign's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Versealign's crate-wide error type.
///
/// This is intentionally decoupled from `anyhow` so downstream libraries aren't forced to
/// adopt `anyhow` in their own public APIs.
#[derive(Debug, Error)]
pub enum Error {
    /// The reference string did not match the expected shape at all.
    #[error("malformed scripture reference: '{0}'")]
    MalformedReference(String),

    /// The reference parsed structurally, but the book name matched no known alias.
    #[error("unknown book in scripture reference: '{0}'")]
    UnknownBook(String),

    /// The requested range's start or end key is absent from the verse source.
    #[error("reference '{0}' not found in verse source")]
    RangeNotFound(String),

    /// The requested range resolved to zero verses.
    #[error("requested range contains no verses")]
    EmptyRange,

    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Other(#[from] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Message(format!("{err:#}"))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(Box::new(err))
    }
}
