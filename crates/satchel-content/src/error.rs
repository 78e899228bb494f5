//! Error types for satchel-content

use thiserror::Error;

/// Content loading error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Duplicate item definition: {0}")]
    DuplicateDefinition(String),

    #[error("Unknown property kind: {0}")]
    UnknownProperty(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
