//! Error types for database operations.

use thiserror::Error;

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A database cannot build stable ids without a prefix.
    #[error("Database id prefix is empty")]
    EmptyIdPrefix,

    /// No registered database knows the item id.
    #[error("Item not found: {0}")]
    ItemNotFound(String),
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, Error>;
