//! Error types for core vocabulary parsing.

use thiserror::Error;

/// Errors raised when decoding core vocabulary from external data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Resource key not in the known set.
    #[error("unknown resource type: {0}")]
    UnknownResource(String),
}
