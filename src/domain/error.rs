//! Domain-level errors

use thiserror::Error;

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
///
/// Lookups never produce an error; a missing record is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Corrupt data under storage key '{key}': {reason}")]
    CorruptStorage { key: String, reason: String },
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("No todo ids left to assign")]
    IdsExhausted,
}
