//! Ledger error model.

use thiserror::Error;

/// Result type used by every ledger operation.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Recoverable failures raised by the ledger engine.
///
/// A failed operation never changes the ledger: callers can surface the
/// message and keep working with the previous state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Malformed or out-of-range input (negative cost, non-integer quantity, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Unknown product or period.
    #[error("not found: {0}")]
    NotFound(String),

    /// A product with the same identifier already exists.
    #[error("duplicate: {0}")]
    Duplicate(String),
}

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }
}
