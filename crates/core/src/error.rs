//! Domain error model.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Failures the pure domain can report on its own.
///
/// Rejected status transitions have their own richer type in the orders
/// crate; storage failures live in infra.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Unknown order status label and similar bad input.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Blank identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Stale version on a conditional write.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
