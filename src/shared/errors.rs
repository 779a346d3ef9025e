use thiserror::Error;

use crate::domain::money::Currency;

/// Domain-level error types.
///
/// `Validation` means the input was bad and the target object was never
/// constructed. `InvalidState` means the input was fine but the
/// aggregate is in the wrong state for the requested action. Callers can
/// rely on that distinction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Invalid state: cannot {action}: {reason}")]
    InvalidState {
        action: &'static str,
        reason: String,
    },

    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: Currency, right: Currency },

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
