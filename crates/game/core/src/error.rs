//! Common error infrastructure for game-core.
//!
//! This module provides shared types and traits used across all error types in game-core
//! and the crates built on it. Domain-specific errors (e.g., [`EntityError`],
//! [`crate::DiceError`]) live here or next to the rules they guard.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each failure domain has its own error type with specific variants
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **Fast failure**: Programmer/content bugs surface as errors; unrecognized but
//!   harmless data variants are logged and skipped instead (they never reach here)

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: Temporary conditions that may succeed with alternative input
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Unrecoverable errors; the initiating operation must abort
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with alternative input.
    ///
    /// Examples: item not held by the entity
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: malformed dice notation, unknown equipment slot
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - the operation cannot continue.
    ///
    /// Examples: content record missing from the store
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game errors.
///
/// This trait provides a uniform interface for error classification across
/// game-core, the content loaders and the runtime.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization, log filtering, and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors raised by entity equipment and inventory commands.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EntityError {
    /// Equip/unequip referenced a slot name that does not exist.
    #[error("Invalid equipment slot: {0}")]
    InvalidSlot(String),

    /// The entity does not hold the requested item.
    #[error("Item not held: {0}")]
    ItemNotHeld(String),
}

impl GameError for EntityError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidSlot(_) => ErrorSeverity::Fatal,
            Self::ItemNotHeld(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidSlot(_) => "ENTITY_INVALID_SLOT",
            Self::ItemNotHeld(_) => "ENTITY_ITEM_NOT_HELD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_slot_is_fatal() {
        let err = EntityError::InvalidSlot("belt".into());
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert!(err.severity().is_internal());
        assert_eq!(err.error_code(), "ENTITY_INVALID_SLOT");
        assert_eq!(err.to_string(), "Invalid equipment slot: belt");
    }
}
