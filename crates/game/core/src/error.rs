//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (e.g., `MoveError`, `ShootError`) are defined in their
//! respective modules alongside the rules they validate. They all implement
//! [`GameError`] so the runtime can classify rejections uniformly.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each concern has its own error type with specific variants
//! - **Human Readable**: `Display` output is shown to the player as the rejection reason
//! - **Severity Classification**: Errors are categorized for recovery strategies

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The request was legal in shape but the board disallows it right now
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Fatal**: The session cannot continue (e.g. no start positions)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with an alternative action.
    ///
    /// Examples: destination occupied, segment blocked by a wall
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: wrong side, diagonal waypoint
    Validation,

    /// Fatal error - session cannot continue.
    ///
    /// Examples: no floor cells to place the units on
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all game-core errors.
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
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
