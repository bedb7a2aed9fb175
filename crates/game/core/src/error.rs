//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (`InvestigationError`, `SessionError`, ...) live next
//! to the operations that produce them. Every one of them is an expected,
//! user-facing condition: the engine has no panicking failure path and no
//! retry policy.

/// Severity level of an error, used for categorization and presentation.
///
/// - **Recoverable**: the action was refused but the player can do something else
/// - **Validation**: the request referenced something that does not exist
/// - **Internal**: inconsistent data handed to the engine (corrupt content or snapshot)
/// - **Fatal**: the engine cannot be constructed at all
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Refused action; state unchanged.
    ///
    /// Examples: destination not walkable, object fully investigated
    Recoverable,

    /// Unknown identifier or malformed request.
    ///
    /// Examples: item id not in the scene, object key not in the catalog
    Validation,

    /// Data handed to the engine contradicts its invariants.
    ///
    /// Examples: snapshot where a visible tile was never explored
    Internal,

    /// Content cannot be turned into an engine at all.
    ///
    /// Examples: catalog references an undeclared clue
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

    /// Returns true if this error indicates bad data rather than a refused action.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
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
    /// Stable across releases; UI layers key their messages on it.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
