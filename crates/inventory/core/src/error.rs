//! Common error infrastructure for inventory-core.
//!
//! Shared classification types used by every error in the crate. The concrete
//! error enums ([`crate::state::InventoryError`],
//! [`crate::state::InvariantViolation`]) live next to the state they guard.
//!
//! # Design Principles
//!
//! - **Type Safety**: Placement failures are variants, not booleans
//! - **Rich Context**: Errors carry the position and item involved
//! - **Severity Classification**: Callers pick a recovery path from severity

use crate::state::{ItemHandle, Position};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: try another slot, or drop the item back to the world
/// - **Validation**: the request itself was malformed
/// - **Internal**: grid bookkeeping is inconsistent
/// - **Fatal**: the inventory cannot be used any further
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - retry elsewhere or with a different item.
    ///
    /// Examples: target cells occupied, grid full
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: zero-sized footprint, zero quantity
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: covered cell pointing at an empty origin
    Internal,

    /// Fatal error - inventory state cannot be trusted.
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

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ErrorContext {
    /// Cell the failing operation addressed (if applicable).
    pub position: Option<Position>,

    /// Item involved in the failing operation (if applicable).
    pub item: Option<ItemHandle>,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            position: None,
            item: None,
            message: None,
        }
    }

    /// Attaches a position to this context (builder pattern).
    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Attaches an item to this context (builder pattern).
    #[must_use]
    pub const fn with_item(mut self, item: ItemHandle) -> Self {
        self.item = Some(item);
        self
    }

    /// Attaches a static message to this context (builder pattern).
    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

/// Common trait for all inventory-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable strings, safe to match on in UI code
pub trait CoreError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
