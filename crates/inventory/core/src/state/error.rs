//! Inventory operation errors.
//!
//! Every mutating operation either succeeds completely or returns one of
//! these without touching the grid.

use crate::error::{CoreError, ErrorContext, ErrorSeverity};
use crate::state::{Footprint, ItemHandle, Position};

/// Errors returned by [`crate::inventory::GridInventory`] operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryError {
    /// Footprint anchored at `position` extends past the grid extents.
    #[error("{footprint} footprint at {position} exceeds the grid bounds")]
    OutOfBounds {
        position: Position,
        footprint: Footprint,
    },

    /// A target cell is already covered by a different item.
    #[error("cell {cell} is occupied by the item anchored at {occupant}")]
    Collision {
        /// First colliding cell in row-major order.
        cell: Position,
        /// Origin of the item covering `cell`.
        occupant: Position,
    },

    /// The addressed cell holds no item.
    #[error("no item at {position}")]
    NotFound { position: Position },

    /// Auto-placement exhausted every candidate origin.
    #[error("no free space for a {footprint} item")]
    NoSpace { footprint: Footprint },

    /// Zero-sized footprint.
    #[error("invalid footprint {footprint}")]
    InvalidFootprint { footprint: Footprint },

    /// Quantity is zero or exceeds the item's stack limit.
    #[error("invalid quantity {quantity} (max stack: {max_stack})")]
    InvalidQuantity { quantity: u16, max_stack: u16 },

    /// Stacking onto an item of a different type.
    #[error("cannot stack {incoming} onto {existing}")]
    ItemMismatch {
        existing: ItemHandle,
        incoming: ItemHandle,
    },

    /// Target stack has no remaining capacity.
    #[error("stack at {position} is full")]
    StackFull { position: Position },

    /// Grid dimensions are zero or exceed the configured cell limit.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A snapshot does not describe a consistent grid of this size.
    #[error("snapshot rejected: {reason}")]
    SnapshotMismatch { reason: String },
}

impl InventoryError {
    /// Cell the failing operation addressed, if any.
    pub fn position(&self) -> Option<Position> {
        use InventoryError::*;
        match self {
            OutOfBounds { position, .. } | NotFound { position } | StackFull { position } => {
                Some(*position)
            }
            Collision { cell, .. } => Some(*cell),
            _ => None,
        }
    }
}

impl CoreError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        use InventoryError::*;
        match self {
            Collision { .. } | NoSpace { .. } | StackFull { .. } => ErrorSeverity::Recoverable,
            OutOfBounds { .. } | NotFound { .. } => ErrorSeverity::Recoverable,
            InvalidFootprint { .. } | InvalidQuantity { .. } | ItemMismatch { .. } => {
                ErrorSeverity::Validation
            }
            InvalidDimensions { .. } | SnapshotMismatch { .. } => ErrorSeverity::Validation,
        }
    }

    fn context(&self) -> Option<ErrorContext> {
        let context = match self {
            Self::ItemMismatch { incoming, .. } => ErrorContext::new()
                .with_item(*incoming)
                .with_message("item types differ"),
            Self::NoSpace { .. } => ErrorContext::new().with_message("grid exhausted"),
            other => ErrorContext::new().with_position(other.position()?),
        };
        Some(context)
    }

    fn error_code(&self) -> &'static str {
        use InventoryError::*;
        match self {
            OutOfBounds { .. } => "INVENTORY_OUT_OF_BOUNDS",
            Collision { .. } => "INVENTORY_COLLISION",
            NotFound { .. } => "INVENTORY_NOT_FOUND",
            NoSpace { .. } => "INVENTORY_NO_SPACE",
            InvalidFootprint { .. } => "INVENTORY_INVALID_FOOTPRINT",
            InvalidQuantity { .. } => "INVENTORY_INVALID_QUANTITY",
            ItemMismatch { .. } => "INVENTORY_ITEM_MISMATCH",
            StackFull { .. } => "INVENTORY_STACK_FULL",
            InvalidDimensions { .. } => "INVENTORY_INVALID_DIMENSIONS",
            SnapshotMismatch { .. } => "INVENTORY_SNAPSHOT_MISMATCH",
        }
    }
}

/// Grid bookkeeping inconsistencies detected by
/// [`crate::inventory::GridInventory::validate`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    /// Covered cell points at a cell that is not an origin.
    #[error("cell {cell} points at {origin}, which is not an origin")]
    DanglingOrigin { cell: Position, origin: Position },

    /// Covered cell points at an origin whose footprint does not include it.
    #[error("cell {cell} claims origin {origin} but lies outside its footprint")]
    OutsideFootprint { cell: Position, origin: Position },

    /// A footprint cell does not point back at its origin.
    #[error("origin {origin} footprint cell {cell} is not owned by it")]
    UnclaimedCell { origin: Position, cell: Position },

    /// Origin footprint leaves the grid.
    #[error("origin {origin} footprint leaves the grid")]
    FootprintOutOfBounds { origin: Position },

    /// Stored quantity outside `1..=max_stack`.
    #[error("origin {origin} holds invalid quantity {quantity}")]
    BadQuantity { origin: Position, quantity: u16 },
}

impl CoreError for InvariantViolation {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        use InvariantViolation::*;
        match self {
            DanglingOrigin { .. } => "INVARIANT_DANGLING_ORIGIN",
            OutsideFootprint { .. } => "INVARIANT_OUTSIDE_FOOTPRINT",
            UnclaimedCell { .. } => "INVARIANT_UNCLAIMED_CELL",
            FootprintOutOfBounds { .. } => "INVARIANT_FOOTPRINT_OUT_OF_BOUNDS",
            BadQuantity { .. } => "INVARIANT_BAD_QUANTITY",
        }
    }
}
