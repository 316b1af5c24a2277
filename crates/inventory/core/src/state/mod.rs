//! Grid state representation.
//!
//! This module owns the data structures that describe cells, placed items and
//! the flattened slot grid. Callers query this state freely but mutate it
//! exclusively through [`crate::inventory::GridInventory`].
mod common;
mod error;
mod grid;
mod item;
mod slot;

pub use common::{Footprint, Position};
pub use error::{InvariantViolation, InventoryError};
pub use grid::SlotGrid;
pub use item::{ItemHandle, PlacedItem};
pub use slot::Slot;
