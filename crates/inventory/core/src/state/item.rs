//! Item-related state types.
//!
//! - ItemHandle: Reference to item definitions held by a caller-owned catalog
//! - PlacedItem: Per-placement record stored in an origin slot

use super::Footprint;
use crate::env::ItemDefinition;

/// Reference to an item definition stored outside the inventory (lookup via
/// [`crate::env::ItemOracle`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemHandle(pub u32);

impl core::fmt::Display for ItemHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// An item as it sits on the grid.
///
/// Cloned out of the [`ItemDefinition`] at placement time; the inventory keeps
/// only what it needs to answer footprint and stacking questions, plus the
/// mutable stack quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedItem {
    pub handle: ItemHandle,
    pub footprint: Footprint,
    pub max_stack: u16,
    pub quantity: u16,
}

impl PlacedItem {
    pub fn new(handle: ItemHandle, footprint: Footprint, max_stack: u16, quantity: u16) -> Self {
        Self {
            handle,
            footprint,
            max_stack,
            quantity,
        }
    }

    pub fn from_definition(definition: &ItemDefinition, quantity: u16) -> Self {
        Self::new(
            definition.handle,
            definition.footprint,
            definition.max_stack,
            quantity,
        )
    }

    /// Remaining stack capacity before `max_stack` is reached.
    pub fn room(&self) -> u16 {
        self.max_stack.saturating_sub(self.quantity)
    }

    pub fn is_stackable(&self) -> bool {
        self.max_stack > 1
    }
}
