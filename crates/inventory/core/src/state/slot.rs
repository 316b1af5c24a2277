//! Single grid cell.

use super::{PlacedItem, Position};

/// One cell of the inventory grid.
///
/// Only the top-left cell of a footprint stores the item; every other covered
/// cell stores a back-pointer to that origin so any cell resolves its owner
/// in O(1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Slot {
    #[default]
    Empty,
    /// Top-left cell of a placed item's footprint.
    Origin(PlacedItem),
    /// Non-origin cell covered by the item anchored at `origin`.
    Covered { origin: Position },
}

impl Slot {
    #[inline]
    pub fn is_occupied(&self) -> bool {
        !matches!(self, Self::Empty)
    }

    #[inline]
    pub fn is_origin(&self) -> bool {
        matches!(self, Self::Origin(_))
    }

    /// The placed item, populated only on origin cells.
    pub fn item(&self) -> Option<&PlacedItem> {
        match self {
            Self::Origin(item) => Some(item),
            _ => None,
        }
    }

    pub fn item_mut(&mut self) -> Option<&mut PlacedItem> {
        match self {
            Self::Origin(item) => Some(item),
            _ => None,
        }
    }

    /// Back-pointer to the owning origin, populated only on covered cells.
    pub fn origin_pos(&self) -> Option<Position> {
        match self {
            Self::Covered { origin } => Some(*origin),
            _ => None,
        }
    }
}
