//! Value copies of inventory contents for an external save system.

use tracing::{debug, warn};

use super::GridInventory;
use crate::events::InventoryChange;
use crate::state::{InventoryError, PlacedItem, Position, Slot, SlotGrid};

/// Dimensions plus every placement, in row-major origin order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventorySnapshot {
    pub width: u32,
    pub height: u32,
    pub placements: Vec<(Position, PlacedItem)>,
}

#[cfg(feature = "serde")]
impl InventorySnapshot {
    /// Encodes the snapshot with bincode.
    pub fn to_bytes(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> bincode::Result<Self> {
        bincode::deserialize(bytes)
    }
}

impl GridInventory {
    pub fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            width: self.width(),
            height: self.height(),
            placements: self
                .items()
                .map(|(origin, item)| (origin, *item))
                .collect(),
        }
    }

    /// Replaces the grid contents with `snapshot`.
    ///
    /// The snapshot is replayed onto a scratch grid first, so dimension
    /// mismatches, overlaps, out-of-bounds footprints and bad quantities are
    /// all rejected without touching the live grid. Observers stay
    /// subscribed and receive a single `Restored` notification.
    pub fn restore(&mut self, snapshot: &InventorySnapshot) -> Result<(), InventoryError> {
        let grid = build_grid(snapshot, self.width(), self.height()).inspect_err(|error| {
            warn!(
                target: "inventory::grid",
                error = %error,
                "snapshot rejected"
            )
        })?;

        self.grid = grid;
        debug!(
            target: "inventory::grid",
            placements = snapshot.placements.len(),
            "restored inventory"
        );
        self.emit(InventoryChange::Restored);
        Ok(())
    }
}

fn build_grid(
    snapshot: &InventorySnapshot,
    width: u32,
    height: u32,
) -> Result<SlotGrid, InventoryError> {
    if (snapshot.width, snapshot.height) != (width, height) {
        return Err(InventoryError::SnapshotMismatch {
            reason: format!(
                "snapshot is {}x{}, inventory is {width}x{height}",
                snapshot.width, snapshot.height
            ),
        });
    }

    let mut grid = SlotGrid::new(width, height);
    for &(origin, item) in &snapshot.placements {
        if item.quantity == 0 || item.quantity > item.max_stack {
            return Err(InventoryError::SnapshotMismatch {
                reason: format!("{} at {origin} has quantity {}", item.handle, item.quantity),
            });
        }
        grid.check_area(item.footprint, origin, None)
            .map_err(|error| InventoryError::SnapshotMismatch {
                reason: format!("{} at {origin}: {error}", item.handle),
            })?;
        grid.stamp(item.footprint, origin, Slot::Origin(item), Slot::Covered { origin });
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::env::{ItemCategory, ItemDefinition};
    use crate::state::{Footprint, ItemHandle};

    fn filled() -> GridInventory {
        let mut inventory = GridInventory::default();
        let rifle = ItemDefinition::single(ItemHandle(1), ItemCategory::Weapon, 2, 4);
        let stim = ItemDefinition::new(ItemHandle(2), ItemCategory::Consumable, Footprint::UNIT, 3);
        inventory.place_at(&rifle, Position::new(6, 2), 1).unwrap();
        inventory.place_at(&stim, Position::new(0, 0), 2).unwrap();
        inventory
    }

    #[test]
    fn restore_reproduces_snapshot() {
        let source = filled();
        let snapshot = source.snapshot();
        assert_eq!(snapshot.placements.len(), 2);
        assert_eq!(snapshot.placements[0].0, Position::ORIGIN);

        let mut target = GridInventory::default();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        target.subscribe(move |change: &InventoryChange, _grid: &SlotGrid| {
            sink.borrow_mut().push(change.clone());
        });

        target.restore(&snapshot).unwrap();
        assert_eq!(target.grid(), source.grid());
        assert_eq!(*log.borrow(), vec![InventoryChange::Restored]);
    }

    #[test]
    fn restore_rejects_inconsistent_snapshots() {
        let mut inventory = filled();
        let before = inventory.grid().clone();

        let mut wrong_size = inventory.snapshot();
        wrong_size.width = 10;
        assert!(matches!(
            inventory.restore(&wrong_size),
            Err(InventoryError::SnapshotMismatch { .. })
        ));

        let mut overlapping = inventory.snapshot();
        overlapping.placements.push((
            Position::new(7, 3),
            PlacedItem::new(ItemHandle(3), Footprint::UNIT, 1, 1),
        ));
        assert!(matches!(
            inventory.restore(&overlapping),
            Err(InventoryError::SnapshotMismatch { .. })
        ));

        let mut bad_quantity = inventory.snapshot();
        bad_quantity.placements[0].1.quantity = 4;
        assert!(inventory.restore(&bad_quantity).is_err());

        assert_eq!(inventory.grid(), &before);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn snapshot_bytes_decode_to_same_snapshot() {
        let snapshot = filled().snapshot();
        let bytes = snapshot.to_bytes().unwrap();
        assert_eq!(InventorySnapshot::from_bytes(&bytes).unwrap(), snapshot);
    }
}
