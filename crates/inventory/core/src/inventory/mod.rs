//! Grid inventory manager.
//!
//! [`GridInventory`] owns the slot grid and is the only thing that mutates it.
//! Every mutating call is all-or-nothing: on error the grid is untouched and
//! no notification fires; on success exactly one notification fires per
//! logical change, after the grid is consistent again.
mod placement;
mod snapshot;
mod stacking;

pub use snapshot::InventorySnapshot;
pub use stacking::PickupOutcome;

use tracing::debug;

use crate::config::InventoryConfig;
use crate::events::{InventoryChange, InventoryObserver, ObserverId, ObserverRegistry};
use crate::state::{
    InvariantViolation, InventoryError, ItemHandle, PlacedItem, Position, Slot, SlotGrid,
};

/// Fixed-size grid inventory of variable-footprint items.
#[derive(Debug)]
pub struct GridInventory {
    grid: SlotGrid,
    observers: ObserverRegistry,
}

impl GridInventory {
    /// Creates an empty inventory sized by `config`.
    pub fn new(config: &InventoryConfig) -> Result<Self, InventoryError> {
        config.validate()?;
        Ok(Self {
            grid: SlotGrid::new(config.width, config.height),
            observers: ObserverRegistry::new(),
        })
    }

    pub fn with_dimensions(width: u32, height: u32) -> Result<Self, InventoryError> {
        Self::new(&InventoryConfig::with_dimensions(width, height))
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Read-only view of every slot, for renderers.
    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    pub fn slot(&self, position: Position) -> Option<&Slot> {
        self.grid.get(position)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Resolves the origin of the item covering `position` in O(1).
    pub fn find_origin(&self, position: Position) -> Option<Position> {
        self.grid.owner(position)
    }

    /// Item covering `position`, resolved through its origin.
    pub fn item_at(&self, position: Position) -> Option<&PlacedItem> {
        let origin = self.find_origin(position)?;
        self.grid.get(origin)?.item()
    }

    /// Stack quantity of the item covering `position`, 0 when unoccupied.
    pub fn stack_count_at(&self, position: Position) -> u16 {
        self.item_at(position).map_or(0, |item| item.quantity)
    }

    /// Every placed item with its origin, in row-major origin order.
    pub fn items(&self) -> impl Iterator<Item = (Position, &PlacedItem)> + '_ {
        self.grid
            .iter()
            .filter_map(|(position, slot)| slot.item().map(|item| (position, item)))
    }

    /// Total quantity of `handle` across all stacks.
    pub fn count_item(&self, handle: ItemHandle) -> u32 {
        self.items()
            .filter(|(_, item)| item.handle == handle)
            .map(|(_, item)| u32::from(item.quantity))
            .sum()
    }

    /// Origin of the first stack of `handle` in row-major order.
    pub fn find_item(&self, handle: ItemHandle) -> Option<Position> {
        self.items()
            .find(|(_, item)| item.handle == handle)
            .map(|(position, _)| position)
    }

    pub fn free_cells(&self) -> usize {
        self.grid.iter().filter(|(_, slot)| !slot.is_occupied()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.iter().all(|(_, slot)| !slot.is_occupied())
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    pub fn subscribe<O>(&mut self, observer: O) -> ObserverId
    where
        O: InventoryObserver + 'static,
    {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ------------------------------------------------------------------
    // Whole-grid operations
    // ------------------------------------------------------------------

    /// Removes every item. Returns how many placements were removed; an
    /// already empty inventory is left alone and raises no notification.
    pub fn clear(&mut self) -> usize {
        let removed = self.items().count();
        if removed == 0 {
            return 0;
        }
        self.grid.reset();
        debug!(target: "inventory::grid", removed, "cleared inventory");
        self.emit(InventoryChange::Cleared { removed });
        removed
    }

    /// Checks the origin/covered-cell bookkeeping of the whole grid.
    ///
    /// Every covered cell must point at an origin whose footprint includes
    /// it, every footprint cell must point back at its origin, and every
    /// quantity must lie in `1..=max_stack`.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        validate_grid(&self.grid)
    }

    // ------------------------------------------------------------------
    // Internal bookkeeping
    // ------------------------------------------------------------------

    fn stamp(&mut self, origin: Position, item: PlacedItem) {
        self.grid
            .stamp(item.footprint, origin, Slot::Origin(item), Slot::Covered { origin });
    }

    fn erase(&mut self, origin: Position, item: &PlacedItem) {
        self.grid
            .stamp(item.footprint, origin, Slot::Empty, Slot::Empty);
    }

    /// Copy of the item stored at an origin cell.
    fn placed_at(&self, origin: Position) -> Option<PlacedItem> {
        self.grid.get(origin)?.item().copied()
    }

    /// Origin and item covering `position`, or `NotFound`.
    fn resolve(&self, position: Position) -> Result<(Position, PlacedItem), InventoryError> {
        self.find_origin(position)
            .and_then(|origin| Some((origin, self.placed_at(origin)?)))
            .ok_or(InventoryError::NotFound { position })
    }

    fn emit(&mut self, change: InventoryChange) {
        self.observers.notify(&change, &self.grid);
    }
}

impl Default for GridInventory {
    fn default() -> Self {
        Self {
            grid: SlotGrid::new(InventoryConfig::DEFAULT_WIDTH, InventoryConfig::DEFAULT_HEIGHT),
            observers: ObserverRegistry::new(),
        }
    }
}

pub(crate) fn validate_grid(grid: &SlotGrid) -> Result<(), InvariantViolation> {
    for (cell, slot) in grid.iter() {
        match *slot {
            Slot::Empty => {}
            Slot::Origin(item) => {
                if !grid.fits(item.footprint, cell) {
                    return Err(InvariantViolation::FootprintOutOfBounds { origin: cell });
                }
                if item.quantity == 0 || item.quantity > item.max_stack {
                    return Err(InvariantViolation::BadQuantity {
                        origin: cell,
                        quantity: item.quantity,
                    });
                }
                for covered in item.footprint.cells(cell).skip(1) {
                    if grid.get(covered) != Some(&Slot::Covered { origin: cell }) {
                        return Err(InvariantViolation::UnclaimedCell {
                            origin: cell,
                            cell: covered,
                        });
                    }
                }
            }
            Slot::Covered { origin } => match grid.get(origin) {
                Some(Slot::Origin(item)) if item.footprint.covers(origin, cell) => {}
                Some(Slot::Origin(_)) => {
                    return Err(InvariantViolation::OutsideFootprint { cell, origin });
                }
                _ => return Err(InvariantViolation::DanglingOrigin { cell, origin }),
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ItemCategory, ItemDefinition};
    use crate::state::Footprint;

    fn medkit() -> ItemDefinition {
        ItemDefinition::new(ItemHandle(3), ItemCategory::Consumable, Footprint::UNIT, 5)
    }

    #[test]
    fn rejects_invalid_dimensions() {
        assert_eq!(
            GridInventory::with_dimensions(0, 4).unwrap_err(),
            InventoryError::InvalidDimensions {
                width: 0,
                height: 4
            }
        );
    }

    #[test]
    fn queries_resolve_through_origin() {
        let mut inventory = GridInventory::default();
        let rifle = ItemDefinition::single(ItemHandle(1), ItemCategory::Weapon, 2, 4);
        inventory.place_at(&rifle, Position::new(2, 1), 1).unwrap();
        inventory.place_at(&medkit(), Position::new(0, 0), 3).unwrap();
        inventory.place_at(&medkit(), Position::new(7, 5), 2).unwrap();

        assert_eq!(inventory.find_origin(Position::new(3, 4)), Some(Position::new(2, 1)));
        assert_eq!(inventory.item_at(Position::new(3, 4)).unwrap().handle, ItemHandle(1));
        assert_eq!(inventory.stack_count_at(Position::new(7, 5)), 2);
        assert_eq!(inventory.stack_count_at(Position::new(9, 9)), 0);
        assert_eq!(inventory.count_item(ItemHandle(3)), 5);
        assert_eq!(inventory.find_item(ItemHandle(3)), Some(Position::ORIGIN));
        assert_eq!(inventory.free_cells(), 48 - 8 - 2);
        assert_eq!(inventory.items().count(), 3);
        assert!(inventory.validate().is_ok());
    }

    #[test]
    fn clear_notifies_only_when_something_was_removed() {
        use std::cell::Cell;
        use std::rc::Rc;

        let mut inventory = GridInventory::default();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        inventory.subscribe(move |change: &InventoryChange, _grid: &SlotGrid| {
            if matches!(change, InventoryChange::Cleared { .. }) {
                counter.set(counter.get() + 1);
            }
        });

        assert_eq!(inventory.clear(), 0);
        inventory.place_at(&medkit(), Position::new(1, 1), 1).unwrap();
        assert_eq!(inventory.clear(), 1);
        assert!(inventory.is_empty());
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn validate_detects_corrupted_bookkeeping() {
        let mut grid = SlotGrid::new(4, 4);
        let origin = Position::new(1, 1);
        let item = PlacedItem::new(ItemHandle(1), Footprint::new(2, 2), 1, 1);
        grid.stamp(item.footprint, origin, Slot::Origin(item), Slot::Covered { origin });
        assert!(validate_grid(&grid).is_ok());

        *grid.get_mut(Position::new(2, 2)).unwrap() = Slot::Empty;
        assert_eq!(
            validate_grid(&grid),
            Err(InvariantViolation::UnclaimedCell {
                origin,
                cell: Position::new(2, 2)
            })
        );

        *grid.get_mut(Position::new(2, 2)).unwrap() = Slot::Covered {
            origin: Position::new(0, 0),
        };
        assert_eq!(
            validate_grid(&grid),
            Err(InvariantViolation::UnclaimedCell {
                origin,
                cell: Position::new(2, 2)
            })
        );

        let mut orphan = SlotGrid::new(2, 2);
        *orphan.get_mut(Position::new(1, 1)).unwrap() = Slot::Covered {
            origin: Position::ORIGIN,
        };
        assert_eq!(
            validate_grid(&orphan),
            Err(InvariantViolation::DanglingOrigin {
                cell: Position::new(1, 1),
                origin: Position::ORIGIN
            })
        );
    }
}
