//! Placement, removal, movement and auto-placement.

use tracing::{debug, trace};

use super::GridInventory;
use crate::env::ItemDefinition;
use crate::events::InventoryChange;
use crate::state::{Footprint, InventoryError, PlacedItem, Position};

impl GridInventory {
    /// Checks whether a `footprint` item could be placed with its origin at
    /// `position`: in bounds and not overlapping any placed item. Pure.
    pub fn check_placement(
        &self,
        footprint: Footprint,
        position: Position,
    ) -> Result<(), InventoryError> {
        self.grid.check_area(footprint, position, None)
    }

    pub fn can_place_at(&self, item: &ItemDefinition, position: Position) -> bool {
        self.check_placement(item.footprint, position).is_ok()
    }

    /// Places a fresh stack of `quantity` copies of `item` with its origin at
    /// `position`. Never merges into an existing stack; see
    /// [`GridInventory::add_to_stack_at`] for that.
    pub fn place_at(
        &mut self,
        item: &ItemDefinition,
        position: Position,
        quantity: u16,
    ) -> Result<(), InventoryError> {
        check_quantity(item, quantity)
            .and_then(|()| self.check_placement(item.footprint, position))
            .inspect_err(|error| {
                trace!(
                    target: "inventory::grid",
                    item = %item.handle,
                    position = %position,
                    error = %error,
                    "placement rejected"
                )
            })?;

        self.insert(position, PlacedItem::from_definition(item, quantity));
        Ok(())
    }

    /// Removes the item covering `position` (any of its cells) and returns it.
    pub fn remove_at(&mut self, position: Position) -> Result<PlacedItem, InventoryError> {
        let (origin, item) = self.resolve(position)?;
        self.erase(origin, &item);

        debug!(
            target: "inventory::grid",
            item = %item.handle,
            origin = %origin,
            quantity = item.quantity,
            "removed item"
        );
        self.emit(InventoryChange::Removed { origin, item });
        Ok(item)
    }

    /// First origin, scanning rows top to bottom and columns left to right,
    /// at which a `footprint` item fits. Pure.
    pub fn find_free_position(&self, footprint: Footprint) -> Option<Position> {
        if !footprint.is_valid() {
            return None;
        }
        let (width, height) = (self.grid.width() as i32, self.grid.height() as i32);
        (0..height)
            .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
            .find(|&origin| self.check_placement(footprint, origin).is_ok())
    }

    /// Places `item` at the first free position in row-major order.
    pub fn auto_place_item(
        &mut self,
        item: &ItemDefinition,
        quantity: u16,
    ) -> Result<Position, InventoryError> {
        check_footprint(item)?;
        check_quantity(item, quantity)?;

        let Some(origin) = self.find_free_position(item.footprint) else {
            trace!(
                target: "inventory::grid",
                item = %item.handle,
                footprint = %item.footprint,
                "no space for item"
            );
            return Err(InventoryError::NoSpace {
                footprint: item.footprint,
            });
        };

        self.insert(origin, PlacedItem::from_definition(item, quantity));
        Ok(origin)
    }

    /// Moves the item covering `from` so that its origin lands on `to`,
    /// keeping footprint and quantity. Returns the new origin.
    ///
    /// The item's own current cells do not count as collisions, so it can be
    /// shifted by less than its own size. On failure nothing changes.
    pub fn move_item(&mut self, from: Position, to: Position) -> Result<Position, InventoryError> {
        let (origin, item) = self.resolve(from)?;
        self.grid
            .check_area(item.footprint, to, Some(origin))
            .inspect_err(|error| {
                trace!(
                    target: "inventory::grid",
                    item = %item.handle,
                    from = %origin,
                    to = %to,
                    error = %error,
                    "move rejected"
                )
            })?;

        self.erase(origin, &item);
        self.stamp(to, item);

        debug!(
            target: "inventory::grid",
            item = %item.handle,
            from = %origin,
            to = %to,
            "moved item"
        );
        self.emit(InventoryChange::Moved {
            from: origin,
            to,
            item,
        });
        Ok(to)
    }

    /// Writes an already validated placement and notifies observers.
    pub(super) fn insert(&mut self, origin: Position, item: PlacedItem) {
        self.stamp(origin, item);
        debug!(
            target: "inventory::grid",
            item = %item.handle,
            origin = %origin,
            footprint = %item.footprint,
            quantity = item.quantity,
            "placed item"
        );
        self.emit(InventoryChange::Placed { origin, item });
    }
}

pub(super) fn check_footprint(item: &ItemDefinition) -> Result<(), InventoryError> {
    if item.footprint.is_valid() {
        Ok(())
    } else {
        Err(InventoryError::InvalidFootprint {
            footprint: item.footprint,
        })
    }
}

pub(super) fn check_quantity(item: &ItemDefinition, quantity: u16) -> Result<(), InventoryError> {
    if quantity == 0 || quantity > item.max_stack {
        return Err(InventoryError::InvalidQuantity {
            quantity,
            max_stack: item.max_stack,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ItemCategory;
    use crate::state::ItemHandle;

    fn item(handle: u32, width: u32, height: u32) -> ItemDefinition {
        ItemDefinition::single(ItemHandle(handle), ItemCategory::Utility, width, height)
    }

    #[test]
    fn place_rejects_collisions_with_first_colliding_cell() {
        let mut inventory = GridInventory::default();
        inventory.place_at(&item(1, 2, 2), Position::new(2, 2), 1).unwrap();

        let error = inventory
            .place_at(&item(2, 2, 2), Position::new(1, 1), 1)
            .unwrap_err();
        assert_eq!(
            error,
            InventoryError::Collision {
                cell: Position::new(2, 2),
                occupant: Position::new(2, 2),
            }
        );
        assert!(inventory.can_place_at(&item(2, 2, 2), Position::new(0, 0)));
    }

    #[test]
    fn place_rejects_bad_quantities_without_mutation() {
        let mut inventory = GridInventory::default();
        let ammo = ItemDefinition::new(ItemHandle(9), ItemCategory::Ammo, Footprint::UNIT, 60);

        assert!(matches!(
            inventory.place_at(&ammo, Position::ORIGIN, 0),
            Err(InventoryError::InvalidQuantity { quantity: 0, .. })
        ));
        assert!(matches!(
            inventory.place_at(&ammo, Position::ORIGIN, 61),
            Err(InventoryError::InvalidQuantity { quantity: 61, .. })
        ));
        assert!(inventory.is_empty());
        inventory.place_at(&ammo, Position::ORIGIN, 60).unwrap();
        assert_eq!(inventory.stack_count_at(Position::ORIGIN), 60);
    }

    #[test]
    fn remove_from_any_covered_cell_clears_whole_footprint() {
        let mut inventory = GridInventory::default();
        inventory.place_at(&item(1, 2, 4), Position::new(3, 1), 1).unwrap();

        let removed = inventory.remove_at(Position::new(4, 4)).unwrap();
        assert_eq!(removed.handle, ItemHandle(1));
        assert!(inventory.is_empty());
        assert_eq!(
            inventory.remove_at(Position::new(4, 4)),
            Err(InventoryError::NotFound {
                position: Position::new(4, 4)
            })
        );
    }

    #[test]
    fn auto_place_rejects_zero_sized_footprint() {
        let mut inventory = GridInventory::default();
        assert_eq!(
            inventory.auto_place_item(&item(1, 0, 2), 1),
            Err(InventoryError::InvalidFootprint {
                footprint: Footprint::new(0, 2)
            })
        );
        assert_eq!(inventory.find_free_position(Footprint::new(0, 2)), None);
    }

    #[test]
    fn auto_place_fills_gaps_row_major() {
        let mut inventory = GridInventory::with_dimensions(4, 3).unwrap();
        inventory.place_at(&item(1, 1, 1), Position::new(0, 0), 1).unwrap();
        inventory.place_at(&item(2, 1, 1), Position::new(3, 0), 1).unwrap();

        // 2x1 fits the gap between the two 1x1 items
        assert_eq!(
            inventory.auto_place_item(&item(3, 2, 1), 1),
            Ok(Position::new(1, 0))
        );
        assert_eq!(
            inventory.auto_place_item(&item(4, 3, 2), 1),
            Ok(Position::new(0, 1))
        );
        assert_eq!(
            inventory.auto_place_item(&item(5, 2, 1), 1),
            Err(InventoryError::NoSpace {
                footprint: Footprint::new(2, 1)
            })
        );
        assert_eq!(
            inventory.auto_place_item(&item(6, 1, 1), 1),
            Ok(Position::new(3, 1))
        );
    }

    #[test]
    fn move_can_overlap_own_footprint() {
        let mut inventory = GridInventory::default();
        inventory.place_at(&item(1, 2, 2), Position::new(0, 0), 1).unwrap();

        assert_eq!(
            inventory.move_item(Position::new(1, 1), Position::new(1, 0)),
            Ok(Position::new(1, 0))
        );
        assert_eq!(inventory.find_origin(Position::new(2, 1)), Some(Position::new(1, 0)));
        assert_eq!(inventory.find_origin(Position::new(0, 0)), None);
        assert!(inventory.validate().is_ok());
    }

    #[test]
    fn move_rejects_out_of_bounds_and_missing_source() {
        let mut inventory = GridInventory::default();
        inventory.place_at(&item(1, 2, 4), Position::new(0, 0), 1).unwrap();
        let before = inventory.grid().clone();

        assert!(matches!(
            inventory.move_item(Position::ORIGIN, Position::new(7, 0)),
            Err(InventoryError::OutOfBounds { .. })
        ));
        assert_eq!(
            inventory.move_item(Position::new(5, 5), Position::ORIGIN),
            Err(InventoryError::NotFound {
                position: Position::new(5, 5)
            })
        );
        assert_eq!(inventory.grid(), &before);
    }

    #[test]
    fn move_to_same_origin_is_allowed() {
        let mut inventory = GridInventory::default();
        inventory.place_at(&item(1, 2, 2), Position::new(4, 2), 1).unwrap();
        let before = inventory.grid().clone();

        assert_eq!(
            inventory.move_item(Position::new(5, 3), Position::new(4, 2)),
            Ok(Position::new(4, 2))
        );
        assert_eq!(inventory.grid(), &before);
    }
}
