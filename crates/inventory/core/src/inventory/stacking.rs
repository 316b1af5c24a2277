//! Stack quantity bookkeeping: consumption, explicit merging and pickup.

use tracing::{debug, trace};

use super::GridInventory;
use super::placement::check_footprint;
use crate::env::ItemDefinition;
use crate::events::InventoryChange;
use crate::state::{InventoryError, PlacedItem, Position};

/// Where a picked up quantity ended up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PickupOutcome {
    /// Amount merged into stacks that were already in the inventory.
    pub merged: u16,
    /// Origins of newly created stacks, in placement order.
    pub placed: Vec<Position>,
    /// Amount that did not fit anywhere.
    pub leftover: u16,
}

impl PickupOutcome {
    pub fn is_complete(&self) -> bool {
        self.leftover == 0
    }
}

impl GridInventory {
    /// Consumes `amount` from the stack covering `position`.
    ///
    /// Amounts larger than the stack clamp to zero, and a stack that reaches
    /// zero is removed together with its whole footprint. Returns the
    /// remaining quantity.
    pub fn decrease_stack_at(
        &mut self,
        position: Position,
        amount: u16,
    ) -> Result<u16, InventoryError> {
        let (origin, item) = self.resolve(position)?;
        if amount == 0 {
            return Err(InventoryError::InvalidQuantity {
                quantity: amount,
                max_stack: item.max_stack,
            });
        }

        let remaining = item.quantity.saturating_sub(amount);
        if remaining == 0 {
            self.erase(origin, &item);
            debug!(
                target: "inventory::grid",
                item = %item.handle,
                origin = %origin,
                consumed = item.quantity,
                "stack depleted"
            );
            self.emit(InventoryChange::Removed { origin, item });
        } else {
            self.set_quantity(origin, item, remaining);
        }
        Ok(remaining)
    }

    /// Merges up to `amount` copies of `item` into the existing stack
    /// covering `position`, bounded by `max_stack`. Returns the leftover that
    /// did not fit.
    pub fn add_to_stack_at(
        &mut self,
        position: Position,
        item: &ItemDefinition,
        amount: u16,
    ) -> Result<u16, InventoryError> {
        let (origin, existing) = self.resolve(position)?;
        if amount == 0 {
            return Err(InventoryError::InvalidQuantity {
                quantity: amount,
                max_stack: existing.max_stack,
            });
        }
        if existing.handle != item.handle {
            return Err(InventoryError::ItemMismatch {
                existing: existing.handle,
                incoming: item.handle,
            });
        }
        let room = existing.room();
        if room == 0 {
            return Err(InventoryError::StackFull { position: origin });
        }

        let added = room.min(amount);
        self.set_quantity(origin, existing, existing.quantity + added);
        Ok(amount - added)
    }

    /// Stores `quantity` copies of `item` the way a pickup handler wants:
    /// top up existing stacks of the same item in row-major order, then
    /// auto-place new stacks of at most `max_stack` each.
    ///
    /// Fails with `NoSpace`, without touching the grid, only when nothing at
    /// all could be stored; partial pickups report a leftover instead.
    pub fn pick_up(
        &mut self,
        item: &ItemDefinition,
        quantity: u16,
    ) -> Result<PickupOutcome, InventoryError> {
        check_footprint(item)?;
        if quantity == 0 || item.max_stack == 0 {
            return Err(InventoryError::InvalidQuantity {
                quantity,
                max_stack: item.max_stack,
            });
        }

        let mut outcome = PickupOutcome {
            leftover: quantity,
            ..PickupOutcome::default()
        };

        if item.is_stackable() {
            let stacks: Vec<(Position, PlacedItem)> = self
                .items()
                .filter(|(_, placed)| placed.handle == item.handle && placed.room() > 0)
                .map(|(origin, placed)| (origin, *placed))
                .collect();
            for (origin, placed) in stacks {
                if outcome.leftover == 0 {
                    break;
                }
                let added = placed.room().min(outcome.leftover);
                self.set_quantity(origin, placed, placed.quantity + added);
                outcome.merged += added;
                outcome.leftover -= added;
            }
        }

        while outcome.leftover > 0 {
            let Some(origin) = self.find_free_position(item.footprint) else {
                break;
            };
            let chunk = outcome.leftover.min(item.max_stack);
            self.insert(origin, PlacedItem::from_definition(item, chunk));
            outcome.placed.push(origin);
            outcome.leftover -= chunk;
        }

        if outcome.leftover == quantity {
            trace!(
                target: "inventory::grid",
                item = %item.handle,
                quantity,
                "pickup found no room"
            );
            return Err(InventoryError::NoSpace {
                footprint: item.footprint,
            });
        }
        Ok(outcome)
    }

    fn set_quantity(&mut self, origin: Position, item: PlacedItem, quantity: u16) {
        let updated = PlacedItem { quantity, ..item };
        if let Some(slot) = self.grid.get_mut(origin).and_then(|slot| slot.item_mut()) {
            *slot = updated;
        }
        debug!(
            target: "inventory::grid",
            item = %item.handle,
            origin = %origin,
            previous = item.quantity,
            current = quantity,
            "stack changed"
        );
        self.emit(InventoryChange::StackChanged {
            origin,
            item: updated,
            previous: item.quantity,
        });
    }
}
