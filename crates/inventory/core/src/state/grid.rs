//! Flattened fixed-size slot storage.

use std::fmt;

use super::{Footprint, InventoryError, Position, Slot};

/// Fixed `width x height` array of slots, flattened to `index = y * width + x`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotGrid {
    width: u32,
    height: u32,
    slots: Vec<Slot>,
}

impl SlotGrid {
    /// Creates an empty grid. Dimensions are validated by the caller
    /// (see [`crate::InventoryConfig::validate`]).
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            slots: vec![Slot::Empty; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && i64::from(position.x) < i64::from(self.width)
            && i64::from(position.y) < i64::from(self.height)
    }

    /// Returns true if `footprint` anchored at `origin` stays inside the grid.
    ///
    /// Bounds only; occupancy is checked by the inventory.
    pub fn fits(&self, footprint: Footprint, origin: Position) -> bool {
        footprint.is_valid()
            && origin.x >= 0
            && origin.y >= 0
            && i64::from(origin.x) + i64::from(footprint.width) <= i64::from(self.width)
            && i64::from(origin.y) + i64::from(footprint.height) <= i64::from(self.height)
    }

    pub fn index_of(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }

    pub fn position_of(&self, index: usize) -> Option<Position> {
        (index < self.slots.len()).then(|| {
            let width = self.width as usize;
            Position::new((index % width) as i32, (index / width) as i32)
        })
    }

    pub fn get(&self, position: Position) -> Option<&Slot> {
        self.index_of(position).map(|index| &self.slots[index])
    }

    pub(crate) fn get_mut(&mut self, position: Position) -> Option<&mut Slot> {
        let index = self.index_of(position)?;
        Some(&mut self.slots[index])
    }

    /// Resolves the origin of the item covering `position`.
    ///
    /// Unoccupied or out-of-bounds cells resolve to `None`; an origin cell
    /// resolves to itself.
    pub fn owner(&self, position: Position) -> Option<Position> {
        match self.get(position)? {
            Slot::Empty => None,
            Slot::Origin(_) => Some(position),
            Slot::Covered { origin } => Some(*origin),
        }
    }

    /// Checks that `footprint` at `origin` is in bounds and that every cell it
    /// would cover is free. Cells owned by `ignore` count as free, which lets
    /// an item be checked against its own destination while still placed.
    pub(crate) fn check_area(
        &self,
        footprint: Footprint,
        origin: Position,
        ignore: Option<Position>,
    ) -> Result<(), InventoryError> {
        if !footprint.is_valid() {
            return Err(InventoryError::InvalidFootprint { footprint });
        }
        if !self.fits(footprint, origin) {
            return Err(InventoryError::OutOfBounds {
                position: origin,
                footprint,
            });
        }
        for cell in footprint.cells(origin) {
            if let Some(occupant) = self.owner(cell) {
                if Some(occupant) != ignore {
                    return Err(InventoryError::Collision { cell, occupant });
                }
            }
        }
        Ok(())
    }

    /// Overwrites every in-bounds cell of `footprint` at `origin` with `slot`,
    /// except the origin cell itself which receives `origin_slot`.
    pub(crate) fn stamp(
        &mut self,
        footprint: Footprint,
        origin: Position,
        origin_slot: Slot,
        slot: Slot,
    ) {
        for cell in footprint.cells(origin) {
            if let Some(target) = self.get_mut(cell) {
                *target = if cell == origin { origin_slot } else { slot };
            }
        }
    }

    /// Iterates all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Slot)> + '_ {
        let width = self.width as usize;
        self.slots
            .iter()
            .enumerate()
            .map(move |(index, slot)| {
                (
                    Position::new((index % width) as i32, (index / width) as i32),
                    slot,
                )
            })
    }

    pub(crate) fn reset(&mut self) {
        self.slots.fill(Slot::Empty);
    }
}

/// Debug rendering: `.` empty, `#` covered, one letter per origin (cycling
/// `A..Z`, in row-major origin order).
impl fmt::Display for SlotGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut labels = std::collections::HashMap::new();
        for (position, slot) in self.iter() {
            if slot.is_origin() {
                let label = (b'A' + (labels.len() % 26) as u8) as char;
                labels.insert(position, label);
            }
        }

        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let position = Position::new(x, y);
                let ch = match self.get(position) {
                    Some(Slot::Origin(_)) => labels.get(&position).copied().unwrap_or('?'),
                    Some(Slot::Covered { origin }) => {
                        labels.get(origin).map_or('#', |label| label.to_ascii_lowercase())
                    }
                    _ => '.',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
