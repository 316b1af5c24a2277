use crate::state::{Footprint, ItemHandle};

/// Item descriptor provider.
///
/// The inventory trusts whatever the oracle returns; validation of catalog
/// data happens when the catalog is built.
pub trait ItemOracle {
    fn definition(&self, handle: ItemHandle) -> Option<ItemDefinition>;

    /// Returns all item definitions available in this oracle.
    fn all_definitions(&self) -> Vec<ItemDefinition>;
}

/// Item descriptor handed to placement operations.
///
/// # Stacking
///
/// All items have a `max_stack` value:
/// - Weapons/Armor: max_stack=1 (cannot stack)
/// - Consumables/Ammo: stackable up to the catalog value
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub handle: ItemHandle,
    pub category: ItemCategory,
    pub footprint: Footprint,
    pub max_stack: u16,
}

impl ItemDefinition {
    pub fn new(
        handle: ItemHandle,
        category: ItemCategory,
        footprint: Footprint,
        max_stack: u16,
    ) -> Self {
        Self {
            handle,
            category,
            footprint,
            max_stack,
        }
    }

    /// Shorthand for a non-stackable item of the given size.
    pub fn single(handle: ItemHandle, category: ItemCategory, width: u32, height: u32) -> Self {
        Self::new(handle, category, Footprint::new(width, height), 1)
    }

    pub fn is_stackable(&self) -> bool {
        self.max_stack > 1
    }

    /// Returns true if the descriptor can ever be placed.
    pub fn is_valid(&self) -> bool {
        self.footprint.is_valid() && self.max_stack >= 1
    }
}

/// Broad item classes, used by UI filtering and catalog files.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemCategory {
    /// Firearms and melee weapons
    Weapon,
    /// Armor plates, helmets
    Armor,
    /// Medkits, food, stims
    Consumable,
    /// Magazines and loose rounds
    Ammo,
    /// Keycards
    Key,
    /// Anything else
    #[default]
    Utility,
}
