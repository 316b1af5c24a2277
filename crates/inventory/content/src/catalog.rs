//! In-memory item catalog backing [`ItemOracle`].

use std::collections::HashMap;

use inventory_core::{
    CoreError, ErrorContext, ErrorSeverity, ItemDefinition, ItemHandle, ItemOracle,
};

/// Errors raised while assembling a catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Two definitions share a handle.
    #[error("duplicate item handle {handle}")]
    DuplicateHandle { handle: ItemHandle },

    /// Zero-sized footprint or zero max stack.
    #[error("item {handle} has an invalid descriptor")]
    InvalidDefinition { handle: ItemHandle },
}

impl CoreError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn context(&self) -> Option<ErrorContext> {
        let handle = match self {
            Self::DuplicateHandle { handle } | Self::InvalidDefinition { handle } => *handle,
        };
        Some(ErrorContext::new().with_item(handle))
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateHandle { .. } => "CATALOG_DUPLICATE_HANDLE",
            Self::InvalidDefinition { .. } => "CATALOG_INVALID_DEFINITION",
        }
    }
}

/// Caller-owned item catalog keyed by handle.
#[derive(Clone, Debug, Default)]
pub struct ItemCatalog {
    definitions: HashMap<ItemHandle, ItemDefinition>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog, rejecting duplicate handles and descriptors that
    /// could never be placed.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = ItemDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.insert(definition)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, definition: ItemDefinition) -> Result<(), CatalogError> {
        let handle = definition.handle;
        if !definition.is_valid() {
            return Err(CatalogError::InvalidDefinition { handle });
        }
        if self.definitions.contains_key(&handle) {
            return Err(CatalogError::DuplicateHandle { handle });
        }
        self.definitions.insert(handle, definition);
        Ok(())
    }

    pub fn get(&self, handle: ItemHandle) -> Option<&ItemDefinition> {
        self.definitions.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl ItemOracle for ItemCatalog {
    fn definition(&self, handle: ItemHandle) -> Option<ItemDefinition> {
        self.get(handle).cloned()
    }

    /// Sorted by handle so callers see a stable order.
    fn all_definitions(&self) -> Vec<ItemDefinition> {
        let mut definitions: Vec<_> = self.definitions.values().cloned().collect();
        definitions.sort_by_key(|definition| definition.handle);
        definitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_core::{Footprint, ItemCategory};

    #[test]
    fn rejects_duplicates_and_invalid_descriptors() {
        let rifle = ItemDefinition::single(ItemHandle(1), ItemCategory::Weapon, 2, 4);
        assert_eq!(
            ItemCatalog::from_definitions([rifle.clone(), rifle.clone()]).unwrap_err(),
            CatalogError::DuplicateHandle {
                handle: ItemHandle(1)
            }
        );

        let broken = ItemDefinition::new(ItemHandle(2), ItemCategory::Ammo, Footprint::UNIT, 0);
        assert_eq!(
            ItemCatalog::from_definitions([broken]).unwrap_err(),
            CatalogError::InvalidDefinition {
                handle: ItemHandle(2)
            }
        );
    }

    #[test]
    fn oracle_lists_definitions_by_handle() {
        let catalog = ItemCatalog::from_definitions([
            ItemDefinition::single(ItemHandle(9), ItemCategory::Key, 1, 1),
            ItemDefinition::single(ItemHandle(3), ItemCategory::Armor, 2, 2),
        ])
        .unwrap();

        let handles: Vec<_> = catalog
            .all_definitions()
            .into_iter()
            .map(|definition| definition.handle)
            .collect();
        assert_eq!(handles, vec![ItemHandle(3), ItemHandle(9)]);
        assert_eq!(
            catalog.definition(ItemHandle(3)).map(|d| d.footprint),
            Some(Footprint::new(2, 2))
        );
        assert!(catalog.definition(ItemHandle(4)).is_none());
    }
}
