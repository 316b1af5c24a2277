//! Item catalog loader.

use std::path::Path;

use inventory_core::ItemDefinition;
use serde::{Deserialize, Serialize};

use crate::catalog::ItemCatalog;
use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalogFile {
    pub items: Vec<ItemDefinition>,
}

/// Loader for item catalogs from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load raw item definitions from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing an `ItemCatalogFile`
    pub fn load(path: &Path) -> LoadResult<Vec<ItemDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Load and validate a catalog (no duplicate handles, placeable items).
    pub fn load_catalog(path: &Path) -> LoadResult<ItemCatalog> {
        let definitions = Self::load(path)?;
        ItemCatalog::from_definitions(definitions)
            .map_err(|e| anyhow::anyhow!("Invalid item catalog {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ItemDefinition>> {
        let catalog: ItemCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        Ok(catalog.items)
    }
}
