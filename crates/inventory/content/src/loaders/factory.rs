//! Content factory for building inventories from data files.

use std::path::{Path, PathBuf};

use inventory_core::{GridInventory, InventoryConfig, ItemOracle};
use tracing::{debug, warn};

use crate::catalog::ItemCatalog;
use crate::loaders::{ConfigLoader, ItemLoader, LoadResult};

/// Content factory that loads inventory content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── items.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load inventory configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<InventoryConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load the item catalog from `items.ron`.
    pub fn load_catalog(&self) -> LoadResult<ItemCatalog> {
        let path = self.data_dir.join("items.ron");
        let catalog = ItemLoader::load_catalog(&path)?;
        debug!(
            target: "inventory::content",
            items = catalog.len(),
            path = %path.display(),
            "loaded item catalog"
        );
        Ok(catalog)
    }

    /// Builds an empty inventory sized by `config.toml`, together with the
    /// catalog that describes what can go into it.
    ///
    /// Items whose footprint can never fit the configured grid are kept in
    /// the catalog but logged, since every placement of them would fail.
    pub fn build_inventory(&self) -> LoadResult<(GridInventory, ItemCatalog)> {
        let config = self.load_config()?;
        let catalog = self.load_catalog()?;

        for definition in catalog.all_definitions() {
            let footprint = definition.footprint;
            if footprint.width > config.width || footprint.height > config.height {
                warn!(
                    target: "inventory::content",
                    item = %definition.handle,
                    footprint = %footprint,
                    width = config.width,
                    height = config.height,
                    "item can never fit the inventory grid"
                );
            }
        }

        let inventory = GridInventory::new(&config)
            .map_err(|e| anyhow::anyhow!("Failed to build inventory: {}", e))?;
        Ok((inventory, catalog))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
