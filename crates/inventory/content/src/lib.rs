//! Data-driven item and inventory content.
//!
//! This crate turns data files into the types `inventory-core` consumes:
//! - Item catalogs (data-driven via RON), exposed through [`ItemCatalog`]
//! - Inventory configuration (data-driven via TOML)
//!
//! Content is consumed by whoever owns the inventory and never appears in
//! grid state; the grid only stores item handles.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{CatalogError, ItemCatalog};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, ItemLoader};
