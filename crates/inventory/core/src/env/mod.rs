//! Traits describing read-only item data.
//!
//! The inventory is handed item descriptors by a caller-owned catalog; it
//! never resolves or loads item data itself.
mod items;

pub use items::{ItemCategory, ItemDefinition, ItemOracle};
