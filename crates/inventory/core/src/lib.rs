//! Grid-based inventory placement engine.
//!
//! `inventory-core` owns a fixed-size grid of slots and places variable
//! footprint items (1x1 up to the grid bounds) onto it. All mutation flows
//! through [`inventory::GridInventory`], which raises a synchronous
//! [`events::InventoryChange`] notification after every successful call.
//! Item descriptors come from a caller-owned [`env::ItemOracle`]; the grid
//! only keeps the per-placement bookkeeping it needs.
pub mod config;
pub mod env;
pub mod error;
pub mod events;
pub mod inventory;
pub mod state;

pub use config::InventoryConfig;
pub use env::{ItemCategory, ItemDefinition, ItemOracle};
pub use error::{CoreError, ErrorContext, ErrorSeverity};
pub use events::{ChangeKinds, InventoryChange, InventoryObserver, ObserverId, ObserverRegistry};
pub use inventory::{GridInventory, InventorySnapshot, PickupOutcome};
pub use state::{
    Footprint, InvariantViolation, InventoryError, ItemHandle, PlacedItem, Position, Slot,
    SlotGrid,
};
