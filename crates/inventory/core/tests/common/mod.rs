#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use inventory_core::{
    Footprint, GridInventory, InventoryChange, ItemCategory, ItemDefinition, ItemHandle, SlotGrid,
};

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

pub fn unit(handle: u32) -> ItemDefinition {
    ItemDefinition::single(ItemHandle(handle), ItemCategory::Utility, 1, 1)
}

pub fn sized(handle: u32, width: u32, height: u32) -> ItemDefinition {
    ItemDefinition::single(ItemHandle(handle), ItemCategory::Weapon, width, height)
}

pub fn stackable(handle: u32, max_stack: u16) -> ItemDefinition {
    ItemDefinition::new(
        ItemHandle(handle),
        ItemCategory::Consumable,
        Footprint::UNIT,
        max_stack,
    )
}

/// Subscribes a recorder and returns the shared change log.
pub fn record(inventory: &mut GridInventory) -> Rc<RefCell<Vec<InventoryChange>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    inventory.subscribe(move |change: &InventoryChange, _grid: &SlotGrid| {
        sink.borrow_mut().push(change.clone());
    });
    log
}
