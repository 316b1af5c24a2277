//! Change notifications raised after successful inventory mutations.
//!
//! Observers are invoked synchronously, in priority order, once the mutation
//! has fully completed. They receive a shared view of the grid so a UI can
//! redraw straight away; because the inventory is mutably borrowed for the
//! duration of the call, an observer cannot re-enter a mutating operation.

use bitflags::bitflags;
use tracing::trace;

use crate::state::{PlacedItem, Position, SlotGrid};

bitflags! {
    /// Classes of change an observer can subscribe to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ChangeKinds: u8 {
        const PLACED  = 1 << 0;
        const REMOVED = 1 << 1;
        const STACK   = 1 << 2;
        const MOVED   = 1 << 3;
        const RESET   = 1 << 4;
    }
}

/// Describes one successful mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryChange {
    /// A fresh placement was created.
    Placed { origin: Position, item: PlacedItem },

    /// An item was removed, explicitly or because its stack reached zero.
    Removed { origin: Position, item: PlacedItem },

    /// Quantity changed in place; footprint untouched.
    StackChanged {
        origin: Position,
        item: PlacedItem,
        previous: u16,
    },

    /// An item moved to a new origin with footprint and quantity preserved.
    Moved {
        from: Position,
        to: Position,
        item: PlacedItem,
    },

    /// Every item was removed at once.
    Cleared { removed: usize },

    /// The grid was replaced wholesale from a snapshot.
    Restored,
}

impl InventoryChange {
    pub fn kind(&self) -> ChangeKinds {
        match self {
            Self::Placed { .. } => ChangeKinds::PLACED,
            Self::Removed { .. } => ChangeKinds::REMOVED,
            Self::StackChanged { .. } => ChangeKinds::STACK,
            Self::Moved { .. } => ChangeKinds::MOVED,
            Self::Cleared { .. } | Self::Restored => ChangeKinds::RESET,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Placed { .. } => "placed",
            Self::Removed { .. } => "removed",
            Self::StackChanged { .. } => "stack_changed",
            Self::Moved { .. } => "moved",
            Self::Cleared { .. } => "cleared",
            Self::Restored => "restored",
        }
    }
}

/// Receives inventory change notifications.
///
/// Closures of the form `FnMut(&InventoryChange, &SlotGrid)` are observers.
pub trait InventoryObserver {
    /// Returns the priority of this observer. Lower values are notified first.
    fn priority(&self) -> i32 {
        0
    }

    /// Change classes this observer wants to hear about.
    fn interests(&self) -> ChangeKinds {
        ChangeKinds::all()
    }

    fn on_change(&mut self, change: &InventoryChange, grid: &SlotGrid);
}

impl<F> InventoryObserver for F
where
    F: FnMut(&InventoryChange, &SlotGrid),
{
    fn on_change(&mut self, change: &InventoryChange, grid: &SlotGrid) {
        self(change, grid)
    }
}

/// Handle returned by [`ObserverRegistry::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(u64);

struct Registration {
    id: ObserverId,
    priority: i32,
    interests: ChangeKinds,
    observer: Box<dyn InventoryObserver>,
}

/// Ordered list of observers.
///
/// Priority and interests are sampled once at subscription time; observers
/// with equal priority are notified in subscription order.
#[derive(Default)]
pub struct ObserverRegistry {
    registrations: Vec<Registration>,
    next_id: u64,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<O>(&mut self, observer: O) -> ObserverId
    where
        O: InventoryObserver + 'static,
    {
        let id = ObserverId(self.next_id);
        self.next_id += 1;

        let priority = observer.priority();
        let slot = self
            .registrations
            .partition_point(|registration| registration.priority <= priority);
        self.registrations.insert(
            slot,
            Registration {
                id,
                priority,
                interests: observer.interests(),
                observer: Box::new(observer),
            },
        );
        id
    }

    /// Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.registrations.len();
        self.registrations
            .retain(|registration| registration.id != id);
        self.registrations.len() != before
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub(crate) fn notify(&mut self, change: &InventoryChange, grid: &SlotGrid) {
        let kind = change.kind();
        trace!(
            target: "inventory::events",
            change = change.as_str(),
            observers = self.registrations.len(),
            "dispatching inventory change"
        );
        for registration in &mut self.registrations {
            if registration.interests.intersects(kind) {
                registration.observer.on_change(change, grid);
            }
        }
    }
}

impl core::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.registrations.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::state::{Footprint, ItemHandle};

    struct Recorder {
        name: &'static str,
        priority: i32,
        interests: ChangeKinds,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl InventoryObserver for Recorder {
        fn priority(&self) -> i32 {
            self.priority
        }

        fn interests(&self) -> ChangeKinds {
            self.interests
        }

        fn on_change(&mut self, _change: &InventoryChange, _grid: &SlotGrid) {
            self.log.borrow_mut().push(self.name);
        }
    }

    fn placed() -> InventoryChange {
        InventoryChange::Placed {
            origin: Position::ORIGIN,
            item: PlacedItem::new(ItemHandle(1), Footprint::UNIT, 1, 1),
        }
    }

    #[test]
    fn notifies_in_priority_then_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ObserverRegistry::new();
        for (name, priority) in [("late", 10), ("first", -5), ("second", 0), ("third", 0)] {
            registry.subscribe(Recorder {
                name,
                priority,
                interests: ChangeKinds::all(),
                log: Rc::clone(&log),
            });
        }

        registry.notify(&placed(), &SlotGrid::new(2, 2));
        assert_eq!(*log.borrow(), vec!["first", "second", "third", "late"]);
    }

    #[test]
    fn filters_by_interest_and_unsubscribes() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ObserverRegistry::new();
        registry.subscribe(Recorder {
            name: "moves",
            priority: 0,
            interests: ChangeKinds::MOVED,
            log: Rc::clone(&log),
        });
        let closure_log = Rc::clone(&log);
        let id = registry.subscribe(move |change: &InventoryChange, _grid: &SlotGrid| {
            closure_log.borrow_mut().push(change.as_str());
        });

        registry.notify(&placed(), &SlotGrid::new(2, 2));
        assert_eq!(*log.borrow(), vec!["placed"]);

        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id));
        registry.notify(&placed(), &SlotGrid::new(2, 2));
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(registry.len(), 1);
    }
}
