//! Per-controller inventory caching.
//!
//! Building an [`ActionInventory`] walks every handler of a controller, so it
//! happens once per controller identity and the result is shared for the life
//! of the process.
//!
//! ## Two tiers
//!
//! 1. **Single slot** - an `ArcSwapOption` holding one `(ControllerId, inventory)`
//!    pair. The usual deployment has one selector per controller, so the hot
//!    path is one atomic load and one id comparison, no hashing.
//! 2. **Identity store** - when the slot belongs to another controller the
//!    lookup goes to an [`InventoryStore`], a get-or-create map owned by
//!    whoever manages controller identities. [`ControllerRegistry`] is the
//!    default, a `DashMap` of per-identity `OnceCell`s.
//!
//! ## Races
//!
//! The slot is filled with compare-and-swap against empty. Two threads may
//! both build on first use; the loser drops its copy and returns the winner's.
//! Both copies are equivalent, so losing is not an error. In the identity
//! store the `OnceCell` makes concurrent first access for one identity build
//! exactly once, and the map shard lock is released before building, so one
//! controller's build never blocks another's.

use super::inventory::ActionInventory;
use crate::controller::ControllerMetadata;
use crate::ids::ControllerId;
use arc_swap::ArcSwapOption;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::debug;

/// Get-or-create-atomically storage for inventories keyed by controller identity.
pub trait InventoryStore: Send + Sync {
    /// Return the inventory for `id`, calling `build` at most once per identity.
    fn get_or_create(
        &self,
        id: ControllerId,
        build: &dyn Fn() -> Arc<ActionInventory>,
    ) -> Arc<ActionInventory>;
}

/// Default [`InventoryStore`]: one build-once cell per controller identity.
#[derive(Default)]
pub struct ControllerRegistry {
    cells: DashMap<ControllerId, Arc<OnceCell<Arc<ActionInventory>>>>,
}

impl ControllerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identities with a cell (built or being built).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Inventory for `id` if it has finished building.
    #[must_use]
    pub fn get(&self, id: ControllerId) -> Option<Arc<ActionInventory>> {
        self.cells
            .get(&id)
            .and_then(|cell| cell.value().get().map(Arc::clone))
    }

    fn cell(&self, id: ControllerId) -> Arc<OnceCell<Arc<ActionInventory>>> {
        if let Some(cell) = self.cells.get(&id) {
            return Arc::clone(cell.value());
        }
        Arc::clone(self.cells.entry(id).or_default().value())
    }
}

impl InventoryStore for ControllerRegistry {
    fn get_or_create(
        &self,
        id: ControllerId,
        build: &dyn Fn() -> Arc<ActionInventory>,
    ) -> Arc<ActionInventory> {
        // Shard guard is dropped inside `cell`; only this identity waits on the build.
        let cell = self.cell(id);
        Arc::clone(cell.get_or_init(build))
    }
}

struct SlotEntry {
    id: ControllerId,
    inventory: Arc<ActionInventory>,
}

/// Two-tier inventory cache, safe to share across request threads.
pub struct InventoryCache {
    slot: ArcSwapOption<SlotEntry>,
    store: Arc<dyn InventoryStore>,
}

impl Default for InventoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryCache {
    /// Cache backed by a private [`ControllerRegistry`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(Arc::new(ControllerRegistry::new()))
    }

    /// Cache delegating slot misses to a caller-owned identity store.
    #[must_use]
    pub fn with_store(store: Arc<dyn InventoryStore>) -> Self {
        Self {
            slot: ArcSwapOption::empty(),
            store,
        }
    }

    /// Identity currently occupying the fast slot.
    #[must_use]
    pub fn slot_owner(&self) -> Option<ControllerId> {
        self.slot.load_full().map(|entry| entry.id)
    }

    /// Inventory for `controller`, built on first use.
    #[must_use]
    pub fn get_or_build(&self, controller: &dyn ControllerMetadata) -> Arc<ActionInventory> {
        let id = controller.id();

        let slot_taken = {
            let current = self.slot.load();
            match &*current {
                Some(entry) if entry.id == id => return Arc::clone(&entry.inventory),
                Some(_) => true,
                None => false,
            }
        };
        if slot_taken {
            return self
                .store
                .get_or_create(id, &|| Arc::new(ActionInventory::build(controller)));
        }

        let inventory = Arc::new(ActionInventory::build(controller));
        let candidate = Arc::new(SlotEntry {
            id,
            inventory: Arc::clone(&inventory),
        });
        let previous = self
            .slot
            .compare_and_swap(&None::<Arc<SlotEntry>>, Some(candidate));

        match &*previous {
            None => {
                debug!(
                    controller = %controller.name(),
                    controller_id = %id,
                    "Inventory installed in fast slot"
                );
                inventory
            }
            Some(winner) if winner.id == id => {
                debug!(
                    controller = %controller.name(),
                    controller_id = %id,
                    "Lost inventory install race, using installed copy"
                );
                Arc::clone(&winner.inventory)
            }
            // Another controller took the slot meanwhile; hand our build to the store.
            Some(_) => self.store.get_or_create(id, &|| Arc::clone(&inventory)),
        }
    }
}
