//! Substitute collaborators for block-entity tests.

use milldustry_core::ItemType;
use milldustry_world::{BlockChange, ChangeKind, ChangeSink, FuelRegistry};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// Fuel registry backed by an explicit item set.
#[derive(Debug, Clone, Default)]
pub struct FixedFuelRegistry {
    fuels: BTreeSet<ItemType>,
}

impl FixedFuelRegistry {
    /// Registry accepting exactly `fuels`.
    pub fn new(fuels: impl IntoIterator<Item = ItemType>) -> Self {
        Self {
            fuels: fuels.into_iter().collect(),
        }
    }
}

impl FuelRegistry for FixedFuelRegistry {
    fn is_fuel(&self, item: ItemType) -> bool {
        self.fuels.contains(&item)
    }
}

/// Change sink that keeps every notification for later inspection.
///
/// Clones share the same log, so one clone can be handed to the block entity
/// while the test keeps another.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    log: Arc<Mutex<Vec<BlockChange>>>,
}

impl RecordingSink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<BlockChange>> {
        // A panicking test thread must not hide the log from the others.
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of notifications received so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Kinds of every recorded notification, in delivery order.
    pub fn kinds(&self) -> Vec<ChangeKind> {
        self.lock().iter().map(|c| c.kind).collect()
    }

    /// Most recent notification.
    pub fn last(&self) -> Option<BlockChange> {
        self.lock().last().cloned()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<BlockChange> {
        std::mem::take(&mut *self.lock())
    }
}

impl ChangeSink for RecordingSink {
    fn notify_changed(&mut self, change: BlockChange) {
        self.lock().push(change);
    }
}
