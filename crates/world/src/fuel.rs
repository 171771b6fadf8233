//! Fuel lookup.
//!
//! The mill only asks whether an item burns; burn durations are carried for
//! the processing collaborator and for parity with furnace tables.

use milldustry_core::ItemType;
use std::collections::BTreeMap;

/// Read-only fuel membership test.
pub trait FuelRegistry {
    /// Whether `item` is accepted as fuel.
    fn is_fuel(&self, item: ItemType) -> bool;
}

/// Burn duration for a fuel item.
#[derive(Debug, Clone, Copy)]
pub struct FuelValue {
    /// Item that burns.
    pub item: ItemType,
    /// Burn time in ticks.
    pub burn_ticks: u32,
}

/// Default fuel items and their burn times.
pub const FUEL_VALUES: &[FuelValue] = &[
    FuelValue {
        item: ItemType::Coal,
        burn_ticks: 1600,
    },
    FuelValue {
        item: ItemType::Charcoal,
        burn_ticks: 1600,
    },
    FuelValue {
        item: ItemType::OakLog,
        burn_ticks: 300,
    },
    FuelValue {
        item: ItemType::OakPlanks,
        burn_ticks: 300,
    },
    FuelValue {
        item: ItemType::Stick,
        burn_ticks: 100,
    },
    FuelValue {
        item: ItemType::LavaBucket,
        burn_ticks: 20000,
    },
];

/// Map of fuel items to burn durations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuelTable {
    entries: BTreeMap<ItemType, u32>,
}

impl Default for FuelTable {
    fn default() -> Self {
        Self::from_values(FUEL_VALUES)
    }
}

impl FuelTable {
    /// A table with no fuels at all.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Build a table from a list of values.
    pub fn from_values(values: &[FuelValue]) -> Self {
        Self {
            entries: values.iter().map(|v| (v.item, v.burn_ticks)).collect(),
        }
    }

    /// Add (or override) a fuel.
    pub fn with_fuel(mut self, item: ItemType, burn_ticks: u32) -> Self {
        self.entries.insert(item, burn_ticks);
        self
    }

    /// Burn time for `item`, if it is fuel.
    pub fn burn_ticks(&self, item: ItemType) -> Option<u32> {
        self.entries.get(&item).copied()
    }

    /// Number of registered fuels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no fuels are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FuelRegistry for FuelTable {
    fn is_fuel(&self, item: ItemType) -> bool {
        self.entries.contains_key(&item)
    }
}
