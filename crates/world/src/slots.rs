//! Fixed-layout slot storage for the mill.
//!
//! Slot roles are static: index 0 holds fuel, index 1 holds the raw input and
//! indices 2-9 collect output. The store itself does no role checking; that
//! lives in [`crate::access`].

use crate::container::{check_slot, ContainerError};
use milldustry_core::ItemStack;
use tracing::debug;

/// Number of slots in a mill inventory.
pub const MILL_SLOT_COUNT: usize = 10;

/// Index of the fuel slot.
pub const FUEL_SLOT: usize = 0;

/// Index of the raw material slot.
pub const INPUT_SLOT: usize = 1;

/// Slots exposed to fuel loaders.
pub const FUEL_SLOTS: [usize; 1] = [FUEL_SLOT];

/// Slots exposed to feeders.
pub const INPUT_SLOTS: [usize; 1] = [INPUT_SLOT];

/// Slots exposed to collectors.
pub const OUTPUT_SLOTS: [usize; 8] = [2, 3, 4, 5, 6, 7, 8, 9];

/// What a slot is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotRole {
    /// Burnable items.
    Fuel,
    /// Material waiting to be milled.
    Input,
    /// Milled product.
    Output,
}

impl SlotRole {
    /// Role of `slot`, or `None` if the index is not a mill slot.
    pub fn of(slot: usize) -> Option<Self> {
        match slot {
            FUEL_SLOT => Some(SlotRole::Fuel),
            INPUT_SLOT => Some(SlotRole::Input),
            s if s < MILL_SLOT_COUNT => Some(SlotRole::Output),
            _ => None,
        }
    }

    /// Every slot index carrying this role.
    pub fn slots(self) -> &'static [usize] {
        match self {
            SlotRole::Fuel => &FUEL_SLOTS,
            SlotRole::Input => &INPUT_SLOTS,
            SlotRole::Output => &OUTPUT_SLOTS,
        }
    }
}

/// Persisted inventory state for a mill block entity.
#[derive(Debug, Clone, PartialEq)]
pub struct MillSlots {
    slots: [Option<ItemStack>; MILL_SLOT_COUNT],
}

impl Default for MillSlots {
    fn default() -> Self {
        Self::new()
    }
}

impl MillSlots {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Number of slots (always [`MILL_SLOT_COUNT`]).
    pub const fn len(&self) -> usize {
        MILL_SLOT_COUNT
    }

    /// True when every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Stack held in `slot`.
    pub fn get(&self, slot: usize) -> Result<Option<&ItemStack>, ContainerError> {
        let slot = check_slot(slot, MILL_SLOT_COUNT)?;
        Ok(self.slots[slot].as_ref())
    }

    /// Split up to `count` items off the stack in `slot`.
    pub fn take_partial(
        &mut self,
        slot: usize,
        count: u32,
    ) -> Result<Option<ItemStack>, ContainerError> {
        let slot = check_slot(slot, MILL_SLOT_COUNT)?;
        let Some(existing) = self.slots[slot].as_mut() else {
            return Ok(None);
        };

        let taken = existing.split(count);
        if existing.is_empty() {
            self.slots[slot] = None;
        }
        Ok(taken)
    }

    /// Take the whole stack out of `slot`.
    pub fn take(&mut self, slot: usize) -> Result<Option<ItemStack>, ContainerError> {
        let slot = check_slot(slot, MILL_SLOT_COUNT)?;
        Ok(self.slots[slot].take())
    }

    /// Replace the stack in `slot`.
    ///
    /// Counts above the item's stack limit are clamped; a zero count empties the slot.
    pub fn put(&mut self, slot: usize, stack: Option<ItemStack>) -> Result<(), ContainerError> {
        let slot = check_slot(slot, MILL_SLOT_COUNT)?;
        let stack = stack.filter(|s| !s.is_empty()).map(|s| {
            let mut s = s.normalized();
            if s.clamp_to_max() {
                debug!(slot, item = %s.item_type, max = s.count, "clamped over-full stack");
            }
            s
        });
        self.slots[slot] = stack;
        Ok(())
    }

    /// Empty every slot, returning whether anything was removed.
    pub fn clear(&mut self) -> bool {
        let had_items = !self.is_empty();
        self.slots = std::array::from_fn(|_| None);
        had_items
    }

    /// Iterate over occupied slots as `(index, stack)`.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &ItemStack)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|stack| (idx, stack)))
    }

    /// Raw view of all slots in index order.
    pub fn as_slice(&self) -> &[Option<ItemStack>] {
        &self.slots
    }
}
