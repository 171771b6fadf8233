//! Capability contracts for block entities that hold items.
//!
//! [`Container`] is plain slot access with no notion of direction.
//! [`SidedContainer`] layers the per-face rules automated neighbours must
//! respect. A block entity implements both; callers that only care about one
//! capability take `impl Container` or `impl SidedContainer`.

use milldustry_core::{Direction, ItemStack};
use thiserror::Error;

/// Errors raised by slot-addressed container operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    /// The slot index is not part of this container.
    #[error("slot {slot} is out of range (container has {size} slots)")]
    OutOfRange {
        /// Requested slot.
        slot: usize,
        /// Number of slots in the container.
        size: usize,
    },
}

/// Generic slot access.
pub trait Container {
    /// Number of slots. Constant for the lifetime of the container.
    fn size(&self) -> usize;

    /// True when every slot is empty.
    fn is_empty(&self) -> bool;

    /// Read-only view of a slot (`None` when it is empty).
    fn get(&self, slot: usize) -> Result<Option<&ItemStack>, ContainerError>;

    /// Remove up to `count` items from `slot`.
    fn remove_partial(
        &mut self,
        slot: usize,
        count: u32,
    ) -> Result<Option<ItemStack>, ContainerError>;

    /// Remove and return the whole stack in `slot`.
    fn remove_all(&mut self, slot: usize) -> Result<Option<ItemStack>, ContainerError>;

    /// Replace the contents of `slot`. Over-full stacks are clamped to the item's maximum.
    fn set(&mut self, slot: usize, stack: Option<ItemStack>) -> Result<(), ContainerError>;

    /// Empty every slot.
    fn clear(&mut self);
}

/// Direction-aware access used by neighbouring mechanisms.
pub trait SidedContainer {
    /// Slots reachable from `side`.
    fn available_slots(&self, side: Direction) -> &'static [usize];

    /// Whether `stack` may be pushed into `slot` from `side`.
    fn can_insert(&self, slot: usize, stack: &ItemStack, side: Direction) -> bool;

    /// Whether `stack` may be pulled out of `slot` from `side`.
    fn can_extract(&self, slot: usize, stack: &ItemStack, side: Direction) -> bool;
}

/// Validate a slot index against a container size.
pub(crate) fn check_slot(slot: usize, size: usize) -> Result<usize, ContainerError> {
    if slot < size {
        Ok(slot)
    } else {
        Err(ContainerError::OutOfRange { slot, size })
    }
}
