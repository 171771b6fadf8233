//! Item movement between a sided container and an automated neighbour.
//!
//! Everything here goes through [`Container`] and [`SidedContainer`], so the
//! per-face rules of the target always apply.

use crate::container::{Container, ContainerError, SidedContainer};
use milldustry_core::{Direction, ItemStack};
use tracing::debug;

/// Push `stack` into `target` through `side`.
///
/// Fills matching stacks first in slot order, then empty slots. Returns
/// whatever did not fit (`None` when everything was accepted).
pub fn insert_from_side<C>(
    target: &mut C,
    side: Direction,
    mut stack: ItemStack,
) -> Result<Option<ItemStack>, ContainerError>
where
    C: Container + SidedContainer + ?Sized,
{
    if stack.is_empty() {
        return Ok(None);
    }

    let slots = target.available_slots(side);

    // Merge pass.
    for &slot in slots {
        if stack.is_empty() {
            break;
        }
        if !target.can_insert(slot, &stack, side) {
            continue;
        }
        let Some(existing) = target.get(slot)? else {
            continue;
        };
        if !existing.can_merge(&stack) || existing.remaining_space() == 0 {
            continue;
        }
        let moved = stack.count.min(existing.remaining_space());
        let merged = existing.copy_with_count(existing.count + moved);
        target.set(slot, Some(merged))?;
        stack.decrement(moved);
    }

    // Fill pass.
    for &slot in slots {
        if stack.is_empty() {
            break;
        }
        if target.get(slot)?.is_some() || !target.can_insert(slot, &stack, side) {
            continue;
        }
        let moved = stack.count.min(stack.max_stack_size());
        target.set(slot, Some(stack.copy_with_count(moved)))?;
        stack.decrement(moved);
    }

    Ok((!stack.is_empty()).then_some(stack))
}

fn take_one_from_side<C>(
    source: &mut C,
    side: Direction,
) -> Result<Option<(usize, ItemStack)>, ContainerError>
where
    C: Container + SidedContainer + ?Sized,
{
    for &slot in source.available_slots(side) {
        let allowed = match source.get(slot)? {
            Some(stack) => source.can_extract(slot, stack, side),
            None => false,
        };
        if allowed {
            return Ok(source.remove_partial(slot, 1)?.map(|one| (slot, one)));
        }
    }
    Ok(None)
}

/// Pull a single item out of `source` through `side`.
pub fn extract_one_from_side<C>(
    source: &mut C,
    side: Direction,
) -> Result<Option<ItemStack>, ContainerError>
where
    C: Container + SidedContainer + ?Sized,
{
    Ok(take_one_from_side(source, side)?.map(|(_, one)| one))
}

/// Move one item from `source` (leaving through `source_side`) into `dest`
/// (entering through `dest_side`). Returns `true` if an item moved.
///
/// If `dest` refuses the item it is put back where it came from.
pub fn transfer_one<S, D>(
    source: &mut S,
    source_side: Direction,
    dest: &mut D,
    dest_side: Direction,
) -> Result<bool, ContainerError>
where
    S: Container + SidedContainer + ?Sized,
    D: Container + SidedContainer + ?Sized,
{
    let Some((slot, one)) = take_one_from_side(source, source_side)? else {
        return Ok(false);
    };

    match insert_from_side(dest, dest_side, one)? {
        None => Ok(true),
        Some(rejected) => {
            let restored = match source.get(slot)? {
                Some(existing) => existing.copy_with_count(existing.count + rejected.count),
                None => rejected,
            };
            source.set(slot, Some(restored))?;
            debug!(slot, side = %dest_side, "transfer refused; item restored");
            Ok(false)
        }
    }
}
