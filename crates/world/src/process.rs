//! Per-tick processing hook for the mill.
//!
//! Milling itself (burning fuel, grinding input into output) is not part of
//! this crate. A [`MillProcessor`] gets mutable access to the slots once per
//! tick; the default does nothing.

use crate::slots::MillSlots;
use milldustry_core::{Facing, ItemStack, SimTick};

/// State handed to a processor for one tick.
pub struct MillStep<'a> {
    /// Current simulation tick.
    pub now: SimTick,
    /// Orientation of the mill.
    pub facing: Facing,
    /// Slots the processor may rearrange.
    pub slots: &'a mut MillSlots,
    /// Attached millstone, read-only.
    pub millstone: Option<&'a ItemStack>,
}

/// Drives a mill forward by one tick.
pub trait MillProcessor {
    /// Advance one tick. Returns `true` if any slot was changed.
    fn step(&mut self, step: MillStep<'_>) -> bool {
        let _ = step;
        false
    }
}

/// Processor that never changes anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdleProcessor;

impl MillProcessor for IdleProcessor {}
