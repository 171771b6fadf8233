//! The mill block entity.
//!
//! Holds ten fixed-role slots plus one attached millstone, exposes them
//! through [`Container`] and [`SidedContainer`], and reports every visible
//! change to its [`ChangeSink`].

use crate::access;
use crate::container::{Container, ContainerError, SidedContainer};
use crate::fuel::FuelRegistry;
use crate::notify::{BlockChange, ChangeKind, ChangeSink, NullSink};
use crate::persist::{Document, MillSnapshot};
use crate::process::{IdleProcessor, MillProcessor, MillStep};
use crate::slots::MillSlots;
use milldustry_core::{BlockPos, BlockState, Direction, Facing, ItemStack, SimTick};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Shared, read-only fuel lookup.
pub type SharedFuelRegistry = Arc<dyn FuelRegistry + Send + Sync>;

/// Stateful mill placed in the world.
pub struct MillBlockEntity {
    pos: BlockPos,
    facing: Facing,
    slots: MillSlots,
    millstone: Option<ItemStack>,
    fuel: SharedFuelRegistry,
    sink: Box<dyn ChangeSink + Send>,
}

impl fmt::Debug for MillBlockEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MillBlockEntity")
            .field("pos", &self.pos)
            .field("facing", &self.facing)
            .field("slots", &self.slots)
            .field("millstone", &self.millstone)
            .finish_non_exhaustive()
    }
}

impl MillBlockEntity {
    /// Create an empty mill that reports changes to `sink`.
    pub fn new(
        pos: BlockPos,
        facing: Facing,
        fuel: SharedFuelRegistry,
        sink: Box<dyn ChangeSink + Send>,
    ) -> Self {
        Self {
            pos,
            facing,
            slots: MillSlots::new(),
            millstone: None,
            fuel,
            sink,
        }
    }

    /// Create an empty mill that is not attached to any world yet.
    pub fn detached(pos: BlockPos, facing: Facing, fuel: SharedFuelRegistry) -> Self {
        Self::new(pos, facing, fuel, Box::new(NullSink))
    }

    /// Attach (or replace) the change sink.
    pub fn attach(&mut self, sink: Box<dyn ChangeSink + Send>) {
        self.sink = sink;
    }

    /// Location of this block entity.
    pub fn pos(&self) -> BlockPos {
        self.pos
    }

    /// Current orientation, as last supplied by the placement state.
    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Refresh the cached orientation from the block's placement state bits.
    pub fn update_placement(&mut self, state: BlockState) {
        let facing = Facing::from_state(state);
        if facing != self.facing {
            debug!(pos = %self.pos, from = %self.facing, to = %facing, "mill re-oriented");
            self.facing = facing;
        }
    }

    /// Read-only view of the slots.
    pub fn slots(&self) -> &MillSlots {
        &self.slots
    }

    /// Attached millstone, if any.
    pub fn millstone(&self) -> Option<&ItemStack> {
        self.millstone.as_ref()
    }

    /// Replace the attached millstone, returning the previous one.
    ///
    /// At most one item is attached; any surplus in `stack` is not stored.
    /// Always notifies observers.
    pub fn set_millstone(&mut self, stack: Option<ItemStack>) -> Option<ItemStack> {
        let attached = stack
            .filter(|s| !s.is_empty())
            .map(|s| s.copy_with_count(1).normalized());
        let previous = std::mem::replace(&mut self.millstone, attached);
        self.notify(ChangeKind::Millstone);
        previous
    }

    /// A player uses `offered` on the mill.
    ///
    /// One item from `offered` becomes the new millstone and the old one is
    /// returned. The caller discards `offered` once it is empty.
    pub fn interact(&mut self, offered: &mut ItemStack) -> Option<ItemStack> {
        let attached = (!offered.is_empty()).then(|| offered.copy_with_count(1));
        offered.decrement(1);
        debug!(
            pos = %self.pos,
            attached = ?attached.as_ref().map(|s| s.item_type),
            remaining = offered.count,
            "millstone swapped"
        );
        self.set_millstone(attached)
    }

    /// Snapshot of everything the mill persists.
    pub fn snapshot(&self) -> MillSnapshot {
        MillSnapshot {
            slots: self.slots.clone(),
            millstone: self.millstone.clone(),
        }
    }

    /// Encode the persisted document.
    pub fn to_document(&self) -> Document {
        self.snapshot().to_document()
    }

    /// Replace all state from a persisted document.
    ///
    /// An absent `Millstone` key clears any millstone held before the call.
    pub fn load_document(&mut self, doc: &Document) {
        let MillSnapshot { slots, millstone } = MillSnapshot::from_document(doc);
        self.slots = slots;
        self.millstone = millstone;
        self.notify(ChangeKind::Loaded);
    }

    /// Re-advertise the full state to observers (e.g. after a viewer joins).
    pub fn resync(&mut self) {
        self.notify(ChangeKind::Resync);
    }

    /// Advance one tick. Processing is not implemented, so this never changes state.
    pub fn tick(&mut self, now: SimTick) {
        self.tick_with(now, &mut IdleProcessor);
    }

    /// Advance one tick with an explicit processor.
    pub fn tick_with(&mut self, now: SimTick, processor: &mut dyn MillProcessor) {
        let changed = processor.step(MillStep {
            now,
            facing: self.facing,
            slots: &mut self.slots,
            millstone: self.millstone.as_ref(),
        });
        trace!(pos = %self.pos, tick = now.0, changed, "mill tick");
        if changed {
            self.notify(ChangeKind::Processed);
        }
    }

    fn notify(&mut self, kind: ChangeKind) {
        debug!(pos = %self.pos, ?kind, "mill changed");
        let change = BlockChange {
            pos: self.pos,
            kind,
            state: self.to_document(),
        };
        self.sink.notify_changed(change);
    }
}

impl Container for MillBlockEntity {
    fn size(&self) -> usize {
        self.slots.len()
    }

    fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn get(&self, slot: usize) -> Result<Option<&ItemStack>, ContainerError> {
        self.slots.get(slot)
    }

    fn remove_partial(
        &mut self,
        slot: usize,
        count: u32,
    ) -> Result<Option<ItemStack>, ContainerError> {
        let taken = self.slots.take_partial(slot, count)?;
        if taken.is_some() {
            self.notify(ChangeKind::Inventory);
        }
        Ok(taken)
    }

    fn remove_all(&mut self, slot: usize) -> Result<Option<ItemStack>, ContainerError> {
        let taken = self.slots.take(slot)?;
        if taken.is_some() {
            self.notify(ChangeKind::Inventory);
        }
        Ok(taken)
    }

    fn set(&mut self, slot: usize, stack: Option<ItemStack>) -> Result<(), ContainerError> {
        self.slots.put(slot, stack)?;
        self.notify(ChangeKind::Inventory);
        Ok(())
    }

    fn clear(&mut self) {
        if self.slots.clear() {
            self.notify(ChangeKind::Inventory);
        }
    }
}

impl SidedContainer for MillBlockEntity {
    fn available_slots(&self, side: Direction) -> &'static [usize] {
        access::available_slots(self.facing, side)
    }

    fn can_insert(&self, slot: usize, stack: &ItemStack, side: Direction) -> bool {
        access::can_insert(self.facing, slot, stack.item_type, side, self.fuel.as_ref())
    }

    fn can_extract(&self, slot: usize, _stack: &ItemStack, side: Direction) -> bool {
        access::can_extract(self.facing, slot, side)
    }
}
