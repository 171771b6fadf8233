//! Change notifications for observers of a block entity.
//!
//! A block entity does not hold a reference to its world. Instead it is given
//! a [`ChangeSink`] at construction and pushes a [`BlockChange`] into it every
//! time its externally visible state changes. Each change carries the full
//! persisted document so observers can redeliver state without diffing.

use crate::persist::Document;
use milldustry_core::BlockPos;
use serde::Serialize;
use std::sync::mpsc::Sender;
use tracing::debug;

/// What triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// A slot was written, drained or cleared.
    Inventory,
    /// The attached millstone was replaced.
    Millstone,
    /// State was rebuilt from a persisted document.
    Loaded,
    /// Observers asked for a full redelivery.
    Resync,
    /// The tick processor reported a mutation.
    Processed,
}

/// "This block entity's visible state changed" event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockChange {
    /// Location of the block entity.
    pub pos: BlockPos,
    /// Why the notification fired.
    pub kind: ChangeKind,
    /// Full persisted state after the change.
    pub state: Document,
}

/// Receiver of change notifications.
pub trait ChangeSink {
    /// Deliver one change. Called synchronously, once per mutation.
    fn notify_changed(&mut self, change: BlockChange);
}

/// Sink used when the block entity is not attached to a world.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ChangeSink for NullSink {
    fn notify_changed(&mut self, change: BlockChange) {
        debug!(pos = %change.pos, kind = ?change.kind, "change dropped (no world attached)");
    }
}

impl ChangeSink for Sender<BlockChange> {
    fn notify_changed(&mut self, change: BlockChange) {
        let pos = change.pos;
        if self.send(change).is_err() {
            debug!(%pos, "change receiver hung up");
        }
    }
}

impl ChangeSink for Vec<BlockChange> {
    fn notify_changed(&mut self, change: BlockChange) {
        self.push(change);
    }
}
