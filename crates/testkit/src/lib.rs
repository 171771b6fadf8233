#![warn(missing_docs)]
//! Deterministic testing surfaces (fake collaborators, event logs, snapshots).

mod fakes;
mod snapshot;

use anyhow::Result;
use milldustry_core::SimTick;
use milldustry_world::{BlockChange, ChangeSink};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::warn;

pub use fakes::*;
pub use snapshot::*;

/// One line of a notification log.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Simulation tick when the event occurred.
    pub tick: SimTick,
    /// The delivered change.
    pub change: &'a BlockChange,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
    tick: SimTick,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self {
            file,
            tick: SimTick::ZERO,
        })
    }

    /// Stamp subsequent records with `tick`.
    pub fn set_tick(&mut self, tick: SimTick) {
        self.tick = tick;
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}

impl ChangeSink for JsonlSink {
    fn notify_changed(&mut self, change: BlockChange) {
        let record = EventRecord {
            tick: self.tick,
            change: &change,
        };
        if let Err(err) = self.write(&record) {
            warn!(pos = %change.pos, "failed to log change: {err:#}");
        }
    }
}
