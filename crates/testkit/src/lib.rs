#![warn(missing_docs)]
//! Deterministic testing surfaces for hive loot (scripted randomness, event
//! logs, drop tallies).

mod metrics;
mod scripted_rng;

use anyhow::Result;
use hivecraft_core::{ItemStack, SimTick};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub use metrics::*;
pub use scripted_rng::*;

/// One destroyed hive as captured by headless tests.
#[derive(Debug, Serialize)]
pub struct LootEventRecord<'a> {
    /// Simulation tick when the hive was destroyed.
    pub tick: SimTick,
    /// Drop-table name of the hive.
    pub hive: &'a str,
    /// Fortune level of the harvesting tool.
    pub luck: u32,
    /// Stacks the hive dropped.
    pub stacks: &'a [ItemStack],
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Append a record to the log.
    pub fn write<T: Serialize>(&mut self, event: &T) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}
