//! Drop-rate tallies over many destroyed hives.
//!
//! Used to sanity-check drop tables: feed every resolved loot list into a
//! [`LootTally`] and export the report as JSON.

use anyhow::Result;
use hivecraft_core::{BeeType, ItemStack, ItemType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Aggregated drops for one hive/luck configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LootTally {
    /// Drop-table name that was rolled.
    pub hive: String,
    /// Fortune level used for every roll.
    pub luck: u32,
    /// Number of hives destroyed.
    pub trials: u64,
    /// Destructions that dropped nothing.
    pub empty: u64,
    /// Destructions that dropped a princess.
    pub princesses: u64,
    /// Destructions that dropped a drone.
    pub drones: u64,
    /// Total item count per stack label.
    pub items: BTreeMap<String, u64>,
}

impl LootTally {
    /// Empty tally for `hive` at Fortune `luck`.
    pub fn new(hive: impl Into<String>, luck: u32) -> Self {
        Self {
            hive: hive.into(),
            luck,
            ..Self::default()
        }
    }

    /// Fold one destruction's loot into the tally.
    pub fn record(&mut self, loot: &[ItemStack]) {
        self.trials += 1;
        if loot.is_empty() {
            self.empty += 1;
        }
        if loot.iter().any(|s| s.item_type == ItemType::Bee(BeeType::Princess)) {
            self.princesses += 1;
        }
        if loot.iter().any(|s| s.item_type == ItemType::Bee(BeeType::Drone)) {
            self.drones += 1;
        }
        for stack in loot {
            *self.items.entry(stack.label()).or_default() += u64::from(stack.count);
        }
    }

    /// Fraction of trials that produced a princess.
    pub fn princess_rate(&self) -> f64 {
        ratio(self.princesses, self.trials)
    }

    /// Fraction of trials that produced a drone.
    pub fn drone_rate(&self) -> f64 {
        ratio(self.drones, self.trials)
    }

    /// Persist the tally as pretty JSON, creating parent dirs if needed.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        debug!(hive = %self.hive, trials = self.trials, "wrote loot tally to {}", path.display());
        Ok(())
    }
}

fn ratio(hits: u64, trials: u64) -> f64 {
    if trials == 0 {
        0.0
    } else {
        hits as f64 / trials as f64
    }
}
