//! Hive variants and their compact storage codes.
//!
//! A placed hive persists a single integer. Lootable variants map to
//! `ordinal + 1`, so code 0 stays reserved for "never initialised" and every
//! value above [`StorageCode::MAX`] is rejected rather than wrapped.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Themed hive types found in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HiveVariant {
    /// Temperate forests.
    Forest,
    /// Plains and meadows.
    Meadows,
    /// Hot, arid biomes.
    Desert,
    /// Jungles.
    Jungle,
    /// The End.
    End,
    /// Frozen biomes.
    Snow,
    /// Swamps.
    Swamp,
    /// Hive spawned by an escaped swarm. Holds its bees in the block entity and
    /// has no drop table or storage code.
    Swarm,
}

impl HiveVariant {
    /// Every variant that has a storage code, in code order.
    pub const LOOTABLE: [HiveVariant; 7] = [
        HiveVariant::Forest,
        HiveVariant::Meadows,
        HiveVariant::Desert,
        HiveVariant::Jungle,
        HiveVariant::End,
        HiveVariant::Snow,
        HiveVariant::Swamp,
    ];

    /// Name of the drop table for this variant, or `None` for [`HiveVariant::Swarm`].
    pub fn hive_name(self) -> Option<&'static str> {
        match self {
            HiveVariant::Forest => Some("forest"),
            HiveVariant::Meadows => Some("meadows"),
            HiveVariant::Desert => Some("desert"),
            HiveVariant::Jungle => Some("jungle"),
            HiveVariant::End => Some("end"),
            HiveVariant::Snow => Some("snow"),
            HiveVariant::Swamp => Some("swamp"),
            HiveVariant::Swarm => None,
        }
    }

    /// Parse a variant from its drop-table name (`"swarm"` included).
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        if name == "swarm" {
            return Some(HiveVariant::Swarm);
        }
        Self::LOOTABLE
            .into_iter()
            .find(|variant| variant.hive_name() == Some(name.as_str()))
    }

    /// Storage code for this variant. `None` for the swarm placeholder, which
    /// callers must handle before persisting.
    pub fn storage_code(self) -> Option<StorageCode> {
        Self::LOOTABLE
            .iter()
            .position(|&variant| variant == self)
            .map(|ordinal| StorageCode(ordinal as u8 + 1))
    }
}

impl fmt::Display for HiveVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hive_name().unwrap_or("swarm"))
    }
}

/// Raw storage code that does not name a lootable hive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("hive storage code {code} is outside 1..={max}", max = StorageCode::MAX)]
pub struct OutOfRangeError {
    /// The rejected raw value.
    pub code: u32,
}

/// Persisted identity of a lootable hive, always within `1..=StorageCode::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct StorageCode(u8);

impl StorageCode {
    /// Highest valid code (number of lootable variants).
    pub const MAX: u8 = HiveVariant::LOOTABLE.len() as u8;

    /// Numeric value as written to disk.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Variant this code stands for.
    pub fn variant(self) -> HiveVariant {
        HiveVariant::LOOTABLE[usize::from(self.0 - 1)]
    }
}

impl TryFrom<u32> for StorageCode {
    type Error = OutOfRangeError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        if (1..=u32::from(Self::MAX)).contains(&code) {
            Ok(Self(code as u8))
        } else {
            Err(OutOfRangeError { code })
        }
    }
}

impl From<StorageCode> for u32 {
    fn from(code: StorageCode) -> Self {
        u32::from(code.0)
    }
}

impl fmt::Display for StorageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Storage code for a lootable variant (`None` for the swarm placeholder).
pub fn encode(variant: HiveVariant) -> Option<StorageCode> {
    variant.storage_code()
}

/// Variant for a raw persisted code.
pub fn decode(code: u32) -> Result<HiveVariant, OutOfRangeError> {
    StorageCode::try_from(code).map(StorageCode::variant)
}
