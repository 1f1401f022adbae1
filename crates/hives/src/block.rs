//! Placed beehive blocks: properties, persisted state and harvesting.

use crate::hive::{HiveVariant, OutOfRangeError, StorageCode};
use crate::resolver::{DropResolver, LootResult};
use crate::table::DropTable;
use hivecraft_core::{DropRng, ItemStack, ItemType};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Light emitted by a hive (0.0 to 1.0).
pub const HIVE_LIGHT_LEVEL: f32 = 0.8;

/// Block hardness.
pub const HIVE_HARDNESS: f32 = 1.0;

/// Tool class needed to harvest a hive.
pub const HIVE_HARVEST_TOOL: &str = "scoop";

/// Minimum tool tier for [`HIVE_HARVEST_TOOL`].
pub const HIVE_HARVEST_LEVEL: u8 = 0;

/// Errors raised while loading a hive's persisted state.
#[derive(Debug, Error)]
pub enum HiveStateError {
    /// The stored code does not name a lootable hive.
    #[error(transparent)]
    OutOfRange(#[from] OutOfRangeError),
    /// The stored record could not be decoded at all.
    #[error("failed to decode hive state: {0}")]
    Decode(#[source] serde_json::Error),
    /// The state could not be written out.
    #[error("failed to encode hive state: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Per-block persisted state: a single storage code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiveState {
    code: StorageCode,
}

impl HiveState {
    /// State for a newly placed hive; `None` for the swarm placeholder.
    pub fn new(variant: HiveVariant) -> Option<Self> {
        variant.storage_code().map(|code| Self { code })
    }

    /// Rebuild state from a raw stored integer.
    pub fn from_raw(code: u32) -> Result<Self, OutOfRangeError> {
        StorageCode::try_from(code).map(|code| Self { code })
    }

    /// Storage code persisted for this block.
    pub fn code(&self) -> StorageCode {
        self.code
    }

    /// Variant of this hive.
    pub fn variant(&self) -> HiveVariant {
        self.code.variant()
    }

    /// Serialize to the JSON record stored with the block.
    pub fn save(&self) -> Result<String, HiveStateError> {
        serde_json::to_string(self).map_err(HiveStateError::Encode)
    }

    /// Load from a stored JSON record; 0 and out-of-range codes are errors.
    pub fn load(record: &str) -> Result<Self, HiveStateError> {
        let raw: RawHiveState = serde_json::from_str(record).map_err(HiveStateError::Decode)?;
        Ok(Self::from_raw(raw.code)?)
    }
}

#[derive(Deserialize)]
struct RawHiveState {
    code: u32,
}

/// Whether a non-player entity (explosions, bosses) may destroy a hive.
pub fn can_entity_destroy() -> bool {
    false
}

/// The hive item handed out on pick-block; keeps the variant as its code.
pub fn pick_item(state: &HiveState) -> ItemStack {
    ItemStack::new(ItemType::Hive(state.code().get()), 1)
}

/// Resolve drops for a hive broken with a tool of Fortune `luck`.
pub fn harvest<T, R>(state: &HiveState, luck: u32, table: &T, rng: &mut R) -> LootResult
where
    T: DropTable + ?Sized,
    R: DropRng + ?Sized,
{
    DropResolver::new(table).resolve(state.variant(), luck, rng)
}

/// Resolve drops straight from a stored integer.
///
/// A corrupt code yields no loot; the error is logged and returned so the
/// caller can decide how to repair the block.
pub fn harvest_raw<T, R>(
    code: u32,
    luck: u32,
    table: &T,
    rng: &mut R,
) -> Result<LootResult, OutOfRangeError>
where
    T: DropTable + ?Sized,
    R: DropRng + ?Sized,
{
    let state = HiveState::from_raw(code).map_err(|err| {
        warn!("Refusing to harvest hive: {err}");
        err
    })?;
    Ok(harvest(&state, luck, table, rng))
}
