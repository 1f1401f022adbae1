#![warn(missing_docs)]
//! Beehive variants, drop tables and loot resolution.

pub mod block;
mod drop;
mod hive;
mod loader;
mod resolver;
mod table;

pub use block::{HiveState, HiveStateError};
pub use drop::{wrap, HiveDrop, LootTier, SpeciesDrop};
pub use hive::{decode, encode, HiveVariant, OutOfRangeError, StorageCode};
pub use loader::{
    apply_drop_tables_str, load_drop_tables_lenient, load_drop_tables_strict, DropTableError,
};
pub use resolver::{resolve_drops, DropResolver, LootResult, RARE_TIER_ROUNDS};
pub use table::{DropList, DropTable, HiveRegistry};
