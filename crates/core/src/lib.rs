#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod bee;
pub mod enchantment;
pub mod item;
pub mod registry;
pub mod rng;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use bee::{Bee, BeeType};
pub use enchantment::{Enchantment, EnchantmentType};
pub use item::{ItemStack, ItemType};
pub use registry::{RegistryKey, RegistryKeyError};
pub use rng::DropRng;

/// Fixed tick type (20 TPS => 50 ms per tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

/// Helper to derive a reproducible RNG seeded by world + block position + tick.
///
/// Hive drops are resolved with this generator so the same destruction event
/// replays to the same loot.
pub fn scoped_rng(world_seed: u64, block_hash: u64, tick: SimTick) -> StdRng {
    let seed = world_seed ^ block_hash ^ tick.0;
    StdRng::seed_from_u64(seed)
}

/// Hash a block position into the domain mixed by [`scoped_rng`].
pub fn block_hash(x: i32, y: i32, z: i32) -> u64 {
    let x = x as u32 as u64;
    let y = y as u32 as u64;
    let z = z as u32 as u64;
    x.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ y.wrapping_mul(0xC2B2_AE3D_27D4_EB4F)
        ^ z.wrapping_mul(0x1656_67B1_9E37_79F9)
}
