//! Loot resolution for destroyed hives.
//!
//! Three tiers are resolved against one shuffled snapshot of the hive's drop
//! table:
//!
//! 1. **Rare**: up to [`RARE_TIER_ROUNDS`] passes; the first accepted entry
//!    yields a princess, possibly flagged ignoble.
//! 2. **Common**: one pass; the first accepted entry yields a drone.
//! 3. **Bonus**: one pass; the first accepted entry contributes all of its
//!    extra stacks.
//!
//! Every tier walks the same order, so entries early in the shuffle are
//! favoured across all three. Do not reshuffle between tiers.

use crate::drop::{wrap, HiveDrop, LootTier};
use crate::hive::HiveVariant;
use crate::table::DropTable;
use hivecraft_core::{DropRng, ItemStack};
use tracing::debug;

/// Maximum number of passes the rare tier makes before giving up.
pub const RARE_TIER_ROUNDS: usize = 10;

/// Stacks produced by one destroyed hive, in tier order.
pub type LootResult = Vec<ItemStack>;

/// Resolves hive loot against a drop table.
#[derive(Debug)]
pub struct DropResolver<'a, T: DropTable + ?Sized> {
    table: &'a T,
}

impl<'a, T: DropTable + ?Sized> DropResolver<'a, T> {
    /// Resolver reading from `table`.
    pub fn new(table: &'a T) -> Self {
        Self { table }
    }

    /// Roll the loot for one destroyed hive of `variant`.
    ///
    /// Unconfigured variants (and the swarm placeholder) yield nothing and
    /// consume no randomness.
    pub fn resolve<R: DropRng + ?Sized>(
        &self,
        variant: HiveVariant,
        luck: u32,
        rng: &mut R,
    ) -> LootResult {
        let Some(hive_name) = variant.hive_name() else {
            return LootResult::new();
        };

        let snapshot = self.table.lookup(hive_name);
        if snapshot.is_empty() {
            debug!(hive = hive_name, "no drop table registered");
            return LootResult::new();
        }

        let mut order: Vec<&dyn HiveDrop> = snapshot.iter().map(|drop| &**drop).collect();
        rng.shuffle(&mut order);

        let mut loot = LootResult::new();

        let mut rounds = 0;
        while rounds < RARE_TIER_ROUNDS {
            rounds += 1;
            if let Some(drop) = first_accepted(&order, luck, rng) {
                let mut bee = drop.rare_organism();
                if rng.next_float() < drop.ignoble_chance(luck) {
                    bee.mark_non_natural();
                }
                loot.push(wrap(bee, LootTier::Rare));
                break;
            }
        }

        if let Some(drop) = first_accepted(&order, luck, rng) {
            loot.push(wrap(drop.common_organism(), LootTier::Common));
        }

        if let Some(drop) = first_accepted(&order, luck, rng) {
            loot.extend(drop.extra_items(luck));
        }

        debug!(
            hive = hive_name,
            luck,
            rare_rounds = rounds,
            stacks = loot.len(),
            "resolved hive drops"
        );
        loot
    }
}

/// Scan `order` once, drawing one chance roll per entry until one is accepted.
fn first_accepted<'d, R: DropRng + ?Sized>(
    order: &[&'d dyn HiveDrop],
    luck: u32,
    rng: &mut R,
) -> Option<&'d dyn HiveDrop> {
    order
        .iter()
        .copied()
        .find(|drop| rng.next_double() < drop.chance(luck))
}

/// Convenience wrapper around [`DropResolver::resolve`].
pub fn resolve_drops<T, R>(table: &T, variant: HiveVariant, luck: u32, rng: &mut R) -> LootResult
where
    T: DropTable + ?Sized,
    R: DropRng + ?Sized,
{
    DropResolver::new(table).resolve(variant, luck, rng)
}
