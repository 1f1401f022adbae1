//! Drop descriptors: one weighted row of a hive's loot table.

use hivecraft_core::{Bee, BeeType, ItemStack, RegistryKey};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Loot tiers that produce an organism. The bonus tier only hands out the
/// winning entry's extra stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LootTier {
    /// Retried up to ten rounds; yields a princess.
    Rare,
    /// Single pass; yields a drone.
    Common,
}

impl LootTier {
    /// Life stage a bee produced for this tier is wrapped as.
    pub fn bee_type(self) -> BeeType {
        match self {
            LootTier::Rare => BeeType::Princess,
            LootTier::Common => BeeType::Drone,
        }
    }
}

/// Wrap a produced organism as the item stack for `tier`.
pub fn wrap(bee: Bee, tier: LootTier) -> ItemStack {
    ItemStack::member(bee, tier.bee_type())
}

/// A weighted entry in a hive's drop table.
///
/// `luck` is the Fortune level of the harvesting tool. Implementations must be
/// pure: the resolver may call any method several times per destruction.
pub trait HiveDrop: Debug + Send + Sync {
    /// Acceptance chance in `[0, 1]`.
    fn chance(&self, luck: u32) -> f64;

    /// Chance in `[0, 1]` that a rare-tier bee is flagged ignoble.
    fn ignoble_chance(&self, luck: u32) -> f32;

    /// Bee produced when this entry wins the rare tier.
    fn rare_organism(&self) -> Bee;

    /// Bee produced when this entry wins the common tier.
    fn common_organism(&self) -> Bee {
        self.rare_organism()
    }

    /// Stacks appended when this entry wins the bonus tier.
    fn extra_items(&self, luck: u32) -> Vec<ItemStack>;
}

/// Data-driven drop that yields bees of a single species.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesDrop {
    species: RegistryKey,
    chance: f64,
    ignoble_chance: f32,
    fortune_bonus: f64,
    extras: Vec<ItemStack>,
}

impl SpeciesDrop {
    /// Drop of `species` accepted with probability `chance`.
    pub fn new(species: RegistryKey, chance: f64) -> Self {
        Self {
            species,
            chance,
            ignoble_chance: 0.0,
            fortune_bonus: 0.0,
            extras: Vec::new(),
        }
    }

    /// Set the ignoble chance.
    pub fn with_ignoble_chance(mut self, ignoble_chance: f32) -> Self {
        self.ignoble_chance = ignoble_chance;
        self
    }

    /// Add `bonus` to the chance for every Fortune level.
    pub fn with_fortune_bonus(mut self, bonus: f64) -> Self {
        self.fortune_bonus = bonus;
        self
    }

    /// Append a bonus-tier stack.
    pub fn with_extra(mut self, stack: ItemStack) -> Self {
        self.extras.push(stack);
        self
    }

    /// Species key bees are generated from.
    pub fn species(&self) -> &RegistryKey {
        &self.species
    }
}

impl HiveDrop for SpeciesDrop {
    // Hand-built descriptors may carry values outside [0, 1].
    fn chance(&self, luck: u32) -> f64 {
        (self.chance + self.fortune_bonus * f64::from(luck)).clamp(0.0, 1.0)
    }

    fn ignoble_chance(&self, _luck: u32) -> f32 {
        self.ignoble_chance.clamp(0.0, 1.0)
    }

    fn rare_organism(&self) -> Bee {
        Bee::new(self.species.clone())
    }

    fn extra_items(&self, _luck: u32) -> Vec<ItemStack> {
        self.extras.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hivecraft_core::ItemType;

    fn forest() -> RegistryKey {
        RegistryKey::parse("hive:forest").unwrap()
    }

    #[test]
    fn fortune_raises_chance_up_to_one() {
        let drop = SpeciesDrop::new(forest(), 0.8).with_fortune_bonus(0.05);
        assert_eq!(drop.chance(0), 0.8);
        assert!((drop.chance(2) - 0.9).abs() < 1e-12);
        assert_eq!(drop.chance(10), 1.0);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let drop = SpeciesDrop::new(forest(), -0.5).with_ignoble_chance(3.0);
        assert_eq!(drop.chance(0), 0.0);
        assert_eq!(drop.ignoble_chance(0), 1.0);
    }

    #[test]
    fn common_organism_defaults_to_species() {
        let drop = SpeciesDrop::new(forest(), 0.8);
        assert_eq!(drop.common_organism().species(), &forest());
        assert!(drop.common_organism().is_natural());
    }

    #[test]
    fn wrap_maps_tiers_to_life_stages() {
        let bee = Bee::new(forest());
        assert_eq!(
            wrap(bee.clone(), LootTier::Rare).item_type,
            ItemType::Bee(BeeType::Princess)
        );
        assert_eq!(
            wrap(bee.clone(), LootTier::Common).item_type,
            ItemType::Bee(BeeType::Drone)
        );
        assert_eq!(wrap(bee.clone(), LootTier::Rare).bee, Some(bee));
    }

    #[test]
    fn extras_are_returned_in_order() {
        let comb = ItemStack::new(ItemType::Item(RegistryKey::parse("honey_comb").unwrap()), 2);
        let wax = ItemStack::new(ItemType::Item(RegistryKey::parse("beeswax").unwrap()), 1);
        let drop = SpeciesDrop::new(forest(), 0.8)
            .with_extra(comb.clone())
            .with_extra(wax.clone());
        assert_eq!(drop.extra_items(0), vec![comb, wax]);
    }
}
