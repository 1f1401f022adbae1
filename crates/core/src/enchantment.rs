//! Tool enchantments relevant to harvesting.
//!
//! Fortune on the harvesting tool is the luck factor handed to hive drops.

use serde::{Deserialize, Serialize};

/// Enchantments on a harvesting tool that hive drops react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnchantmentType {
    /// Improves drop chances
    Fortune,
}

impl EnchantmentType {
    /// Get the maximum level for this enchantment
    pub fn max_level(&self) -> u8 {
        match self {
            EnchantmentType::Fortune => 3,
        }
    }
}

/// An enchantment with a specific level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enchantment {
    /// The type of enchantment
    pub enchantment_type: EnchantmentType,
    /// The level of the enchantment (1 to max_level)
    pub level: u8,
}

impl Enchantment {
    /// Create a new enchantment, clamping `level` to the type's maximum.
    pub fn new(enchantment_type: EnchantmentType, level: u8) -> Self {
        let level = level.min(enchantment_type.max_level());
        Self {
            enchantment_type,
            level,
        }
    }
}

/// Fortune level carried by a tool, or 0 without Fortune.
///
/// This is the luck factor passed to drop chance calculations.
pub fn fortune_level(enchantments: &[Enchantment]) -> u32 {
    enchantments
        .iter()
        .filter(|e| e.enchantment_type == EnchantmentType::Fortune)
        .map(|e| u32::from(e.level))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fortune_clamps_to_three() {
        let ench = Enchantment::new(EnchantmentType::Fortune, 10);
        assert_eq!(ench.level, 3);
    }

    #[test]
    fn test_fortune_level_from_tool() {
        assert_eq!(fortune_level(&[]), 0);
        let tool = [
            Enchantment::new(EnchantmentType::Fortune, 1),
            Enchantment::new(EnchantmentType::Fortune, 2),
        ];
        assert_eq!(fortune_level(&tool), 2);
    }
}
