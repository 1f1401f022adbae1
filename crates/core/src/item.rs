//! Item stacks produced by hive drops.

use crate::bee::{Bee, BeeType};
use crate::registry::RegistryKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Item type identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// A bee of the given life stage (genome carried on the stack).
    Bee(BeeType),
    /// A beehive block item, keyed by its storage code.
    Hive(u8),
    /// Any other item by registry key (combs, pollen, ...).
    Item(RegistryKey),
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemType::Bee(bee_type) => f.write_str(bee_type.name()),
            ItemType::Hive(code) => write!(f, "beehive#{code}"),
            ItemType::Item(key) => write!(f, "{key}"),
        }
    }
}

/// An item stack in inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Type of item
    pub item_type: ItemType,
    /// Quantity in stack
    pub count: u32,
    /// Bee carried by the stack (only for [`ItemType::Bee`])
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bee: Option<Bee>,
}

impl ItemStack {
    /// Create a new item stack
    pub fn new(item_type: ItemType, count: u32) -> Self {
        Self {
            item_type,
            count,
            bee: None,
        }
    }

    /// Wrap a single bee as an item of the given life stage.
    pub fn member(bee: Bee, bee_type: BeeType) -> Self {
        Self {
            item_type: ItemType::Bee(bee_type),
            count: 1,
            bee: Some(bee),
        }
    }

    /// Stable label used when tallying drops, e.g. `princess:hive:forest`.
    pub fn label(&self) -> String {
        match &self.bee {
            Some(bee) if !bee.is_natural() => {
                format!("{}:{}:ignoble", self.item_type, bee.species())
            }
            Some(bee) => format!("{}:{}", self.item_type, bee.species()),
            None => self.item_type.to_string(),
        }
    }
}
