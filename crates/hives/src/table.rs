//! Drop-table registry keyed by hive name.

use crate::drop::HiveDrop;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Immutable, ordered snapshot of one hive's drops.
pub type DropList = Arc<[Arc<dyn HiveDrop>]>;

/// Source of drop descriptors per hive name.
pub trait DropTable {
    /// Ordered drops for `hive_name`; empty when the hive is unknown.
    ///
    /// The returned list is a snapshot: later reloads never change it.
    fn lookup(&self, hive_name: &str) -> DropList;
}

fn empty_list() -> DropList {
    Arc::from(Vec::new())
}

/// Shared registry of hive drop tables.
///
/// Tables can be swapped while resolvers run; each lookup hands out the whole
/// list as one `Arc` so a reload is either fully visible or not at all.
#[derive(Debug, Default)]
pub struct HiveRegistry {
    tables: RwLock<BTreeMap<String, DropList>>,
}

impl HiveRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `drop` to the end of `hive_name`'s table.
    pub fn register(&self, hive_name: &str, drop: impl HiveDrop + 'static) {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let mut drops: Vec<Arc<dyn HiveDrop>> = tables
            .get(hive_name)
            .map(|list| list.iter().cloned().collect())
            .unwrap_or_default();
        drops.push(Arc::new(drop));
        tables.insert(hive_name.to_string(), Arc::from(drops));
    }

    /// Replace `hive_name`'s table wholesale.
    pub fn replace(&self, hive_name: &str, drops: Vec<Arc<dyn HiveDrop>>) {
        debug!(hive = hive_name, drops = drops.len(), "replacing hive drop table");
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(hive_name.to_string(), Arc::from(drops));
    }

    /// Remove a table; returns whether one was registered.
    pub fn remove(&self, hive_name: &str) -> bool {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(hive_name)
            .is_some()
    }

    /// Registered hive names in sorted order.
    pub fn hive_names(&self) -> Vec<String> {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

impl DropTable for HiveRegistry {
    fn lookup(&self, hive_name: &str) -> DropList {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(hive_name)
            .cloned()
            .unwrap_or_else(empty_list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drop::SpeciesDrop;
    use hivecraft_core::RegistryKey;

    fn species_drop(species: &str, chance: f64) -> SpeciesDrop {
        SpeciesDrop::new(RegistryKey::parse(species).unwrap(), chance)
    }

    #[test]
    fn unknown_hive_is_empty() {
        let registry = HiveRegistry::new();
        assert!(registry.lookup("forest").is_empty());
    }

    #[test]
    fn register_preserves_order() {
        let registry = HiveRegistry::new();
        registry.register("forest", species_drop("forest", 0.8));
        registry.register("forest", species_drop("valiant", 0.03));
        let list = registry.lookup("forest");
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].chance(0), 0.8);
        assert_eq!(list[1].chance(0), 0.03);
    }

    #[test]
    fn snapshots_survive_reload() {
        let registry = HiveRegistry::new();
        registry.register("desert", species_drop("modest", 0.8));
        let before = registry.lookup("desert");

        let reloaded: Vec<Arc<dyn HiveDrop>> = vec![
            Arc::new(species_drop("modest", 0.1)) as Arc<dyn HiveDrop>,
            Arc::new(species_drop("valiant", 0.1)),
        ];
        registry.replace("desert", reloaded);

        assert_eq!(before.len(), 1);
        assert_eq!(before[0].chance(0), 0.8);
        assert_eq!(registry.lookup("desert").len(), 2);
    }

    #[test]
    fn lookups_share_one_snapshot_until_replaced() {
        let registry = HiveRegistry::new();
        registry.register("jungle", species_drop("tropical", 0.8));
        let first = registry.lookup("jungle");
        let second = registry.lookup("jungle");
        assert!(Arc::ptr_eq(&first, &second));

        registry.replace("jungle", Vec::new());
        assert!(!Arc::ptr_eq(&first, &registry.lookup("jungle")));
    }

    #[test]
    fn remove_and_names() {
        let registry = HiveRegistry::new();
        registry.register("snow", species_drop("wintry", 0.8));
        registry.register("end", species_drop("ender", 0.9));
        assert_eq!(registry.hive_names(), vec!["end".to_string(), "snow".to_string()]);
        assert!(registry.remove("snow"));
        assert!(!registry.remove("snow"));
        assert!(registry.lookup("snow").is_empty());
    }
}
