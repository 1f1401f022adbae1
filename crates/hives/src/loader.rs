//! JSON drop-table definitions.
//!
//! ```json
//! {
//!   "hives": [
//!     {
//!       "hive": "forest",
//!       "drops": [
//!         { "species": "hive:forest", "chance": 0.8, "extras": [{ "item": "honey_comb" }] },
//!         { "species": "hive:valiant", "chance": 0.03, "ignoble_chance": 0.5 }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Each hive listed replaces its table in the registry as a whole. Hives that
//! are not listed keep whatever they had.

use crate::drop::{HiveDrop, SpeciesDrop};
use crate::hive::HiveVariant;
use crate::table::HiveRegistry;
use anyhow::{Context, Result};
use hivecraft_core::{ItemStack, ItemType, RegistryKey, RegistryKeyError};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Validation failures in a drop-table file.
#[derive(Debug, Error)]
pub enum DropTableError {
    /// Malformed JSON.
    #[error("failed to parse drop tables: {0}")]
    Parse(#[from] serde_json::Error),
    /// Hive name does not belong to a lootable variant.
    #[error("unknown hive '{0}'")]
    UnknownHive(String),
    /// The same hive appears twice in one file.
    #[error("duplicate drop table for hive '{0}'")]
    DuplicateHive(String),
    /// A species or item key failed to parse.
    #[error("invalid key '{token}' in hive '{hive}': {source}")]
    Key {
        /// Hive being parsed.
        hive: String,
        /// Offending token.
        token: String,
        /// Parse failure.
        source: RegistryKeyError,
    },
    /// A chance was not a finite value in `[0, 1]`.
    #[error("{field} {value} for '{species}' in hive '{hive}' must be within [0, 1]")]
    Chance {
        /// Hive being parsed.
        hive: String,
        /// Species of the offending drop.
        species: String,
        /// Which chance field was wrong.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// An extra stack had a count of zero.
    #[error("extra item '{item}' in hive '{hive}' must have a count of at least 1")]
    EmptyExtra {
        /// Hive being parsed.
        hive: String,
        /// Item key as written.
        item: String,
    },
}

#[derive(Debug, Deserialize)]
struct DropFile {
    #[serde(default)]
    hives: Vec<HiveDefinition>,
}

#[derive(Debug, Deserialize)]
struct HiveDefinition {
    hive: String,
    #[serde(default)]
    drops: Vec<DropDefinition>,
}

#[derive(Debug, Deserialize)]
struct DropDefinition {
    species: String,
    chance: f64,
    #[serde(default)]
    ignoble_chance: f32,
    #[serde(default)]
    fortune_bonus: f64,
    #[serde(default)]
    extras: Vec<ExtraDefinition>,
}

#[derive(Debug, Deserialize)]
struct ExtraDefinition {
    item: String,
    #[serde(default = "default_count")]
    count: u32,
}

fn default_count() -> u32 {
    1
}

/// A validated hive table ready to install.
type ParsedTable = (String, Vec<Arc<dyn HiveDrop>>);

/// Parse and validate every hive in `json`; the first problem aborts.
fn parse_tables_strict(json: &str) -> Result<Vec<ParsedTable>, DropTableError> {
    let file: DropFile = serde_json::from_str(json)?;
    let mut seen = BTreeSet::new();
    let mut tables = Vec::with_capacity(file.hives.len());
    for def in &file.hives {
        let table = parse_hive(def)?;
        if !seen.insert(table.0.clone()) {
            return Err(DropTableError::DuplicateHive(table.0));
        }
        tables.push(table);
    }
    Ok(tables)
}

fn parse_hive(def: &HiveDefinition) -> Result<ParsedTable, DropTableError> {
    let hive = HiveVariant::parse(&def.hive)
        .and_then(HiveVariant::hive_name)
        .ok_or_else(|| DropTableError::UnknownHive(def.hive.clone()))?;

    let mut drops: Vec<Arc<dyn HiveDrop>> = Vec::with_capacity(def.drops.len());
    for drop in &def.drops {
        drops.push(Arc::new(parse_drop(hive, drop)?));
    }
    Ok((hive.to_string(), drops))
}

fn parse_drop(hive: &str, def: &DropDefinition) -> Result<SpeciesDrop, DropTableError> {
    let species = parse_key(hive, &def.species)?;
    check_chance(hive, &def.species, "chance", def.chance)?;
    check_chance(hive, &def.species, "ignoble_chance", f64::from(def.ignoble_chance))?;
    if !def.fortune_bonus.is_finite() {
        return Err(DropTableError::Chance {
            hive: hive.to_string(),
            species: def.species.clone(),
            field: "fortune_bonus",
            value: def.fortune_bonus,
        });
    }

    let mut drop = SpeciesDrop::new(species, def.chance)
        .with_ignoble_chance(def.ignoble_chance)
        .with_fortune_bonus(def.fortune_bonus);
    for extra in &def.extras {
        if extra.count == 0 {
            return Err(DropTableError::EmptyExtra {
                hive: hive.to_string(),
                item: extra.item.clone(),
            });
        }
        let item = parse_key(hive, &extra.item)?;
        drop = drop.with_extra(ItemStack::new(ItemType::Item(item), extra.count));
    }
    Ok(drop)
}

fn parse_key(hive: &str, token: &str) -> Result<RegistryKey, DropTableError> {
    RegistryKey::parse(token).map_err(|source| DropTableError::Key {
        hive: hive.to_string(),
        token: token.to_string(),
        source,
    })
}

fn check_chance(
    hive: &str,
    species: &str,
    field: &'static str,
    value: f64,
) -> Result<(), DropTableError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        return Ok(());
    }
    Err(DropTableError::Chance {
        hive: hive.to_string(),
        species: species.to_string(),
        field,
        value,
    })
}

/// Install every table in `json`, or none if any hive is invalid.
///
/// Returns the number of hive tables installed.
pub fn apply_drop_tables_str(
    registry: &HiveRegistry,
    json: &str,
) -> Result<usize, DropTableError> {
    let tables = parse_tables_strict(json)?;
    let count = tables.len();
    for (hive, drops) in tables {
        registry.replace(&hive, drops);
    }
    Ok(count)
}

/// Load drop tables from `path`, failing on the first problem.
pub fn load_drop_tables_strict(registry: &HiveRegistry, path: &Path) -> Result<usize> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read drop tables {}", path.display()))?;
    let count = apply_drop_tables_str(registry, &contents)
        .with_context(|| format!("Invalid drop tables in {}", path.display()))?;
    info!("Loaded {count} hive drop tables from {}", path.display());
    Ok(count)
}

/// Load drop tables from `path`, skipping hives that fail validation.
///
/// An unreadable or unparsable file installs nothing. Returns the number of
/// hive tables installed.
pub fn load_drop_tables_lenient(registry: &HiveRegistry, path: &Path) -> usize {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            warn!("Failed to read drop tables {}: {err}", path.display());
            return 0;
        }
    };

    let file: DropFile = match serde_json::from_str(&contents) {
        Ok(file) => file,
        Err(err) => {
            warn!("Failed to parse drop tables {}: {err}", path.display());
            return 0;
        }
    };

    let mut seen = BTreeSet::new();
    let mut installed = 0;
    for def in &file.hives {
        match parse_hive(def) {
            Ok((hive, drops)) => {
                if !seen.insert(hive.clone()) {
                    warn!(
                        "Ignoring duplicate drop table for hive '{hive}' in {}",
                        path.display()
                    );
                    continue;
                }
                registry.replace(&hive, drops);
                installed += 1;
            }
            Err(err) => {
                warn!("Ignoring drop table from {}: {err}", path.display());
            }
        }
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::DropTable;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_file(tag: &str) -> std::path::PathBuf {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("hivecraft_{tag}_{timestamp}.json"))
    }

    const FOREST: &str = r#"{"hives":[{"hive":"forest","drops":[
        {"species":"hive:forest","chance":0.8,"extras":[{"item":"honey_comb","count":2}]},
        {"species":"valiant","chance":0.03,"ignoble_chance":0.5}
    ]}]}"#;

    #[test]
    fn applies_tables_in_order() {
        let registry = HiveRegistry::new();
        assert_eq!(apply_drop_tables_str(&registry, FOREST).unwrap(), 1);

        let drops = registry.lookup("forest");
        assert_eq!(drops.len(), 2);
        assert_eq!(drops[0].chance(0), 0.8);
        assert_eq!(drops[0].extra_items(0).len(), 1);
        assert_eq!(drops[0].extra_items(0)[0].count, 2);
        assert_eq!(drops[1].ignoble_chance(0), 0.5);
        assert_eq!(drops[1].rare_organism().species().to_string(), "hive:valiant");
    }

    #[test]
    fn rejects_chance_outside_unit_interval() {
        let registry = HiveRegistry::new();
        let err = apply_drop_tables_str(
            &registry,
            r#"{"hives":[{"hive":"desert","drops":[{"species":"modest","chance":1.5}]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DropTableError::Chance { field: "chance", .. }));
        assert!(registry.lookup("desert").is_empty());
    }

    #[test]
    fn rejects_swarm_unknown_and_duplicate_hives() {
        let registry = HiveRegistry::new();
        assert!(matches!(
            apply_drop_tables_str(&registry, r#"{"hives":[{"hive":"swarm"}]}"#),
            Err(DropTableError::UnknownHive(_))
        ));
        assert!(matches!(
            apply_drop_tables_str(&registry, r#"{"hives":[{"hive":"nether"}]}"#),
            Err(DropTableError::UnknownHive(_))
        ));
        assert!(matches!(
            apply_drop_tables_str(&registry, r#"{"hives":[{"hive":"end"},{"hive":"End"}]}"#),
            Err(DropTableError::DuplicateHive(_))
        ));
    }

    #[test]
    fn strict_load_reports_path() {
        let path = unique_temp_file("strict");
        fs::write(
            &path,
            r#"{"hives":[{"hive":"snow","drops":[{"species":"Wintry","chance":0.8}]}]}"#,
        )
        .expect("write drop tables");

        let registry = HiveRegistry::new();
        let err = load_drop_tables_strict(&registry, &path).expect_err("bad key should fail");
        let msg = format!("{err:#}");
        assert!(msg.contains("Invalid drop tables"), "got: {msg}");
        assert!(msg.contains("Wintry"), "got: {msg}");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn lenient_load_skips_bad_hives() {
        let path = unique_temp_file("lenient");
        fs::write(
            &path,
            r#"{"hives":[
                {"hive":"jungle","drops":[{"species":"tropical","chance":0.8}]},
                {"hive":"swamp","drops":[{"species":"marshy","chance":-1}]},
                {"hive":"meadows","drops":[{"species":"meadows","chance":0.8,
                    "extras":[{"item":"pollen","count":0}]}]}
            ]}"#,
        )
        .expect("write drop tables");

        let registry = HiveRegistry::new();
        assert_eq!(load_drop_tables_lenient(&registry, &path), 1);
        assert_eq!(registry.hive_names(), vec!["jungle".to_string()]);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn lenient_load_survives_missing_file() {
        let registry = HiveRegistry::new();
        let path = unique_temp_file("missing");
        assert_eq!(load_drop_tables_lenient(&registry, &path), 0);
    }
}
