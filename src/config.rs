use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

const DEFAULT_CONFIG_PATH: &str = "config/hivecraft.toml";
const DEFAULT_DROP_TABLES_PATH: &str = "config/hive_drops.json";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimConfig {
    /// World seed mixed into every destruction's rng.
    pub world_seed: u64,
    /// Fortune level used when the command line does not give one.
    pub fortune: u8,
    /// Drop-table JSON file.
    pub drop_tables: PathBuf,
    /// Hives destroyed per run.
    pub trials: u64,
    /// Fail instead of skipping invalid hives in the drop tables.
    pub strict_drop_tables: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_seed: 20111,
            fortune: 0,
            drop_tables: PathBuf::from(DEFAULT_DROP_TABLES_PATH),
            trials: 1,
            strict_drop_tables: false,
        }
    }
}

impl SimConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents).unwrap_or_else(|err| {
                warn!("Failed to parse {}: {err}. Using defaults", path.display());
                SimConfig::default()
            }),
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!("Config not found at {}. Using defaults", path.display());
                }
                SimConfig::default()
            }
        }
    }

    fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
