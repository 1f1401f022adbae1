//! Bee individuals as seen by hive drops.
//!
//! Genetics live elsewhere; drops only need the species a bee belongs to and
//! whether it was found in the wild.

use crate::registry::RegistryKey;
use serde::{Deserialize, Serialize};

/// Life stage a bee item represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeeType {
    /// Male bee.
    Drone,
    /// Unmated female.
    Princess,
}

impl BeeType {
    /// Lowercase name used in item labels.
    pub fn name(self) -> &'static str {
        match self {
            BeeType::Drone => "drone",
            BeeType::Princess => "princess",
        }
    }
}

/// A single bee organism.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bee {
    species: RegistryKey,
    natural: bool,
}

impl Bee {
    /// A wild bee of `species`.
    pub fn new(species: RegistryKey) -> Self {
        Self {
            species,
            natural: true,
        }
    }

    /// Species key this bee was generated from.
    pub fn species(&self) -> &RegistryKey {
        &self.species
    }

    /// `false` once the bee has been flagged ignoble.
    pub fn is_natural(&self) -> bool {
        self.natural
    }

    /// Flag the bee as artificially sourced (ignoble). Irreversible.
    pub fn mark_non_natural(&mut self) {
        self.natural = false;
    }
}
