//! Namespaced registry keys.
//!
//! Bee species and loose items are referenced from drop tables by stable
//! string keys such as `hive:forest` or `hive:honey_comb`. Keys compare by
//! `(namespace, path)` so tables iterate deterministically.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Namespace assumed when a key is written without one.
pub const DEFAULT_NAMESPACE: &str = "hive";

const MAX_NAMESPACE_LEN: usize = 64;
const MAX_PATH_LEN: usize = 128;

/// Reasons a string cannot become a [`RegistryKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryKeyError {
    /// Input was empty after trimming.
    #[error("registry key cannot be empty")]
    Empty,
    /// The namespace half was empty, too long, or used forbidden characters.
    #[error("invalid registry key namespace '{0}' (allowed: a-z0-9_.-, max 64)")]
    Namespace(String),
    /// The path half was empty, too long, or used forbidden characters.
    #[error("invalid registry key path '{0}' (allowed: a-z0-9_./-, max 128)")]
    Path(String),
}

/// A key of the form `namespace:path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegistryKey {
    namespace: String,
    path: String,
}

impl RegistryKey {
    /// Parse `namespace:path`, or a bare `path` in [`DEFAULT_NAMESPACE`].
    pub fn parse(input: &str) -> Result<Self, RegistryKeyError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(RegistryKeyError::Empty);
        }

        let (namespace, path) = input
            .split_once(':')
            .unwrap_or((DEFAULT_NAMESPACE, input));
        let (namespace, path) = (namespace.trim(), path.trim());

        if !valid_segment(namespace, MAX_NAMESPACE_LEN, false) {
            return Err(RegistryKeyError::Namespace(namespace.to_string()));
        }
        if !valid_segment(path, MAX_PATH_LEN, true) {
            return Err(RegistryKeyError::Path(path.to_string()));
        }

        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Key namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Key path.
    pub fn path(&self) -> &str {
        &self.path
    }
}

fn valid_segment(segment: &str, max_len: usize, allow_slash: bool) -> bool {
    !segment.is_empty()
        && segment.len() <= max_len
        && segment.chars().all(|c| {
            matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.') || (allow_slash && c == '/')
        })
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for RegistryKey {
    type Err = RegistryKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RegistryKey {
    type Error = RegistryKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RegistryKey> for String {
    fn from(key: RegistryKey) -> Self {
        key.to_string()
    }
}
