//! Namespaced registry keys.
//!
//! Keys are stable string identifiers (`minecraft:stone`,
//! `minecraft:sharpness`) used by command arguments and by the item tag lists
//! that reference blocks. They are ordered and validated so that lists built
//! from them compare and persist deterministically.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default namespace used when a key omits an explicit namespace.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Error returned when parsing an invalid [`RegistryKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryKeyError {
    /// Nothing but whitespace was supplied.
    #[error("registry key cannot be empty")]
    Empty,
    /// The namespace part is empty, too long, or uses invalid characters.
    #[error("invalid namespace '{0}' (allowed: a-z0-9_.-, max 64)")]
    Namespace(String),
    /// The path part is empty, too long, or uses invalid characters.
    #[error("invalid path '{0}' (allowed: a-z0-9_./-, max 128)")]
    Path(String),
}

/// A namespaced key of the form `namespace:path`.
///
/// Ordering is lexical by `(namespace, path)` and is stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegistryKey {
    namespace: String,
    path: String,
}

impl RegistryKey {
    /// Parse a registry key.
    ///
    /// Accepts either:
    /// - `namespace:path`
    /// - `path` (uses [`DEFAULT_NAMESPACE`])
    pub fn parse(input: &str) -> Result<Self, RegistryKeyError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(RegistryKeyError::Empty);
        }

        let (namespace, path) = input.split_once(':').unwrap_or((DEFAULT_NAMESPACE, input));

        if !valid_segment(namespace, 64, false) {
            return Err(RegistryKeyError::Namespace(namespace.to_string()));
        }
        if !valid_segment(path, 128, true) {
            return Err(RegistryKeyError::Path(path.to_string()));
        }

        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Key in the default namespace.
    pub fn vanilla(path: &str) -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            path: path.to_string(),
        }
    }

    /// Registry key namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Registry key path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the path when the key lives in the default namespace.
    pub fn vanilla_path(&self) -> Option<&str> {
        (self.namespace == DEFAULT_NAMESPACE).then_some(self.path.as_str())
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
