//! Structured item tag payload.
//!
//! Items may carry an arbitrary tree of named values (custom data, lore,
//! usage lists). Maps are ordered so that iteration and serialization stay
//! deterministic, mirroring how block entity and entity metadata are stored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Errors produced while building a tag from textual input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// The input was not valid JSON.
    #[error("invalid tag: {0}")]
    Json(String),
    /// The root value was not an object.
    #[error("tag root must be an object")]
    NotCompound,
    /// The input contained a value that has no tag representation.
    #[error("unsupported {kind} value at '{path}'")]
    Unsupported {
        /// Dotted path of the offending value.
        path: String,
        /// JSON kind that was rejected.
        kind: &'static str,
    },
}

/// Ordered map of named tag values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCompound {
    entries: BTreeMap<String, Tag>,
}

/// A single tag value.
///
/// Floats are intentionally omitted; gameplay-affecting values should be stored
/// as integers (e.g., fixed-point) to preserve determinism across platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Tag {
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Int(i64),
    /// UTF-8 string value.
    String(String),
    /// Ordered list of values.
    List(Vec<Tag>),
    /// Nested compound.
    Compound(TagCompound),
}

impl TagCompound {
    /// Create an empty compound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object literal (`{"key": value, ...}`) into a compound.
    pub fn from_json_str(input: &str) -> Result<Self, TagError> {
        let value: serde_json::Value =
            serde_json::from_str(input).map_err(|err| TagError::Json(err.to_string()))?;
        Self::from_json(&value)
    }

    /// Convert a JSON value into a compound. The root must be an object.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, TagError> {
        match Tag::from_json(value, "")? {
            Tag::Compound(compound) => Ok(compound),
            _ => Err(TagError::NotCompound),
        }
    }

    /// Render this compound as JSON (used for feedback and display).
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries
                .iter()
                .map(|(key, tag)| (key.clone(), tag.to_json()))
                .collect(),
        )
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, key: impl Into<String>, value: Tag) -> Option<Tag> {
        self.entries.insert(key.into(), value)
    }

    /// Get a value.
    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.entries.get(key)
    }

    /// Remove a value.
    pub fn remove(&mut self, key: &str) -> Option<Tag> {
        self.entries.remove(key)
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate over entries in deterministic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Tag)> {
        self.entries.iter()
    }

    /// Returns true if the compound has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Nested compound stored under `key`, if present and a compound.
    pub fn compound(&self, key: &str) -> Option<&TagCompound> {
        match self.entries.get(key) {
            Some(Tag::Compound(compound)) => Some(compound),
            _ => None,
        }
    }

    /// Strings stored in the list under `key`. Non-string elements are skipped,
    /// a missing or non-list value reads as an empty list.
    pub fn string_list(&self, key: &str) -> Vec<String> {
        match self.entries.get(key) {
            Some(Tag::List(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Tag::String(s) => Some(s.clone()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Store `values` as a string list under `key`.
    pub fn put_string_list(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.entries.insert(
            key.into(),
            Tag::List(values.into_iter().map(Tag::String).collect()),
        );
    }

    /// Deep-merge `other` into `self`.
    ///
    /// Compounds present on both sides are merged recursively; every other
    /// value from `other` replaces the existing one.
    pub fn merge(&mut self, other: &TagCompound) {
        for (key, incoming) in &other.entries {
            match (self.entries.get_mut(key), incoming) {
                (Some(Tag::Compound(existing)), Tag::Compound(patch)) => existing.merge(patch),
                _ => {
                    self.entries.insert(key.clone(), incoming.clone());
                }
            }
        }
    }

    /// Returns true if every entry of `pattern` is matched by this compound.
    ///
    /// Lists match when every pattern element matches some element of the
    /// target list, regardless of order.
    pub fn matches(&self, pattern: &TagCompound) -> bool {
        pattern.entries.iter().all(|(key, expected)| {
            self.entries
                .get(key)
                .is_some_and(|actual| actual.matches(expected))
        })
    }
}

impl fmt::Display for TagCompound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl Tag {
    fn from_json(value: &serde_json::Value, path: &str) -> Result<Self, TagError> {
        use serde_json::Value;
        let unsupported = |kind| TagError::Unsupported {
            path: path.to_string(),
            kind,
        };
        match value {
            Value::Null => Err(unsupported("null")),
            Value::Bool(b) => Ok(Tag::Bool(*b)),
            Value::Number(n) => n.as_i64().map(Tag::Int).ok_or_else(|| {
                unsupported(if n.is_f64() { "float" } else { "integer out of range" })
            }),
            Value::String(s) => Ok(Tag::String(s.clone())),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| Tag::from_json(item, &format!("{path}[{i}]")))
                .collect::<Result<Vec<_>, _>>()
                .map(Tag::List),
            Value::Object(map) => {
                let mut compound = TagCompound::new();
                for (key, item) in map {
                    let child = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{path}.{key}")
                    };
                    compound.insert(key.clone(), Tag::from_json(item, &child)?);
                }
                Ok(Tag::Compound(compound))
            }
        }
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            Tag::Bool(b) => serde_json::Value::Bool(*b),
            Tag::Int(i) => serde_json::Value::from(*i),
            Tag::String(s) => serde_json::Value::String(s.clone()),
            Tag::List(items) => serde_json::Value::Array(items.iter().map(Tag::to_json).collect()),
            Tag::Compound(compound) => compound.to_json(),
        }
    }

    fn matches(&self, pattern: &Tag) -> bool {
        match (self, pattern) {
            (Tag::Compound(actual), Tag::Compound(expected)) => actual.matches(expected),
            (Tag::List(actual), Tag::List(expected)) => expected
                .iter()
                .all(|wanted| actual.iter().any(|item| item.matches(wanted))),
            _ => self == pattern,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compound_orders_keys() {
        let mut tag = TagCompound::new();
        tag.insert("b", Tag::Bool(true));
        tag.insert("a", Tag::Bool(false));

        let keys: Vec<_> = tag.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn parses_nested_json() {
        let tag = TagCompound::from_json_str(r#"{"display":{"Name":"x"},"Count":3}"#).unwrap();
        assert_eq!(tag.get("Count"), Some(&Tag::Int(3)));
        assert_eq!(
            tag.compound("display").and_then(|d| d.get("Name")),
            Some(&Tag::String("x".into()))
        );
    }

    #[test]
    fn rejects_floats_and_non_objects() {
        let err = TagCompound::from_json_str(r#"{"speed":{"v":1.5}}"#).unwrap_err();
        assert_eq!(
            err,
            TagError::Unsupported {
                path: "speed.v".into(),
                kind: "float"
            }
        );
        assert_eq!(
            TagCompound::from_json_str("[1,2]").unwrap_err(),
            TagError::NotCompound
        );
        assert!(matches!(
            TagCompound::from_json_str("{oops"),
            Err(TagError::Json(_))
        ));
    }

    #[test]
    fn oversized_integers_are_not_called_floats() {
        let err = TagCompound::from_json_str(r#"{"big":18446744073709551615}"#).unwrap_err();
        assert_eq!(
            err,
            TagError::Unsupported {
                path: "big".into(),
                kind: "integer out of range"
            }
        );
        let max = TagCompound::from_json_str(r#"{"v":9223372036854775807}"#).unwrap();
        assert_eq!(max.get("v"), Some(&Tag::Int(i64::MAX)));
    }

    #[test]
    fn merge_is_deep_for_compounds_only() {
        let mut base = TagCompound::from_json_str(r#"{"a":{"x":1,"y":2},"l":[1]}"#).unwrap();
        let patch = TagCompound::from_json_str(r#"{"a":{"y":5},"l":[2]}"#).unwrap();
        base.merge(&patch);
        assert_eq!(
            base,
            TagCompound::from_json_str(r#"{"a":{"x":1,"y":5},"l":[2]}"#).unwrap()
        );
    }

    #[test]
    fn subset_matching() {
        let item = TagCompound::from_json_str(r#"{"a":1,"l":["x","y"],"c":{"d":true}}"#).unwrap();
        assert!(item.matches(&TagCompound::new()));
        assert!(item.matches(&TagCompound::from_json_str(r#"{"l":["y"]}"#).unwrap()));
        assert!(item.matches(&TagCompound::from_json_str(r#"{"c":{}}"#).unwrap()));
        assert!(!item.matches(&TagCompound::from_json_str(r#"{"a":2}"#).unwrap()));
        assert!(!item.matches(&TagCompound::from_json_str(r#"{"missing":1}"#).unwrap()));
    }

    #[test]
    fn string_list_roundtrip() {
        let mut tag = TagCompound::new();
        assert!(tag.string_list("CanDestroy").is_empty());
        tag.put_string_list("CanDestroy", vec!["minecraft:stone".into()]);
        assert_eq!(tag.string_list("CanDestroy"), vec!["minecraft:stone".to_string()]);
    }
}
