//! The attribute-accessible mapping with policy-driven masking.
//!
//! This module provides [`AttrMap`], an insertion-ordered mapping that
//! applies its [`MaskPolicy`] to every value written into it: nested
//! mappings become `AttrMap`s carrying the same policy, and leaves are
//! masked when the policy is secure. Conversion happens eagerly at
//! insertion time; reads are direct dereferences.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::node::{ConfigNode, convert};
use crate::error::{Error, Result};
use crate::policy::MaskPolicy;

/// An ordered mapping that masks what is written into it.
///
/// The policy is fixed at construction and copied to every nested mapping
/// this map creates; it is never mutated by later insertions. Reading an
/// absent key through [`AttrMap::get`] is an error naming this type and the
/// key — never a silent default. The `map[key]` form panics on absence, like
/// the standard maps.
///
/// # Example
///
/// ```rust
/// use secured::{AttrMap, MaskPolicy};
///
/// let mut map = AttrMap::with_policy(MaskPolicy::secured());
/// map.insert("password", "my_secret");
///
/// assert_eq!(map["password"].to_string(), "<Sensitive data secured>");
/// assert_eq!(map["password"].as_masked().unwrap(), &secured::Masked::new("my_secret"));
/// assert!(map.get("missing").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct AttrMap {
    entries: IndexMap<String, ConfigNode>,
    policy: MaskPolicy,
}

impl AttrMap {
    /// Constructs an empty mapping with an open policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs an empty mapping with the given policy.
    #[must_use]
    pub fn with_policy(policy: MaskPolicy) -> Self {
        Self {
            entries: IndexMap::new(),
            policy,
        }
    }

    /// Builds a mapping from initial entries, converting every one of them.
    #[must_use]
    pub fn from_entries<I, K, V>(entries: I, policy: MaskPolicy) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ConfigNode>,
    {
        let mut map = Self::with_policy(policy);
        for (key, value) in entries {
            map.insert(key, value);
        }
        map
    }

    /// The policy applied to values inserted into this mapping.
    #[must_use]
    pub fn policy(&self) -> &MaskPolicy {
        &self.policy
    }

    /// Writes an entry, converting the value under this mapping's policy.
    ///
    /// Returns the node previously stored under `key`, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigNode>) -> Option<ConfigNode> {
        self.entries
            .insert(key.into(), convert(value.into(), &self.policy))
    }

    /// Attribute-style read: the entry for `key`, or [`Error::NotFound`].
    pub fn get(&self, key: &str) -> Result<&ConfigNode> {
        self.entries.get(key).ok_or_else(|| Error::NotFound {
            container: "AttrMap",
            key: key.to_owned(),
        })
    }

    /// The entry for `key`, if present.
    #[must_use]
    pub fn get_opt(&self, key: &str) -> Option<&ConfigNode> {
        self.entries.get(key)
    }

    /// The unmasked value for `key`.
    ///
    /// A masked leaf yields its original; a nested mapping yields a plain
    /// value mapping with every masked leaf replaced by its original,
    /// recursively; anything else is returned as its plain value.
    pub fn original(&self, key: &str) -> Result<serde_yaml::Value> {
        self.get(key).map(ConfigNode::expose_original)
    }

    /// Removes the entry for `key`, preserving the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<ConfigNode> {
        self.entries.shift_remove(key)
    }

    /// Whether `key` has an entry.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl PartialEq for AttrMap {
    /// Entries only: masked values already compare by original, so two maps
    /// holding the same data under different placeholders are equal.
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl std::ops::Index<&str> for AttrMap {
    type Output = ConfigNode;

    fn index(&self, key: &str) -> &ConfigNode {
        match self.entries.get(key) {
            Some(node) => node,
            None => panic!("`AttrMap` has no entry for key `{key}`"),
        }
    }
}

impl IntoIterator for AttrMap {
    type Item = (String, ConfigNode);
    type IntoIter = indexmap::map::IntoIter<String, ConfigNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a AttrMap {
    type Item = (&'a String, &'a ConfigNode);
    type IntoIter = indexmap::map::Iter<'a, String, ConfigNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for AttrMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::masked::Masked;
    use crate::policy::DEFAULT_PLACEHOLDER;

    #[test]
    fn secure_insert_masks_the_value() {
        let mut map = AttrMap::with_policy(MaskPolicy::secured());
        map.insert("password", "my_secret");
        let node = map.get("password").unwrap();
        assert_eq!(node.to_string(), DEFAULT_PLACEHOLDER);
        assert_eq!(*node, ConfigNode::from("my_secret"));
    }

    #[test]
    fn open_insert_stores_the_raw_value() {
        let mut map = AttrMap::new();
        map.insert("name", "app");
        assert!(map["name"].as_scalar().is_some());
    }

    #[test]
    fn nested_mappings_inherit_the_policy() {
        let policy = MaskPolicy::secured().with_placeholder("<Custom Secured>");
        let mut inner = indexmap::IndexMap::new();
        inner.insert("key".to_owned(), ConfigNode::from("value"));
        let map = AttrMap::from_entries([("nested", ConfigNode::Plain(inner))], policy.clone());

        let nested = map["nested"].as_map().expect("nested should be an AttrMap");
        assert_eq!(nested.policy(), &policy);
        assert_eq!(nested["key"].to_string(), "<Custom Secured>");
    }

    #[test]
    fn missing_key_errors_name_the_type_and_key() {
        let map = AttrMap::new();
        let err = map.get("missing").unwrap_err();
        assert_eq!(err.to_string(), "`AttrMap` has no entry for key `missing`");
    }

    #[test]
    #[should_panic(expected = "has no entry for key `missing`")]
    fn indexing_a_missing_key_panics() {
        let map = AttrMap::new();
        let _ = &map["missing"];
    }

    #[test]
    fn original_unwraps_masked_leaves_recursively() {
        let mut map = AttrMap::with_policy(MaskPolicy::secured());
        map.insert("token", "abc123");
        let mut inner = indexmap::IndexMap::new();
        inner.insert("password".to_owned(), ConfigNode::from("hunter2"));
        map.insert("db", ConfigNode::Plain(inner));

        assert_eq!(
            map.original("token").unwrap(),
            serde_yaml::Value::String("abc123".to_owned())
        );
        assert_eq!(
            map.original("db").unwrap()["password"],
            serde_yaml::Value::String("hunter2".to_owned())
        );
    }

    #[test]
    fn inserting_an_already_masked_value_keeps_it() {
        let mut map = AttrMap::with_policy(MaskPolicy::secured());
        map.insert("key", Masked::with_placeholder("v", "<kept>"));
        assert_eq!(map["key"].as_masked().unwrap().placeholder(), "<kept>");
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut map = AttrMap::new();
        map.insert("b", 1i64);
        map.insert("a", 2i64);
        map.insert("c", 3i64);
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn serialization_shows_placeholders_only() {
        let mut map = AttrMap::with_policy(MaskPolicy::secured());
        map.insert("password", "my_secret");
        let json = serde_json::to_string(&map).unwrap();
        assert!(json.contains(DEFAULT_PLACEHOLDER));
        assert!(!json.contains("my_secret"));
    }
}
