//! The configuration tree node and the shared conversion rule.
//!
//! This module provides:
//!
//! - [`ConfigNode`]: Tagged union of the shapes a configuration tree holds
//! - [`PlainMap`]: The plain (non-attribute) mapping representation
//! - [`convert`] / [`convert_plain`]: The recursive conversion both
//!   [`AttrMap`](crate::AttrMap) and the facade apply on insertion
//!
//! Both conversion paths share one leaf-masking rule, so the two mapping
//! representations produce identical masking for identical input trees.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::attr_map::AttrMap;
use crate::error::{Error, Result};
use crate::masked::Masked;
use crate::policy::MaskPolicy;
use crate::scalar::Scalar;

/// A plain, insertion-ordered nested mapping.
pub type PlainMap = IndexMap<String, ConfigNode>;

/// One node of a configuration tree.
///
/// Nested mappings take one of two representations: [`ConfigNode::Map`]
/// (attribute-accessible, policy-carrying) or [`ConfigNode::Plain`] (a bare
/// ordered mapping). The representation is an access-sugar concern, not a
/// semantic one: node equality compares `Map` and `Plain` entry-for-entry,
/// and a [`Masked`] node equals a [`Scalar`] node with the same content as
/// its original.
#[derive(Clone, Debug)]
pub enum ConfigNode {
    /// An unmasked leaf.
    Scalar(Scalar),
    /// A masked leaf.
    Masked(Masked),
    /// A nested attribute-accessible mapping.
    Map(AttrMap),
    /// A nested plain mapping.
    Plain(PlainMap),
    /// A sequence of nodes.
    Seq(Vec<ConfigNode>),
}

impl ConfigNode {
    /// Reads the entry for `key` from a mapping node.
    ///
    /// Fails with [`Error::NotFound`] when the key is absent, or when this
    /// node is not a mapping at all — never a silent default. Chains nested
    /// lookups naturally: `root.get("db")?.get("host")?`.
    pub fn get(&self, key: &str) -> Result<&ConfigNode> {
        let entry = match self {
            Self::Map(map) => map.get_opt(key),
            Self::Plain(map) => map.get(key),
            _ => None,
        };
        entry.ok_or_else(|| Error::NotFound {
            container: self.container_name(),
            key: key.to_owned(),
        })
    }

    /// Returns the masked leaf if this node is one.
    #[must_use]
    pub fn as_masked(&self) -> Option<&Masked> {
        match self {
            Self::Masked(masked) => Some(masked),
            _ => None,
        }
    }

    /// Returns the unmasked leaf if this node is one.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Returns the attribute-accessible mapping if this node is one.
    #[must_use]
    pub fn as_map(&self) -> Option<&AttrMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Whether this node is a mapping in either representation.
    #[must_use]
    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Map(_) | Self::Plain(_))
    }

    /// Explicitly project the whole subtree with every mask removed.
    ///
    /// Masked leaves yield their originals; mappings of either representation
    /// yield plain value mappings; sequences recurse. Like
    /// [`Masked::expose_original`], the name is the audit trail.
    #[must_use]
    pub fn expose_original(&self) -> serde_yaml::Value {
        match self {
            Self::Scalar(scalar) => scalar.to_yaml(),
            Self::Masked(masked) => masked.expose_original().to_yaml(),
            Self::Map(map) => mapping_value(map.iter()),
            Self::Plain(map) => mapping_value(map.iter().map(|(k, v)| (k.as_str(), v))),
            Self::Seq(items) => {
                serde_yaml::Value::Sequence(items.iter().map(Self::expose_original).collect())
            }
        }
    }

    fn container_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "Scalar",
            Self::Masked(_) => "Masked",
            Self::Map(_) => "AttrMap",
            Self::Plain(_) => "PlainMap",
            Self::Seq(_) => "Seq",
        }
    }
}

fn mapping_value<'a>(
    entries: impl Iterator<Item = (&'a str, &'a ConfigNode)>,
) -> serde_yaml::Value {
    serde_yaml::Value::Mapping(
        entries
            .map(|(k, v)| (serde_yaml::Value::String(k.to_owned()), v.expose_original()))
            .collect(),
    )
}

impl std::fmt::Display for ConfigNode {
    /// Leaves render as themselves — a masked leaf shows its placeholder.
    /// Containers render their masked YAML serialization, so nothing on this
    /// path ever shows an original that masking has hidden.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar(scalar) => std::fmt::Display::fmt(scalar, f),
            Self::Masked(masked) => std::fmt::Display::fmt(masked, f),
            container => {
                let rendered = serde_yaml::to_string(container).map_err(|_| std::fmt::Error)?;
                f.write_str(rendered.trim_end())
            }
        }
    }
}

impl std::ops::Index<&str> for ConfigNode {
    type Output = ConfigNode;

    /// Keyed sugar over [`ConfigNode::get`]; panics like the standard maps
    /// when the key is absent or the node is not a mapping.
    fn index(&self, key: &str) -> &ConfigNode {
        match self.get(key) {
            Ok(node) => node,
            Err(err) => panic!("{err}"),
        }
    }
}

// =============================================================================
// Conversion - the one rule both representations share
// =============================================================================

/// Converts a node into the attribute-accessible representation under `policy`.
///
/// Mappings of either representation become [`AttrMap`]s carrying `policy`
/// (recursing into their entries), sequences convert element-wise, and leaves
/// follow the shared masking rule.
#[must_use]
pub(crate) fn convert(node: ConfigNode, policy: &MaskPolicy) -> ConfigNode {
    match node {
        ConfigNode::Map(map) => {
            ConfigNode::Map(AttrMap::from_entries(map, policy.clone()))
        }
        ConfigNode::Plain(map) => {
            ConfigNode::Map(AttrMap::from_entries(map, policy.clone()))
        }
        ConfigNode::Seq(items) => {
            ConfigNode::Seq(items.into_iter().map(|n| convert(n, policy)).collect())
        }
        leaf => convert_leaf(leaf, policy),
    }
}

/// Converts a node into the plain representation under `policy`.
///
/// Identical to [`convert`] except that mappings stay bare [`PlainMap`]s:
/// the masking applied to leaves is exactly the same.
#[must_use]
pub(crate) fn convert_plain(node: ConfigNode, policy: &MaskPolicy) -> ConfigNode {
    match node {
        ConfigNode::Map(map) => ConfigNode::Plain(
            map.into_iter()
                .map(|(k, v)| (k, convert_plain(v, policy)))
                .collect(),
        ),
        ConfigNode::Plain(map) => ConfigNode::Plain(
            map.into_iter()
                .map(|(k, v)| (k, convert_plain(v, policy)))
                .collect(),
        ),
        ConfigNode::Seq(items) => ConfigNode::Seq(
            items
                .into_iter()
                .map(|n| convert_plain(n, policy))
                .collect(),
        ),
        leaf => convert_leaf(leaf, policy),
    }
}

/// The leaf rule: never double-wrap, mask only when the policy says so.
fn convert_leaf(leaf: ConfigNode, policy: &MaskPolicy) -> ConfigNode {
    match leaf {
        already @ ConfigNode::Masked(_) => already,
        ConfigNode::Scalar(scalar) if policy.is_secure() => {
            ConfigNode::Masked(policy.mask(scalar))
        }
        other => other,
    }
}

// =============================================================================
// Equality - representation-insensitive
// =============================================================================

impl PartialEq for ConfigNode {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => a == b,
            (Self::Masked(a), Self::Masked(b)) => a == b,
            (Self::Masked(a), Self::Scalar(b)) | (Self::Scalar(b), Self::Masked(a)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Plain(a), Self::Plain(b)) => a == b,
            (Self::Map(a), Self::Plain(b)) | (Self::Plain(b), Self::Map(a)) => {
                a.len() == b.len() && a.iter().all(|(k, v)| b.get(k) == Some(v))
            }
            (Self::Seq(a), Self::Seq(b)) => a == b,
            _ => false,
        }
    }
}

impl Serialize for ConfigNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(scalar) => scalar.serialize(serializer),
            Self::Masked(masked) => masked.serialize(serializer),
            Self::Map(map) => map.serialize(serializer),
            Self::Plain(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            Self::Seq(items) => serializer.collect_seq(items),
        }
    }
}

// =============================================================================
// Conversions into nodes
// =============================================================================

impl From<Scalar> for ConfigNode {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<Masked> for ConfigNode {
    fn from(value: Masked) -> Self {
        Self::Masked(value)
    }
}

impl From<AttrMap> for ConfigNode {
    fn from(value: AttrMap) -> Self {
        Self::Map(value)
    }
}

impl From<PlainMap> for ConfigNode {
    fn from(value: PlainMap) -> Self {
        Self::Plain(value)
    }
}

impl From<Vec<ConfigNode>> for ConfigNode {
    fn from(value: Vec<ConfigNode>) -> Self {
        Self::Seq(value)
    }
}

impl From<&str> for ConfigNode {
    fn from(value: &str) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<String> for ConfigNode {
    fn from(value: String) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<i64> for ConfigNode {
    fn from(value: i64) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<i32> for ConfigNode {
    fn from(value: i32) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<f64> for ConfigNode {
    fn from(value: f64) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<bool> for ConfigNode {
    fn from(value: bool) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<serde_yaml::Value> for ConfigNode {
    fn from(value: serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Null => Self::Scalar(Scalar::Null),
            serde_yaml::Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            serde_yaml::Value::Number(n) => Self::Scalar(Scalar::from_number(&n)),
            serde_yaml::Value::String(s) => Self::Scalar(Scalar::Str(s)),
            serde_yaml::Value::Sequence(seq) => {
                Self::Seq(seq.into_iter().map(Into::into).collect())
            }
            serde_yaml::Value::Mapping(mapping) => Self::Plain(
                mapping
                    .into_iter()
                    .map(|(k, v)| (key_text(&k), Self::from(v)))
                    .collect(),
            ),
            serde_yaml::Value::Tagged(tagged) => Self::from(tagged.value),
        }
    }
}

/// Renders a YAML mapping key as text; non-string keys keep their scalar rendering.
fn key_text(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Null => "null".to_owned(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_owned())
            .unwrap_or_default(),
    }
}

// =============================================================================
// Tests
// =============================================================================
