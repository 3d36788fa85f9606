//! The scalar leaf shapes a parsed configuration document can contain.
//!
//! This module provides [`Scalar`], the tagged union of non-mapping,
//! non-sequence values: null, booleans, integers, floats, and text. It is the
//! shape wrapped by [`crate::Masked`] and stored at the leaves of
//! [`crate::AttrMap`] trees when no masking applies.

use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

/// A configuration leaf value.
///
/// Equality against raw primitives is strict per variant: `Scalar::Str("123")`
/// equals `"123"` but not `123`. Floats use total comparison so that `Scalar`
/// (and the masked values wrapping it) can implement `Eq` and `Hash` and be
/// used as keys, the same choice `serde_yaml::Value` makes.
///
/// # Example
///
/// ```rust
/// use secured::Scalar;
///
/// let port = Scalar::from(5432i64);
/// assert_eq!(port, 5432i64);
/// assert_eq!(port.to_string(), "5432");
/// ```
#[derive(Clone, Debug)]
pub enum Scalar {
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A text value.
    Str(String),
}

impl Scalar {
    /// Returns the text if this is a `Str` scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is an `Int` scalar.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float if this is a `Float` scalar.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the boolean if this is a `Bool` scalar.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Whether this scalar is the explicit null.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Converts a parsed YAML number into its scalar form.
    ///
    /// Numbers outside the `i64` range fall back to their float rendering.
    #[must_use]
    pub(crate) fn from_number(number: &serde_yaml::Number) -> Self {
        number.as_i64().map_or_else(
            || number.as_f64().map_or(Self::Null, Self::Float),
            Self::Int,
        )
    }

    /// Renders this scalar as a plain `serde_yaml::Value`.
    #[must_use]
    pub fn to_yaml(&self) -> serde_yaml::Value {
        match self {
            Self::Null => serde_yaml::Value::Null,
            Self::Bool(b) => serde_yaml::Value::Bool(*b),
            Self::Int(i) => serde_yaml::Value::Number((*i).into()),
            Self::Float(f) => serde_yaml::Value::Number((*f).into()),
            Self::Str(s) => serde_yaml::Value::String(s.clone()),
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => std::fmt::Display::fmt(b, f),
            Self::Int(i) => std::fmt::Display::fmt(i, f),
            Self::Float(x) => std::fmt::Display::fmt(x, f),
            Self::Str(s) => f.write_str(s),
        }
    }
}

// =============================================================================
// Equality and hashing
// =============================================================================

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            // Total comparison: NaN equals NaN, and -0.0 differs from 0.0,
            // consistent with the bitwise hash below.
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b) == std::cmp::Ordering::Equal,
            (Self::Str(a), Self::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Scalar {}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Bool(b) => b.hash(state),
            Self::Int(i) => i.hash(state),
            Self::Float(f) => f.to_bits().hash(state),
            Self::Str(s) => s.hash(state),
        }
    }
}

impl PartialEq<str> for Scalar {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Scalar {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<String> for Scalar {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == Some(other.as_str())
    }
}

impl PartialEq<i64> for Scalar {
    fn eq(&self, other: &i64) -> bool {
        self.as_i64() == Some(*other)
    }
}

impl PartialEq<f64> for Scalar {
    fn eq(&self, other: &f64) -> bool {
        self.as_f64() == Some(*other)
    }
}

impl PartialEq<bool> for Scalar {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

impl PartialEq<Scalar> for str {
    fn eq(&self, other: &Scalar) -> bool {
        other == self
    }
}

impl PartialEq<Scalar> for String {
    fn eq(&self, other: &Scalar) -> bool {
        other == self
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Str(s) => serializer.serialize_str(s),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use super::*;

    fn hash_of(scalar: &Scalar) -> u64 {
        let mut hasher = DefaultHasher::new();
        scalar.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equality_is_strict_per_variant() {
        assert_eq!(Scalar::from("123"), "123");
        assert_ne!(Scalar::from("123"), Scalar::from(123i64));
        assert_eq!(Scalar::from(true), true);
    }

    #[test]
    fn nan_is_equal_to_itself() {
        let nan = Scalar::Float(f64::NAN);
        assert_eq!(nan, nan.clone());
        assert_eq!(hash_of(&nan), hash_of(&nan.clone()));
    }

    #[test]
    fn equal_scalars_hash_equally() {
        assert_eq!(hash_of(&Scalar::from("abc")), hash_of(&Scalar::from("abc")));
        assert_eq!(hash_of(&Scalar::from(7i64)), hash_of(&Scalar::from(7i64)));
    }

    #[test]
    fn display_renders_the_raw_value() {
        assert_eq!(Scalar::Null.to_string(), "null");
        assert_eq!(Scalar::from("plain").to_string(), "plain");
        assert_eq!(Scalar::from(false).to_string(), "false");
    }

    #[test]
    fn yaml_numbers_prefer_integers() {
        let n: serde_yaml::Number = 42i64.into();
        assert_eq!(Scalar::from_number(&n), Scalar::Int(42));
        let f: serde_yaml::Number = 1.5f64.into();
        assert_eq!(Scalar::from_number(&f), Scalar::Float(1.5));
    }
}
