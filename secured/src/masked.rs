//! The masked value: placeholder display, transparent comparison.
//!
//! This module provides:
//!
//! - [`Masked`]: Wraps one scalar plus a display placeholder
//! - [`Converted<T>`]: Numeric-conversion result that falls back to the placeholder
//!
//! A `Masked` behaves like its underlying scalar for equality, hashing, and
//! numeric conversion, and is opaque for every display path: `Display`,
//! `Debug`, and `serde::Serialize` all emit only the placeholder.

use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

use crate::policy::DEFAULT_PLACEHOLDER;
use crate::scalar::Scalar;

// =============================================================================
// Masked - Scalar wrapper with placeholder display
// =============================================================================

/// A scalar whose display representation is always a placeholder.
///
/// Immutable after construction; superseded by creating a new instance.
/// Comparing a `Masked` to anything compares its original, so a value
/// wrapping `"123"` equals the raw text `"123"`, and two masked values
/// wrapping equal originals are equal and hash equally regardless of their
/// placeholders.
///
/// [`Masked::expose_original`] is the only sanctioned way to retrieve the
/// real value.
///
/// # Example
///
/// ```rust
/// use secured::Masked;
///
/// let url = Masked::new("postgres://db-server.local/app");
/// assert_eq!(url.to_string(), "<Sensitive data secured>");
/// assert_eq!(url, "postgres://db-server.local/app");
/// assert_eq!(*url.expose_original(), "postgres://db-server.local/app");
/// ```
#[derive(Clone)]
pub struct Masked {
    original: Scalar,
    placeholder: String,
}

impl Masked {
    /// Wraps a value using the default placeholder.
    #[must_use]
    pub fn new(original: impl Into<Scalar>) -> Self {
        Self::with_placeholder(original, DEFAULT_PLACEHOLDER)
    }

    /// Wraps a value using a specific placeholder.
    #[must_use]
    pub fn with_placeholder(original: impl Into<Scalar>, placeholder: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            placeholder: placeholder.into(),
        }
    }

    /// The placeholder shown wherever this value is displayed.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Explicitly access the original value.
    ///
    /// This is the deliberate, auditable escape hatch: searching a codebase
    /// for `original` finds every place a real value is extracted.
    #[must_use]
    pub fn expose_original(&self) -> &Scalar {
        &self.original
    }

    /// Consume the wrapper and return the original value.
    #[must_use]
    pub fn into_original(self) -> Scalar {
        self.original
    }

    /// Attempts to read the original as an integer.
    ///
    /// Text is trimmed and parsed, floats truncate toward zero, and booleans
    /// map to 0/1. Anything unparseable yields the placeholder — a
    /// display-safe fallback rather than an error.
    #[must_use]
    pub fn to_i64(&self) -> Converted<i64> {
        match &self.original {
            Scalar::Int(i) => Converted::Value(*i),
            Scalar::Float(f) => Converted::Value(*f as i64),
            Scalar::Bool(b) => Converted::Value(i64::from(*b)),
            Scalar::Str(s) => s
                .trim()
                .parse()
                .map_or_else(|_| self.fallback(), Converted::Value),
            Scalar::Null => self.fallback(),
        }
    }

    /// Attempts to read the original as a float.
    ///
    /// Same contract as [`Masked::to_i64`], widening instead of truncating.
    #[must_use]
    pub fn to_f64(&self) -> Converted<f64> {
        match &self.original {
            Scalar::Int(i) => Converted::Value(*i as f64),
            Scalar::Float(f) => Converted::Value(*f),
            Scalar::Bool(b) => Converted::Value(f64::from(u8::from(*b))),
            Scalar::Str(s) => s
                .trim()
                .parse()
                .map_or_else(|_| self.fallback(), Converted::Value),
            Scalar::Null => self.fallback(),
        }
    }

    fn fallback<T>(&self) -> Converted<T> {
        Converted::Placeholder(self.placeholder.clone())
    }
}

impl std::fmt::Display for Masked {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.placeholder)
    }
}

impl std::fmt::Debug for Masked {
    // The placeholder only: no type name, no field layout, nothing to leak.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.placeholder)
    }
}

impl Serialize for Masked {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.placeholder)
    }
}

// =============================================================================
// Equality and hashing - delegate to the original
// =============================================================================

impl PartialEq for Masked {
    fn eq(&self, other: &Self) -> bool {
        self.original == other.original
    }
}

impl Eq for Masked {}

impl Hash for Masked {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.original.hash(state);
    }
}

impl PartialEq<Scalar> for Masked {
    fn eq(&self, other: &Scalar) -> bool {
        self.original == *other
    }
}

impl PartialEq<Masked> for Scalar {
    fn eq(&self, other: &Masked) -> bool {
        *self == other.original
    }
}

impl PartialEq<str> for Masked {
    fn eq(&self, other: &str) -> bool {
        self.original == *other
    }
}

impl PartialEq<&str> for Masked {
    fn eq(&self, other: &&str) -> bool {
        self.original == **other
    }
}

impl PartialEq<String> for Masked {
    fn eq(&self, other: &String) -> bool {
        self.original == *other
    }
}

impl PartialEq<i64> for Masked {
    fn eq(&self, other: &i64) -> bool {
        self.original == *other
    }
}

impl PartialEq<f64> for Masked {
    fn eq(&self, other: &f64) -> bool {
        self.original == *other
    }
}

impl PartialEq<bool> for Masked {
    fn eq(&self, other: &bool) -> bool {
        self.original == *other
    }
}

impl PartialEq<Masked> for str {
    fn eq(&self, other: &Masked) -> bool {
        other == self
    }
}

impl PartialEq<Masked> for String {
    fn eq(&self, other: &Masked) -> bool {
        other == self
    }
}

// =============================================================================
// Converted - Conversion result with placeholder fallback
// =============================================================================

/// The result of a numeric conversion on a [`Masked`] value.
///
/// Either the parsed number, or the placeholder text when the original does
/// not convert. Displaying a `Converted` is always safe: the failure path
/// shows the placeholder, never the original.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Converted<T> {
    /// The original converted successfully.
    Value(T),
    /// The original did not convert; the placeholder stands in.
    Placeholder(String),
}

impl<T> Converted<T> {
    /// Returns the converted number, if the conversion succeeded.
    #[must_use]
    pub fn value(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Placeholder(_) => None,
        }
    }

    /// Whether the conversion succeeded.
    #[must_use]
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl<T: PartialEq> PartialEq<T> for Converted<T> {
    fn eq(&self, other: &T) -> bool {
        match self {
            Self::Value(v) => v == other,
            Self::Placeholder(_) => false,
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Converted<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(v) => std::fmt::Display::fmt(v, f),
            Self::Placeholder(p) => f.write_str(p),
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

    #[test]
    fn display_and_debug_show_only_the_placeholder() {
        let masked = Masked::new("hunter2");
        assert_eq!(format!("{masked}"), DEFAULT_PLACEHOLDER);
        assert_eq!(format!("{masked:?}"), DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn custom_placeholder_is_respected() {
        let masked = Masked::with_placeholder("hunter2", "<Data Hidden>");
        assert_eq!(masked.to_string(), "<Data Hidden>");
    }

    #[test]
    fn equality_compares_originals() {
        let masked = Masked::new("123");
        assert_eq!(masked, "123");
        assert_eq!("123".to_owned(), masked);
        assert_eq!(masked, Masked::with_placeholder("123", "<other>"));
        assert_ne!(masked, "124");
    }

    #[test]
    fn hash_matches_the_wrapped_scalar() {
        let mut raw = DefaultHasher::new();
        Scalar::from("token").hash(&mut raw);
        let mut wrapped = DefaultHasher::new();
        Masked::new("token").hash(&mut wrapped);
        assert_eq!(raw.finish(), wrapped.finish());
    }

    #[test]
    fn to_i64_parses_or_falls_back() {
        assert_eq!(Masked::new("42").to_i64(), 42);
        assert_eq!(Masked::new(" 42 ").to_i64(), 42);
        assert_eq!(
            Masked::new("abc").to_i64(),
            Converted::Placeholder(DEFAULT_PLACEHOLDER.to_owned())
        );
        assert_eq!(Masked::new(true).to_i64(), 1);
    }

    #[test]
    fn to_f64_parses_or_falls_back() {
        assert_eq!(Masked::new("2.5").to_f64(), 2.5);
        assert_eq!(Masked::new(3i64).to_f64(), 3.0);
        assert!(!Masked::new(Scalar::Null).to_f64().is_value());
    }

    #[test]
    fn converted_displays_safely() {
        assert_eq!(Masked::new("42").to_i64().to_string(), "42");
        assert_eq!(
            Masked::new("abc").to_i64().to_string(),
            DEFAULT_PLACEHOLDER
        );
    }

    #[test]
    fn serialization_emits_the_placeholder() {
        let masked = Masked::new("secret");
        let json = serde_json::to_string(&masked).unwrap();
        assert_eq!(json, format!("\"{DEFAULT_PLACEHOLDER}\""));
    }
}
