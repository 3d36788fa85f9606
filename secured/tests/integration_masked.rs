//! Tests for the masked value: `Masked` and `Converted<T>`.
//!
//! These tests verify:
//! - Placeholder-only display, debug, and serialization
//! - Original-delegating equality and hashing
//! - Numeric conversion with placeholder fallback

use std::collections::HashSet;

use secured::{Converted, DEFAULT_PLACEHOLDER, Masked, Scalar};

mod display {
    use super::*;

    #[test]
    fn shows_the_default_placeholder() {
        let masked = Masked::new("your_actual_database_url");
        assert_eq!(masked.to_string(), DEFAULT_PLACEHOLDER);
        assert_eq!(format!("{masked:?}"), DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn shows_a_custom_placeholder() {
        let masked = Masked::with_placeholder("your_actual_database_url", "<Data Hidden>");
        assert_eq!(masked.to_string(), "<Data Hidden>");
    }

    #[test]
    fn never_leaks_through_format_machinery() {
        let masked = Masked::new("hunter2");
        let rendered = format!("value={masked}, debug={masked:?}, padded={masked:>40}");
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn serializes_as_the_placeholder() {
        let masked = Masked::with_placeholder("sk_live_abc123", "<Secured>");
        assert_eq!(serde_json::to_string(&masked).unwrap(), "\"<Secured>\"");
    }
}

mod equality {
    use super::*;

    #[test]
    fn compares_against_the_raw_original() {
        let masked = Masked::new("123");
        assert_eq!(masked, "123");
        assert_eq!(masked, "123".to_owned());
        assert_ne!(masked, "456");
    }

    #[test]
    fn compares_against_raw_numbers_and_booleans() {
        assert_eq!(Masked::new(5432i64), 5432i64);
        assert_eq!(Masked::new(2.5), 2.5);
        assert_eq!(Masked::new(true), true);
    }

    #[test]
    fn placeholder_never_participates_in_equality() {
        let a = Masked::with_placeholder("same", "<one>");
        let b = Masked::with_placeholder("same", "<two>");
        assert_eq!(a, b);
        assert_ne!(a, "<one>");
    }

    #[test]
    fn scalars_and_masked_values_interchange() {
        let masked = Masked::new("value");
        assert_eq!(masked, Scalar::from("value"));
        assert_eq!(Scalar::from("value"), masked);
    }
}

mod hashing {
    use super::*;

    #[test]
    fn equal_originals_collapse_in_a_set() {
        let mut set = HashSet::new();
        set.insert(Masked::with_placeholder("token", "<a>"));
        set.insert(Masked::with_placeholder("token", "<b>"));
        set.insert(Masked::new("other"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn masked_values_work_as_map_keys() {
        let mut map = std::collections::HashMap::new();
        map.insert(Masked::new("api_key"), 1);
        map.insert(Masked::new("api_key"), 2);
        assert_eq!(map.len(), 1);
        assert_eq!(map[&Masked::new("api_key")], 2);
    }
}

mod conversion {
    use super::*;

    #[test]
    fn integer_round_trip() {
        assert_eq!(Masked::new("42").to_i64(), 42);
        assert_eq!(Masked::new(42i64).to_i64(), 42);
    }

    #[test]
    fn integer_failure_yields_the_placeholder() {
        let masked = Masked::with_placeholder("abc", "<Secured>");
        assert_eq!(masked.to_i64(), Converted::Placeholder("<Secured>".to_owned()));
        assert_eq!(masked.to_i64().to_string(), "<Secured>");
    }

    #[test]
    fn float_round_trip() {
        assert_eq!(Masked::new("3.25").to_f64(), 3.25);
        assert_eq!(Masked::new(3i64).to_f64(), 3.0);
    }

    #[test]
    fn float_failure_yields_the_placeholder() {
        assert!(!Masked::new("not a number").to_f64().is_value());
    }

    #[test]
    fn converted_value_extracts_the_number() {
        assert_eq!(Masked::new("7").to_i64().value(), Some(7));
        assert_eq!(Masked::new("x").to_i64().value(), None);
    }
}

mod exposure {
    use super::*;

    #[test]
    fn expose_original_returns_the_real_value() {
        let masked = Masked::new("db-server.local");
        assert_eq!(*masked.expose_original(), "db-server.local");
    }

    #[test]
    fn into_original_consumes_the_wrapper() {
        let original = Masked::new(5432i64).into_original();
        assert_eq!(original, 5432i64);
    }
}
