//! The document loader collaborator.
//!
//! This module provides:
//!
//! - [`DocumentLoader`]: Parses a source identifier into a nested mapping
//! - [`YamlFileLoader`]: The provided loader — a synchronous file read plus
//!   YAML parse
//! - [`LoadError`]: Per-source failures, always recoverable at the facade
//!
//! Load failures never cross the facade boundary: the facade converts each
//! one into a diagnostic and skips to the next source.

use serde_yaml::Value;
use thiserror::Error;

/// Why a single source failed to load.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The source does not exist or could not be read.
    #[error("document `{source}` could not be read: {io}")]
    NotFound {
        /// The source identifier as given.
        source: String,
        /// The underlying read failure.
        #[source]
        io: std::io::Error,
    },

    /// The source exists but is not parseable.
    #[error("document `{source}` is not valid YAML: {parse}")]
    Parse {
        /// The source identifier as given.
        source: String,
        /// The underlying parse failure.
        #[source]
        parse: serde_yaml::Error,
    },

    /// The source parsed, but its root is not a mapping.
    #[error("document `{path}` does not have a mapping at its root")]
    NotMapping {
        /// The source identifier as given.
        path: String,
    },
}

/// Parses a source identifier into a generic nested mapping.
///
/// Implementations must return a [`Value::Mapping`] root; the provided
/// [`YamlFileLoader`] enforces this. Errors are per-source and non-fatal to
/// facade construction.
pub trait DocumentLoader {
    /// Loads and parses one source.
    fn load(&self, source: &str) -> Result<Value, LoadError>;
}

/// Loads YAML documents from the filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct YamlFileLoader;

impl DocumentLoader for YamlFileLoader {
    fn load(&self, source: &str) -> Result<Value, LoadError> {
        let text = std::fs::read_to_string(source).map_err(|io| LoadError::NotFound {
            source: source.to_owned(),
            io,
        })?;
        let value: Value = serde_yaml::from_str(&text).map_err(|parse| LoadError::Parse {
            source: source.to_owned(),
            parse,
        })?;
        if value.is_mapping() {
            Ok(value)
        } else {
            Err(LoadError::NotMapping {
                path: source.to_owned(),
            })
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_a_mapping_document() {
        let file = write_temp("db:\n  host: localhost\n");
        let value = YamlFileLoader.load(file.path().to_str().unwrap()).unwrap();
        assert!(value.is_mapping());
    }

    #[test]
    fn missing_file_is_a_not_found_error() {
        let err = YamlFileLoader.load("/no/such/file.yaml").unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let file = write_temp("key: [unclosed\n");
        let err = YamlFileLoader.load(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn scalar_root_is_rejected() {
        let file = write_temp("just a string\n");
        let err = YamlFileLoader.load(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, LoadError::NotMapping { .. }));
    }
}
