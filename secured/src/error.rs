//! Error taxonomy for masked configuration access.
//!
//! This module provides:
//!
//! - [`Error`]: The crate-wide error type
//! - [`Result`]: Alias for `std::result::Result<T, Error>`
//!
//! Document-loading failures have their own type, [`crate::LoadError`]: they
//! are recoverable (skip-and-continue) and never cross the facade boundary.
//! Everything here is surfaced to the caller immediately.

use thiserror::Error;

/// Alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by masked configuration access.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Attribute-style access named a key the container does not hold.
    #[error("`{container}` has no entry for key `{key}`")]
    NotFound {
        /// Type name of the container that was asked.
        container: &'static str,
        /// The missing key.
        key: String,
    },

    /// A required lookup found no value in the environment or any provider.
    #[error("key `{name}` was not found in the environment or any key provider")]
    EnvNotFound {
        /// The key that was required.
        name: String,
    },

    /// A key resolves from two authoritative sources simultaneously.
    #[error("key `{key}` resolves from both the environment and a key provider")]
    Conflict {
        /// The ambiguous key.
        key: String,
    },

    /// A compose template references a name that was not supplied.
    #[error("template references unknown key `{name}`")]
    Substitution {
        /// The placeholder name the template asked for.
        name: String,
    },

    /// A compose template contains a stray `{` or `}`.
    #[error("template has an unmatched `{{` or `}}`")]
    UnbalancedTemplate,
}
