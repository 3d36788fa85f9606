//! Secrets masking for structured configuration data.
//!
//! This crate separates:
//! - **Masked values**: a wrapped scalar whose display is always a placeholder.
//! - **Masked trees**: nested mappings that apply a `(secure, placeholder)`
//!   policy to every leaf as documents are loaded.
//!
//! The [`Secured`] facade loads YAML documents, exposes each one as a named
//! root, looks keys up in the environment, and composes derived secrets from
//! masked parts without the parts or the result ever becoming printable.
//!
//! What this crate does:
//! - wraps scalars so `Display`, `Debug`, and `Serialize` show a placeholder
//! - keeps equality, hashing, and numeric conversion transparent to the original
//! - recursively masks nested mappings under a policy fixed at construction
//! - substitutes originals into templates, returning a freshly masked result
//!
//! What it does not do:
//! - encrypt, store, or transmit secrets
//! - control access or keep an audit trail
//!
//! It prevents *accidental* exposure — a debug print, a log line, a
//! serialized dump — not deliberate extraction, which is exactly what the
//! `expose_original` escape hatches are for.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::missing_const_for_fn,
    clippy::missing_errors_doc,
    clippy::needless_pass_by_value,
    clippy::option_if_let_else,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::use_self
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

// Module declarations
mod config;
mod diag;
mod error;
mod mapping;
mod masked;
mod policy;
mod scalar;

// Re-exports from the config module
pub use config::{
    ComposeSource, DocumentLoader, EnvAccessor, KeyProvider, LoadError, ProcessEnv, Secured,
    SecuredBuilder, YamlFileLoader,
};
// Re-exports from the diagnostics module
pub use diag::{DiagnosticSink, TracingSink, default_sink};
// Re-exports from the error module
pub use error::{Error, Result};
// Re-exports from the mapping module
pub use mapping::{AttrMap, ConfigNode, PlainMap};
// Re-exports from the masked module
pub use masked::{Converted, Masked};
// Re-exports from the policy module
pub use policy::{DEFAULT_PLACEHOLDER, MaskPolicy};
// Re-exports from the scalar module
pub use scalar::Scalar;
