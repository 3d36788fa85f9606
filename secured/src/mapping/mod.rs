//! The nested configuration tree and its two mapping representations.
//!
//! This module provides:
//!
//! - **`node`**: [`ConfigNode`], [`PlainMap`], and the shared recursive
//!   conversion applied on every insertion
//! - **`attr_map`**: [`AttrMap`], the attribute-accessible, policy-carrying
//!   mapping
//!
//! The secure policy itself lives in `crate::policy`.

mod attr_map;
mod node;

pub use attr_map::AttrMap;
pub use node::{ConfigNode, PlainMap};
pub(crate) use node::{convert, convert_plain};
