//! # toml-parser
//!
//! Position-aware TOML front end.
//!
//! Runs the `taplo` parser and turns its DOM into an owned tree where every key
//! and value carries a 1-based [`Location`], so later validation can point at
//! the exact place a setting was written.

mod toml_tree;
mod walker;

pub use toml_tree::{Location, TomlEntry, TomlTable, TomlValue, ValueKind};
pub use walker::{parse, SyntaxError};
