//! Path codec for tree addressing.
//!
//! Two layers live here:
//!
//! - the RFC 6901 reference-token codec ([`escape_component`],
//!   [`parse_json_pointer`], [`format_json_pointer`]), used wherever a path
//!   must be reversible for any key;
//! - the separator-aware [`parse_path`] / [`compile_path`] pair, which
//!   accepts slash, dot or custom separators and infers the notation when
//!   none is given.
//!
//! # Example
//!
//! ```
//! use json_magic_pointer::{compile_path, parse_json_pointer, parse_path, Separator};
//!
//! let path = parse_path("a.b.c", None, false);
//! assert_eq!(path, vec!["a", "b", "c"]);
//! assert_eq!(compile_path(&path, None, false), "/a/b/c");
//! assert_eq!(compile_path(&path, Some(&Separator::Dot), false), "a.b.c");
//!
//! assert_eq!(parse_json_pointer("/a~1b").unwrap(), vec!["a/b"]);
//! ```

use thiserror::Error;

pub mod path;
pub mod types;
pub mod util;

pub use path::{compile_path, infer_separator, parse_path, root_path};
pub use types::{Path, PathInput, PathStep, Separator};
pub use util::{
    escape_component, format_json_pointer, is_array_segment, is_integer, is_valid_index,
    parse_json_pointer, unescape_component, APPEND_MARKER,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Invalid type for path")]
    InvalidPathType,
    #[error("Invalid JSON pointer: {0}")]
    InvalidPointer(String),
}
