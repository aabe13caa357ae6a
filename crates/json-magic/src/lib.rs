//! json-magic: path addressing and whole-tree transforms over JSON-like
//! trees.
//!
//! A [`Tree`] is JSON plus two extra leaf kinds: dates and opaque domain
//! values (ids, binary blobs) that traversal never takes apart. Paths may
//! be written in slash (`/a/b/0`) or dot (`a.b.0`) notation, or with a
//! custom separator; see [`json_magic_pointer`] for the codec.
//!
//! # Example
//!
//! ```
//! use json_magic::{get, has, rename_key, set, Tree};
//! use serde_json::json;
//!
//! let mut tree = Tree::from(json!({"a": {"b": [{"c": 1}]}}));
//! assert!(has(&tree, "a.b.0.c"));
//!
//! set(&mut tree, "/a/b/-/c", 2).unwrap();
//! assert_eq!(get(&tree, "a.b.1.c").unwrap(), &Tree::from(2));
//!
//! rename_key(
//!     &mut tree,
//!     |key, _| (key.as_name() == Some("c")).then(|| "d".into()),
//!     None,
//! )
//! .unwrap();
//! assert_eq!(tree, Tree::from(json!({"a": {"b": [{"d": 1}, {"d": 2}]}})));
//! ```

mod accessor;
mod error;
mod serialize_error;
mod transform;
mod tree;
pub mod walker;

pub use accessor::{get, get_with, has, remove, set, set_with};
pub use error::{MagicError, MagicResult};
pub use serialize_error::{serialize_error, ErrorField, ErrorObject, CIRCULAR_MARKER};
pub use transform::{
    change_value, convert_date_to_iso_string, fix_error_for_mongo, fix_for_mongo, mongo_safe_key,
    path_array, path_dict, rename_key, set_property, walk, PathEntry, PathKey,
};
pub use tree::{to_iso_string, Map, Opaque, Tree};

pub use json_magic_pointer::{
    compile_path, escape_component, format_json_pointer, parse_json_pointer, parse_path,
    unescape_component, Path, PathInput, Separator,
};
