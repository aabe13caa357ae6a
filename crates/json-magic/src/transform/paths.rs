//! Leaf enumeration in a chosen notation.

use json_magic_pointer::{
    compile_path, format_json_pointer, parse_json_pointer, root_path, Separator,
};

use crate::tree::Tree;
use crate::walker::{self, PathMap};

/// One leaf and the path it was reached by.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEntry {
    pub path: String,
    pub value: Tree,
}

/// Map every leaf path to its value.
///
/// Paths are produced as RFC 6901 pointers. Any other notation turns them
/// into dot paths joined from their unescaped tokens.
///
/// # Example
///
/// ```
/// use json_magic::{path_dict, Separator, Tree};
/// use serde_json::json;
///
/// let tree = Tree::from(json!({"a": {"b": {"c": 1}}, "x": "abc"}));
/// let dict = path_dict(&tree, Some(&Separator::Dot));
/// assert_eq!(dict["a.b.c"], Tree::from(1));
/// assert_eq!(dict["a.x"], Tree::from("abc"));
/// ```
pub fn path_dict(tree: &Tree, separator: Option<&Separator>) -> PathMap {
    let dict = walker::dict(tree, None);
    match separator {
        Some(sep) if !sep.is_slash() => dict
            .into_iter()
            .map(|(pointer, value)| (to_dot(&pointer), value))
            .collect(),
        _ => dict,
    }
}

/// The leaves of [`path_dict`] as an ordered list.
///
/// Only [`Separator::Dot`] re-keys; every other format keeps pointers.
pub fn path_array(tree: &Tree, format: Option<&Separator>) -> Vec<PathEntry> {
    let format = format.filter(|sep| sep.is_dot());
    path_dict(tree, format)
        .into_iter()
        .map(|(path, value)| PathEntry { path, value })
        .collect()
}

/// Call `iterator` for every leaf with its path in the given notation.
///
/// A falsy root is not visited. Any other non-container root is visited
/// once with the root path: `""` in dot notation, the separator otherwise.
///
/// # Example
///
/// ```
/// use json_magic::{walk, Separator, Tree};
/// use serde_json::json;
///
/// let tree = Tree::from(json!({"a": {"b": 1}}));
/// let mut paths = Vec::new();
/// walk(&tree, |_, path| paths.push(path.to_string()), Some(&Separator::Dot));
/// assert_eq!(paths, ["a.b"]);
///
/// walk(&Tree::from("abc"), |_, path| assert_eq!(path, "/"), None);
/// ```
pub fn walk<F>(tree: &Tree, mut iterator: F, separator: Option<&Separator>)
where
    F: FnMut(&Tree, &str),
{
    walk_with_segments(tree, separator, &mut |value, path, _| iterator(value, path));
}

/// [`walk`], also handing out the segments each path was compiled from.
pub(crate) fn walk_with_segments(
    tree: &Tree,
    separator: Option<&Separator>,
    visitor: &mut dyn FnMut(&Tree, &str, &[String]),
) {
    if !tree.is_truthy() {
        return;
    }
    let sep = separator.cloned().unwrap_or_default();
    if !tree.is_container() {
        visitor(tree, &root_path(&sep), &[]);
        return;
    }
    walker::walk_segments(tree, None, &mut |value, segments| {
        let path = if sep.is_slash() {
            format_json_pointer(segments)
        } else {
            compile_path(segments, Some(&sep), false)
        };
        visitor(value, &path, segments)
    });
}

fn to_dot(pointer: &str) -> String {
    match parse_json_pointer(pointer) {
        Ok(segments) => compile_path(&segments, Some(&Separator::Dot), false),
        Err(_) => pointer.to_string(),
    }
}
