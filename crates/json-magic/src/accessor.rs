//! Reading and writing a tree by path.

use json_magic_pointer::{
    is_array_segment, is_integer, is_valid_index, parse_path, PathInput, Separator, APPEND_MARKER,
};

use crate::error::{MagicError, MagicResult};
use crate::tree::{Map, Tree};

/// Test whether a path leads to a truthy value.
///
/// Never fails. Presence is tested by truthiness, so a member holding
/// `0`, `""`, `false` or `null` counts as absent, wherever it sits on the
/// path.
///
/// # Example
///
/// ```
/// use json_magic::{has, Tree};
/// use serde_json::json;
///
/// let tree = Tree::from(json!({"a": {"b": [{"c": 1}], "z": 0}}));
/// assert!(has(&tree, "/a/b/0/c"));
/// assert!(has(&tree, "a.b"));
/// assert!(!has(&tree, "a.x"));
/// assert!(!has(&tree, "a.z"));
/// ```
pub fn has<'a>(tree: &Tree, path: impl Into<PathInput<'a>>) -> bool {
    if !tree.is_truthy() {
        return false;
    }
    let path = parse_path(path, None, false);
    let mut current = tree;
    for segment in &path {
        match current.member(segment) {
            Some(next) if next.is_truthy() => current = next,
            _ => return false,
        }
    }
    true
}

/// Look up the value at a path, inferring the separator.
///
/// See [`get_with`].
pub fn get<'t, 'a>(tree: &'t Tree, path: impl Into<PathInput<'a>>) -> MagicResult<&'t Tree> {
    get_with(tree, path, None, false)
}

/// Look up the value at a path.
///
/// The root path returns the tree itself. Every segment must name an
/// existing member, otherwise [`MagicError::InvalidPath`].
///
/// # Errors
///
/// - [`MagicError::InvalidTarget`] if the tree is not an array or object
/// - [`MagicError::InvalidPath`] if the path does not resolve
///
/// # Example
///
/// ```
/// use json_magic::{get, get_with, Tree};
/// use serde_json::json;
///
/// let tree = Tree::from(json!({"a": {"b": {"c": 1}}, "b/c": 2}));
/// assert_eq!(get(&tree, ".a.b.c").unwrap(), &Tree::from(1));
/// assert_eq!(get_with(&tree, "/b/c", None, true).unwrap(), &Tree::from(2));
/// assert!(get(&tree, "/a/x/c").is_err());
/// ```
pub fn get_with<'t, 'a>(
    tree: &'t Tree,
    path: impl Into<PathInput<'a>>,
    separator: Option<&Separator>,
    ignore_separator: bool,
) -> MagicResult<&'t Tree> {
    if !tree.is_addressable() {
        return Err(MagicError::InvalidTarget("get"));
    }
    let path = parse_path(path, separator, ignore_separator);
    resolve(tree, &path)
}

/// Set a value at a path, inferring the separator.
///
/// See [`set_with`].
pub fn set<'t, 'a>(
    tree: &'t mut Tree,
    path: impl Into<PathInput<'a>>,
    value: impl Into<Tree>,
) -> MagicResult<&'t mut Tree> {
    set_with(tree, path, value, false)
}

/// Set a value at a path, creating missing intermediate containers.
///
/// A missing intermediate becomes an array when the segment after it is
/// digits or `-`, and an object otherwise. On an array, `-` and the index
/// equal to its length append; larger indices are rejected.
///
/// The path is checked against the tree before anything is created, so a
/// failing call leaves the tree untouched.
///
/// # Errors
///
/// - [`MagicError::InvalidTarget`] if the tree is not an array or object
/// - [`MagicError::InvalidPath`] for the root path, or when an existing
///   intermediate is a scalar
/// - [`MagicError::InvalidIndex`] when a segment meets an array but is
///   neither an index nor `-`, or is an index past the end
///
/// # Example
///
/// ```
/// use json_magic::{set, Tree};
/// use serde_json::json;
///
/// let mut tree = Tree::from(json!({}));
/// set(&mut tree, "/a/b", Tree::from(json!({"c": 1}))).unwrap();
/// set(&mut tree, "/list/-", "x").unwrap();
/// assert_eq!(tree, Tree::from(json!({"a": {"b": {"c": 1}}, "list": ["x"]})));
/// ```
pub fn set_with<'t, 'a>(
    tree: &'t mut Tree,
    path: impl Into<PathInput<'a>>,
    value: impl Into<Tree>,
    ignore_separator: bool,
) -> MagicResult<&'t mut Tree> {
    if !tree.is_addressable() {
        return Err(MagicError::InvalidTarget("set"));
    }
    let path = parse_path(path, None, ignore_separator);
    check_assignable(tree, &path)?;
    assign(tree, &path, value.into())?;
    Ok(tree)
}

/// Remove the value at a path and return it.
///
/// An absent object member or an out of range index is a no-op and
/// yields `Tree::Null`.
///
/// # Errors
///
/// - [`MagicError::InvalidTarget`] if the tree is not an array or object
/// - [`MagicError::InvalidPath`] for the root path or an unresolvable parent
/// - [`MagicError::InvalidIndex`] if the parent is an array and the last
///   segment is not a number
pub fn remove<'a>(tree: &mut Tree, path: impl Into<PathInput<'a>>) -> MagicResult<Tree> {
    if !tree.is_addressable() {
        return Err(MagicError::InvalidTarget("remove"));
    }
    let path = parse_path(path, None, false);
    let Some((last, parents)) = path.split_last() else {
        return Err(MagicError::InvalidPath(String::new()));
    };

    match resolve_mut(tree, parents)? {
        Tree::Array(items) => {
            if !is_integer(last) {
                return Err(MagicError::InvalidIndex(last.clone()));
            }
            let idx: usize = last
                .parse()
                .map_err(|_| MagicError::InvalidIndex(last.clone()))?;
            if idx < items.len() {
                Ok(items.remove(idx))
            } else {
                Ok(Tree::Null)
            }
        }
        Tree::Object(map) => Ok(map.shift_remove(last.as_str()).unwrap_or_default()),
        Tree::Opaque(opaque) => Ok(opaque.fields.shift_remove(last.as_str()).unwrap_or_default()),
        _ => Err(MagicError::InvalidPath(last.clone())),
    }
}

pub(crate) fn resolve<'t>(tree: &'t Tree, path: &[String]) -> MagicResult<&'t Tree> {
    let mut current = tree;
    for segment in path {
        current = current
            .member(segment)
            .ok_or_else(|| MagicError::InvalidPath(segment.clone()))?;
    }
    Ok(current)
}

fn resolve_mut<'t>(tree: &'t mut Tree, path: &[String]) -> MagicResult<&'t mut Tree> {
    let mut current = tree;
    for segment in path {
        current = current
            .member_mut(segment)
            .ok_or_else(|| MagicError::InvalidPath(segment.clone()))?;
    }
    Ok(current)
}

/// Resolve a segment against an array of `len` items: `-` is `len`.
/// Slots past `len` would leave a hole and are rejected.
fn array_slot(len: usize, segment: &str) -> MagicResult<usize> {
    if segment == APPEND_MARKER {
        return Ok(len);
    }
    if !is_valid_index(segment) {
        return Err(MagicError::InvalidIndex(segment.to_string()));
    }
    match segment.parse::<usize>() {
        Ok(idx) if idx <= len => Ok(idx),
        _ => Err(MagicError::InvalidIndex(segment.to_string())),
    }
}

fn fresh_container(next_segment: &str) -> Tree {
    if is_array_segment(next_segment) {
        Tree::Array(Vec::new())
    } else {
        Tree::Object(Map::new())
    }
}

/// Dry run of [`assign`]: fails exactly when `assign` would.
fn check_assignable(tree: &Tree, path: &[String]) -> MagicResult<()> {
    if path.is_empty() {
        return Err(MagicError::InvalidPath(String::new()));
    }
    let mut current = Some(tree);
    for segment in path {
        match current {
            Some(node) => {
                current = match node {
                    Tree::Array(items) => items.get(array_slot(items.len(), segment)?),
                    Tree::Object(map) => map.get(segment.as_str()),
                    Tree::Opaque(opaque) => opaque.fields.get(segment.as_str()),
                    _ => return Err(MagicError::InvalidPath(segment.clone())),
                };
            }
            // The parent will be created, shaped by this very segment.
            None => {
                if is_array_segment(segment) {
                    array_slot(0, segment)?;
                }
            }
        }
    }
    Ok(())
}

fn assign(tree: &mut Tree, path: &[String], value: Tree) -> MagicResult<()> {
    let Some((last, parents)) = path.split_last() else {
        return Err(MagicError::InvalidPath(String::new()));
    };
    let mut current = tree;
    for (i, segment) in parents.iter().enumerate() {
        current = child_or_insert(current, segment, &path[i + 1])?;
    }
    put(current, last, value)
}

fn child_or_insert<'t>(node: &'t mut Tree, segment: &str, next: &str) -> MagicResult<&'t mut Tree> {
    match node {
        Tree::Array(items) => {
            let idx = array_slot(items.len(), segment)?;
            if idx == items.len() {
                items.push(fresh_container(next));
            }
            Ok(&mut items[idx])
        }
        Tree::Object(map) => Ok(map
            .entry(segment.to_string())
            .or_insert_with(|| fresh_container(next))),
        Tree::Opaque(opaque) => Ok(opaque
            .fields
            .entry(segment.to_string())
            .or_insert_with(|| fresh_container(next))),
        _ => Err(MagicError::InvalidPath(segment.to_string())),
    }
}

fn put(node: &mut Tree, segment: &str, value: Tree) -> MagicResult<()> {
    match node {
        Tree::Array(items) => {
            let idx = array_slot(items.len(), segment)?;
            if idx < items.len() {
                items[idx] = value;
            } else {
                items.push(value);
            }
        }
        Tree::Object(map) => {
            map.insert(segment.to_string(), value);
        }
        Tree::Opaque(opaque) => {
            opaque.fields.insert(segment.to_string(), value);
        }
        _ => return Err(MagicError::InvalidPath(segment.to_string())),
    }
    Ok(())
}
