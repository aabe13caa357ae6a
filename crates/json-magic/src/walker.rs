//! Depth-first leaf traversal.
//!
//! Containers are entered when the descend predicate allows it; every
//! other value is a leaf and is handed to the visitor with its RFC 6901
//! pointer from the root.

use indexmap::IndexMap;
use json_magic_pointer::format_json_pointer;

use crate::tree::Tree;

/// Decides whether a value is entered (`true`) or visited as a leaf.
pub type Descend<'d> = &'d dyn Fn(&Tree) -> bool;

/// Pointer to value, in traversal order.
pub type PathMap = IndexMap<String, Tree>;

/// Enter arrays and objects only. Scalars, dates and opaque values are
/// leaves.
pub fn default_descend(value: &Tree) -> bool {
    value.is_container()
}

/// Visit every leaf with its pointer.
///
/// Array members are visited in index order and object members in
/// insertion order. A root the predicate does not enter is visited once
/// with the empty pointer. Empty containers produce no visit.
///
/// # Example
///
/// ```
/// use json_magic::{walker, Tree};
/// use serde_json::json;
///
/// let tree = Tree::from(json!({"a": {"b": 1}, "x": [true]}));
/// let mut seen = Vec::new();
/// walker::walk(&tree, |_, pointer| seen.push(pointer.to_string()), None);
/// assert_eq!(seen, ["/a/b", "/x/0"]);
/// ```
pub fn walk<F>(tree: &Tree, mut visitor: F, descend: Option<Descend<'_>>)
where
    F: FnMut(&Tree, &str),
{
    walk_segments(tree, descend, &mut |value, segments| {
        visitor(value, &format_json_pointer(segments))
    });
}

/// Collect every leaf into a pointer-keyed map.
///
/// Pointers are injective over segment sequences, so no two leaves share
/// a key.
pub fn dict(tree: &Tree, descend: Option<Descend<'_>>) -> PathMap {
    let mut results = PathMap::new();
    walk(
        tree,
        |value, pointer| {
            results.insert(pointer.to_string(), value.clone());
        },
        descend,
    );
    results
}

/// Like [`walk`], but hands out the raw segments instead of a pointer.
pub(crate) fn walk_segments(
    tree: &Tree,
    descend: Option<Descend<'_>>,
    visitor: &mut dyn FnMut(&Tree, &[String]),
) {
    let descend: Descend<'_> = match descend {
        Some(descend) => descend,
        None => &default_descend,
    };
    let mut tokens = Vec::new();
    if descend(tree) {
        next(tree, descend, &mut tokens, visitor);
    } else {
        visitor(tree, &tokens);
    }
}

fn next(
    current: &Tree,
    descend: Descend<'_>,
    tokens: &mut Vec<String>,
    visitor: &mut dyn FnMut(&Tree, &[String]),
) {
    for (key, value) in current.members() {
        tokens.push(key);
        if descend(value) {
            next(value, descend, tokens, visitor);
        } else {
            visitor(value, tokens);
        }
        tokens.pop();
    }
}

/// Visit every leaf mutably, entering arrays and objects only.
///
/// Leaves may be replaced in place; the shape of the containers cannot
/// change while the traversal holds them.
pub(crate) fn for_each_leaf_mut(tree: &mut Tree, visit: &mut dyn FnMut(&mut Tree)) {
    match tree {
        Tree::Array(items) => {
            for item in items.iter_mut() {
                for_each_leaf_mut(item, visit);
            }
        }
        Tree::Object(map) => {
            for value in map.values_mut() {
                for_each_leaf_mut(value, visit);
            }
        }
        leaf => visit(leaf),
    }
}
