//! Leaf value replacement.

use json_magic_pointer::{Path, Separator};
use tracing::{debug, trace};

use crate::accessor::set;
use crate::error::MagicResult;
use crate::transform::paths::walk_with_segments;
use crate::tree::{to_iso_string, Tree};
use crate::walker::for_each_leaf_mut;

/// Replace leaf values by a rule.
///
/// `changer` sees every leaf with its path in the given notation and
/// returns the replacement, or `None` to keep the value. Replacements are
/// collected during the walk and written once it has finished.
///
/// Non-container trees are left as they are.
///
/// # Example
///
/// ```
/// use json_magic::{change_value, Tree};
/// use serde_json::json;
///
/// let mut tree = Tree::from(json!({"a": [{"c": 1, "d": 2}, {"c": 2}]}));
/// change_value(&mut tree, |v, _| (v == &Tree::from(2)).then(|| Tree::from(20)), None).unwrap();
/// assert_eq!(tree, Tree::from(json!({"a": [{"c": 1, "d": 20}, {"c": 20}]})));
/// ```
pub fn change_value<F>(
    tree: &mut Tree,
    mut changer: F,
    separator: Option<&Separator>,
) -> MagicResult<()>
where
    F: FnMut(&Tree, &str) -> Option<Tree>,
{
    if !tree.is_container() {
        return Ok(());
    }

    let mut changes: Vec<(Path, Tree)> = Vec::new();
    walk_with_segments(tree, separator, &mut |value, path, segments| {
        if let Some(new_value) = changer(value, path) {
            if &new_value != value {
                changes.push((segments.to_vec(), new_value));
            }
        }
    });

    debug!(count = changes.len(), "applying value changes");
    for (path, value) in changes {
        trace!(?path, "change value");
        set(tree, &path, value)?;
    }
    Ok(())
}

/// Replace every date leaf with its ISO-8601 string,
/// e.g. `2017-01-01T23:45:45.000Z`.
///
/// Only leaves change, never the shape of a container, so the
/// replacement happens during the traversal.
pub fn convert_date_to_iso_string(tree: &mut Tree) {
    let mut converted = 0usize;
    for_each_leaf_mut(tree, &mut |leaf| {
        if let Some(iso) = leaf.as_date().map(to_iso_string) {
            *leaf = Tree::String(iso);
            converted += 1;
        }
    });
    debug!(converted, "converted dates to ISO strings");
}
