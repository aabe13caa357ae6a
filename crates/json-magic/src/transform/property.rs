//! Stamping a property onto every object of a tree.

use json_magic_pointer::Path;
use tracing::{debug, trace};

use crate::accessor::set;
use crate::error::MagicResult;
use crate::tree::Tree;

/// Give every object in the tree, the root included, a member named
/// `property` holding `value`.
///
/// Objects that already have the member keep it unless
/// `override_existing` is set. Arrays never get the member, but objects
/// inside them do. Non-container trees are left as they are.
///
/// # Example
///
/// ```
/// use json_magic::{set_property, Tree};
/// use serde_json::json;
///
/// let mut tree = Tree::from(json!({"a": 1, "d": [{"e": 1}]}));
/// set_property(&mut tree, "val", "value", false).unwrap();
/// assert_eq!(
///     tree,
///     Tree::from(json!({"a": 1, "val": "value", "d": [{"e": 1, "val": "value"}]}))
/// );
/// ```
pub fn set_property(
    tree: &mut Tree,
    property: &str,
    value: impl Into<Tree>,
    override_existing: bool,
) -> MagicResult<()> {
    if !tree.is_container() {
        return Ok(());
    }

    let mut targets = Vec::new();
    collect(tree, property, override_existing, &mut Path::new(), &mut targets);

    let value = value.into();
    debug!(count = targets.len(), property, "setting property");
    for path in targets {
        trace!(?path, "set property");
        set(tree, &path, value.clone())?;
    }
    Ok(())
}

/// Pre-order: an object's own target comes before its members' targets.
fn collect(
    node: &Tree,
    property: &str,
    override_existing: bool,
    path: &mut Path,
    targets: &mut Vec<Path>,
) {
    match node {
        Tree::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                path.push(i.to_string());
                collect(item, property, override_existing, path, targets);
                path.pop();
            }
        }
        Tree::Object(map) => {
            if override_existing || !map.contains_key(property) {
                let mut target = path.clone();
                target.push(property.to_string());
                targets.push(target);
            }
            for (key, member) in map {
                // Replaced wholesale below, so nothing inside it is kept.
                if override_existing && key == property {
                    continue;
                }
                path.push(key.clone());
                collect(member, property, override_existing, path, targets);
                path.pop();
            }
        }
        _ => {}
    }
}
