//! Key sanitizing for document stores that reject `$`-prefixed and dotted
//! field names.

use crate::error::MagicResult;
use crate::serialize_error::{serialize_error, ErrorObject};
use crate::transform::rename::{rename_key, PathKey};
use crate::tree::Tree;

/// `$` at the start becomes `_`, then every `.` becomes `_`.
///
/// ```
/// use json_magic::mongo_safe_key;
///
/// assert_eq!(mongo_safe_key("$z.y"), "_z_y");
/// assert_eq!(mongo_safe_key("plain"), "plain");
/// ```
pub fn mongo_safe_key(key: &str) -> String {
    let key = match key.strip_prefix('$') {
        Some(rest) => format!("_{rest}"),
        None => key.to_string(),
    };
    key.replace('.', "_")
}

/// Rename every object key at every depth with [`mongo_safe_key`].
/// Array indices are kept.
///
/// # Example
///
/// ```
/// use json_magic::{fix_for_mongo, Tree};
/// use serde_json::json;
///
/// let mut tree = Tree::from(json!({"$a": {"b.a": 1}}));
/// fix_for_mongo(&mut tree).unwrap();
/// assert_eq!(tree, Tree::from(json!({"_a": {"b_a": 1}})));
/// ```
pub fn fix_for_mongo(tree: &mut Tree) -> MagicResult<()> {
    rename_key(
        tree,
        |key, _| match key {
            PathKey::Name(name) => Some(mongo_safe_key(name)),
            PathKey::Index(_) => None,
        },
        None,
    )
}

/// Serialize an error to a plain tree and sanitize its keys.
pub fn fix_error_for_mongo(error: &ErrorObject) -> MagicResult<Tree> {
    let mut tree = serialize_error(error);
    fix_for_mongo(&mut tree)?;
    Ok(tree)
}
