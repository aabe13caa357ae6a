//! Key renaming in two phases.
//!
//! The first phase only reads: it visits every key at every depth and
//! records the renames the rule asks for, together with the value found
//! there. The second phase writes every new location, then deletes the
//! old ones deepest first.

use std::collections::HashSet;
use std::fmt;

use json_magic_pointer::{compile_path, Path, Separator};
use tracing::{debug, trace};

use crate::accessor::{remove, resolve, set};
use crate::error::MagicResult;
use crate::tree::Tree;

/// The key a renamer is asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKey<'k> {
    /// Position in an array.
    Index(usize),
    /// Member name in an object.
    Name(&'k str),
}

impl PathKey<'_> {
    pub fn as_name(&self) -> Option<&str> {
        match self {
            PathKey::Name(name) => Some(name),
            PathKey::Index(_) => None,
        }
    }
}

impl fmt::Display for PathKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKey::Index(i) => write!(f, "{i}"),
            PathKey::Name(name) => f.write_str(name),
        }
    }
}

#[derive(Debug)]
struct Rename {
    /// Where the key was found before any rename.
    source: Path,
    /// Where the key lives once its renamed ancestors have moved.
    current: Path,
    target: Path,
    /// The key is an array index.
    in_array: bool,
    value: Tree,
}

struct RenamePass<'r, F> {
    separator: &'r Separator,
    renamer: &'r mut F,
    path: Path,
    renames: Vec<Rename>,
}

impl<F> RenamePass<'_, F>
where
    F: FnMut(PathKey<'_>, &str) -> Option<String>,
{
    fn members(&mut self, node: &Tree) {
        match node {
            Tree::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    self.visit(PathKey::Index(i), item);
                }
            }
            Tree::Object(map) => {
                for (key, value) in map {
                    self.visit(PathKey::Name(key), value);
                }
            }
            _ => {}
        }
    }

    fn visit(&mut self, key: PathKey<'_>, value: &Tree) {
        let segment = key.to_string();
        self.path.push(segment.clone());
        let compiled = compile_path(&self.path, Some(self.separator), false);
        match (self.renamer)(key, &compiled) {
            Some(new_key) if !new_key.is_empty() && new_key != segment => {
                let mut target = self.path.clone();
                if let Some(last) = target.last_mut() {
                    *last = new_key;
                }
                self.renames.push(Rename {
                    source: self.path.clone(),
                    current: self.path.clone(),
                    target,
                    in_array: matches!(key, PathKey::Index(_)),
                    value: value.clone(),
                });
            }
            _ => {}
        }
        self.members(value);
        self.path.pop();
    }
}

/// Rename keys at every depth by a rule.
///
/// `renamer` receives each key (array indices included) and its path in
/// the given notation, before any rename. Returning `None`, an empty
/// string or the same key keeps it.
///
/// Non-container trees are left as they are. Renames are lossless when
/// siblings swap names and when both a key and its descendants are
/// renamed. On error the tree is left untouched.
///
/// # Example
///
/// ```
/// use json_magic::{rename_key, Tree};
/// use serde_json::json;
///
/// let mut tree = Tree::from(json!({"a": {"b": {"c": 1, "d": 2}}}));
/// rename_key(&mut tree, |key, _| (key.as_name() == Some("c")).then(|| "r".to_string()), None)
///     .unwrap();
/// assert_eq!(tree, Tree::from(json!({"a": {"b": {"r": 1, "d": 2}}})));
/// ```
pub fn rename_key<F>(
    tree: &mut Tree,
    mut renamer: F,
    separator: Option<&Separator>,
) -> MagicResult<()>
where
    F: FnMut(PathKey<'_>, &str) -> Option<String>,
{
    if !tree.is_container() {
        return Ok(());
    }
    let separator = separator.cloned().unwrap_or_default();
    let mut pass = RenamePass {
        separator: &separator,
        renamer: &mut renamer,
        path: Path::new(),
        renames: Vec::new(),
    };
    pass.members(tree);
    let mut renames = pass.renames;
    if renames.is_empty() {
        return Ok(());
    }

    follow_ancestors(&mut renames);
    debug!(count = renames.len(), "applying key renames");

    let mut staged = tree.clone();
    apply(&mut staged, renames)?;
    *tree = staged;
    Ok(())
}

/// Write every target, then delete the old locations deepest first.
///
/// When two keys get the same new name the later one wins. Edits whose
/// parent was overwritten with a different kind of value, and deletes of
/// locations that no longer exist, are skipped.
fn apply(tree: &mut Tree, mut renames: Vec<Rename>) -> MagicResult<()> {
    let mut written = HashSet::new();
    for rename in renames.iter_mut() {
        if !parent_holds(tree, &rename.target, rename.in_array) {
            trace!(to = ?rename.target, "skip rename under overwritten key");
            continue;
        }
        trace!(from = ?rename.current, to = ?rename.target, "rename key");
        set(tree, &rename.target, std::mem::take(&mut rename.value))?;
        written.insert(rename.target.clone());
    }

    // Traversal order reversed, then deepest first: array siblings go
    // from the highest index down.
    renames.reverse();
    renames.sort_by(|a, b| b.current.len().cmp(&a.current.len()));
    for rename in &renames {
        if written.contains(&rename.current) || resolve(tree, &rename.current).is_err() {
            continue;
        }
        trace!(path = ?rename.current, "remove renamed key");
        remove(tree, &rename.current)?;
    }
    Ok(())
}

/// Whether the parent of `path` is still the kind of container the key
/// was found in.
fn parent_holds(tree: &Tree, path: &[String], in_array: bool) -> bool {
    let Some((_, parent)) = path.split_last() else {
        return false;
    };
    match resolve(tree, parent) {
        Ok(Tree::Array(_)) => in_array,
        Ok(node) => node.is_object_like() && !in_array,
        Err(_) => false,
    }
}

/// Point every rename below a renamed ancestor at the ancestor's new
/// location, where its copy will have been written.
fn follow_ancestors(renames: &mut [Rename]) {
    for i in 0..renames.len() {
        let (earlier, rest) = renames.split_at_mut(i);
        let rename = &mut rest[0];
        let ancestor = earlier
            .iter()
            .filter(|a| {
                a.source.len() < rename.source.len() && rename.source.starts_with(&a.source)
            })
            .max_by_key(|a| a.source.len());
        if let Some(ancestor) = ancestor {
            let mut current = ancestor.target.clone();
            current.extend_from_slice(&rename.source[ancestor.source.len()..]);
            let mut target = current.clone();
            if let (Some(last), Some(new_key)) = (target.last_mut(), rename.target.last()) {
                *last = new_key.clone();
            }
            rename.current = current;
            rename.target = target;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MagicError;
    use serde_json::json;

    fn tree(v: serde_json::Value) -> Tree {
        Tree::from(v)
    }

    fn rename_names(tree: &mut Tree, pairs: &[(&str, &str)]) {
        rename_key(
            tree,
            |key, _| {
                let name = key.as_name()?;
                pairs.iter().find(|(from, _)| *from == name).map(|(_, to)| to.to_string())
            },
            None,
        )
        .unwrap();
    }

    #[test]
    fn test_identity_rename() {
        let mut val = tree(json!({"a": {"b": {"c": 1, "d": 2}, "x": "abc"}}));
        rename_key(&mut val, |key, _| Some(key.to_string()), None).unwrap();
        assert_eq!(val, tree(json!({"a": {"b": {"c": 1, "d": 2}, "x": "abc"}})));
    }

    #[test]
    fn test_rename_in_arrays() {
        let mut val = tree(json!({"a": {"b": [{"c": 1, "d": 2}, {"c": 4, "d": 5}], "x": "abc"}}));
        rename_names(&mut val, &[("c", "r"), ("x", "x2")]);
        assert_eq!(
            val,
            tree(json!({"a": {"b": [{"r": 1, "d": 2}, {"r": 4, "d": 5}], "x2": "abc"}}))
        );
    }

    #[test]
    fn test_sibling_swap() {
        let mut val = tree(json!({"x": 1, "y": 2}));
        rename_names(&mut val, &[("x", "y"), ("y", "x")]);
        assert_eq!(val, tree(json!({"x": 2, "y": 1})));
    }

    #[test]
    fn test_rename_chain() {
        let mut val = tree(json!({"a": 1, "b": 2}));
        rename_names(&mut val, &[("a", "b"), ("b", "c")]);
        assert_eq!(val, tree(json!({"b": 1, "c": 2})));
    }

    #[test]
    fn test_ancestor_and_descendant() {
        let mut val = tree(json!({"a": {"b": {"c": 1}}, "k": 0}));
        rename_names(&mut val, &[("a", "A"), ("b", "B"), ("c", "C")]);
        assert_eq!(val, tree(json!({"A": {"B": {"C": 1}}, "k": 0})));
    }

    #[test]
    fn test_swapped_ancestors_with_nested_rename() {
        let mut val = tree(json!({"x": {"c": 1}, "y": {"d": 2}}));
        rename_names(&mut val, &[("x", "y"), ("y", "x"), ("c", "C")]);
        assert_eq!(val, tree(json!({"x": {"d": 2}, "y": {"C": 1}})));
    }

    #[test]
    fn test_renamer_sees_paths() {
        let mut val = tree(json!({"a": [{"b": 1}]}));
        let mut seen = Vec::new();
        rename_key(
            &mut val,
            |key, path| {
                seen.push((key.to_string(), path.to_string()));
                None
            },
            Some(&Separator::Dot),
        )
        .unwrap();
        assert_eq!(
            seen,
            vec![
                ("a".to_string(), "a".to_string()),
                ("0".to_string(), "a.0".to_string()),
                ("b".to_string(), "a.0.b".to_string()),
            ]
        );
    }

    #[test]
    fn test_keys_with_separators() {
        let mut val = tree(json!({"a/b": {"c.d": 1}}));
        rename_names(&mut val, &[("c.d", "e")]);
        assert_eq!(val, tree(json!({"a/b": {"e": 1}})));
    }

    #[test]
    fn test_non_container_is_unchanged() {
        let mut val = Tree::from("abc");
        rename_key(&mut val, |_, _| Some("r".to_string()), None).unwrap();
        assert_eq!(val, Tree::from("abc"));

        let mut val = Tree::Null;
        rename_key(&mut val, |_, _| Some("r".to_string()), None).unwrap();
        assert_eq!(val, Tree::Null);
    }

    #[test]
    fn test_rename_with_prefix_keeps_opaque_and_values() {
        let mut val = tree(json!({"_id": 1, "val1": "x", "testVal": {"$in": ["A", "C"]}}));
        rename_key(
            &mut val,
            |key, _| match key {
                PathKey::Name(name) if name != "_id" && !name.starts_with('$') => {
                    Some(format!("data.{name}"))
                }
                _ => None,
            },
            None,
        )
        .unwrap();
        assert_eq!(
            val,
            tree(json!({"_id": 1, "data.val1": "x", "data.testVal": {"$in": ["A", "C"]}}))
        );
    }

    #[test]
    fn test_colliding_names_later_write_wins() {
        let mut val = tree(json!({"a_b": {"$x": 1}, "a.b": 5}));
        rename_names(&mut val, &[("a.b", "a_b"), ("$x", "_x")]);
        assert_eq!(val, tree(json!({"a_b": 5})));

        let mut val = tree(json!({"a.b": 5, "a_b": {"$x": 1}}));
        rename_names(&mut val, &[("a.b", "a_b"), ("$x", "_x")]);
        assert_eq!(val, tree(json!({"a_b": 5})));

        let mut val = tree(json!({"a.b": {"c": 1}, "a_b": {"$x": 2}}));
        rename_names(&mut val, &[("a.b", "a_b"), ("$x", "_x")]);
        assert_eq!(val, tree(json!({"a_b": {"c": 1, "_x": 2}})));
    }

    #[test]
    fn test_failed_rename_leaves_tree_untouched() {
        let mut val = tree(json!({"k": 1, "l": [1]}));
        let err = rename_key(
            &mut val,
            |key, _| match key {
                PathKey::Index(_) => Some("x".to_string()),
                PathKey::Name("k") => Some("K".to_string()),
                PathKey::Name(_) => None,
            },
            None,
        )
        .unwrap_err();
        assert_eq!(err, MagicError::InvalidIndex("x".to_string()));
        assert_eq!(val, tree(json!({"k": 1, "l": [1]})));
    }

    #[test]
    fn test_follow_ancestors() {
        let p = |s: &[&str]| s.iter().map(|x| x.to_string()).collect::<Path>();
        let mut renames = vec![
            Rename {
                source: p(&["a"]),
                current: p(&["a"]),
                target: p(&["A"]),
                in_array: false,
                value: Tree::Null,
            },
            Rename {
                source: p(&["a", "b", "c"]),
                current: p(&["a", "b", "c"]),
                target: p(&["a", "b", "C"]),
                in_array: false,
                value: Tree::Null,
            },
        ];
        follow_ancestors(&mut renames);
        assert_eq!(renames[1].current, p(&["A", "b", "c"]));
        assert_eq!(renames[1].target, p(&["A", "b", "C"]));
    }
}
