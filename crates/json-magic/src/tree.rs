//! The in-memory tree every operation works on.

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use json_magic_pointer::{is_valid_index, PathInput};
use serde_json::{Number, Value};

use crate::error::MagicError;

/// Object members, in insertion order.
pub type Map = IndexMap<String, Tree>;

/// A JSON-like tree with dates and opaque domain values as extra leaves.
///
/// Equality on objects ignores member order, like a deep structural
/// comparison.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Tree {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Date(DateTime<Utc>),
    /// Structurally object-like, but never decomposed by default traversal.
    Opaque(Opaque),
    Array(Vec<Tree>),
    Object(Map),
}

/// An externally defined value (an id, a binary blob, a timestamp...)
/// that must stay in one piece.
#[derive(Debug, Clone, PartialEq)]
pub struct Opaque {
    /// Type tag, e.g. `"ObjectId"`.
    pub kind: String,
    pub fields: Map,
}

impl Opaque {
    pub fn new(kind: impl Into<String>) -> Self {
        Opaque {
            kind: kind.into(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Tree>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

impl Tree {
    /// Array or object: the values default traversal descends into.
    pub fn is_container(&self) -> bool {
        matches!(self, Tree::Array(_) | Tree::Object(_))
    }

    /// Object or opaque value: anything with named members.
    pub fn is_object_like(&self) -> bool {
        matches!(self, Tree::Object(_) | Tree::Opaque(_))
    }

    /// Valid target for `get`, `set` and `remove`.
    pub fn is_addressable(&self) -> bool {
        matches!(self, Tree::Array(_) | Tree::Object(_) | Tree::Opaque(_))
    }

    /// Falsy values are `null`, `false`, zero and the empty string.
    ///
    /// ```
    /// use json_magic::Tree;
    ///
    /// assert!(!Tree::from(0).is_truthy());
    /// assert!(!Tree::from("").is_truthy());
    /// assert!(Tree::Array(vec![]).is_truthy());
    /// ```
    pub fn is_truthy(&self) -> bool {
        match self {
            Tree::Null => false,
            Tree::Bool(b) => *b,
            Tree::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Tree::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tree::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Tree::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Tree>> {
        match self {
            Tree::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Tree::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up one path segment: an index for arrays, a key for objects
    /// and opaque values.
    pub fn member(&self, segment: &str) -> Option<&Tree> {
        match self {
            Tree::Array(items) => {
                if !is_valid_index(segment) {
                    return None;
                }
                items.get(segment.parse::<usize>().ok()?)
            }
            Tree::Object(map) => map.get(segment),
            Tree::Opaque(opaque) => opaque.fields.get(segment),
            _ => None,
        }
    }

    pub fn member_mut(&mut self, segment: &str) -> Option<&mut Tree> {
        match self {
            Tree::Array(items) => {
                if !is_valid_index(segment) {
                    return None;
                }
                items.get_mut(segment.parse::<usize>().ok()?)
            }
            Tree::Object(map) => map.get_mut(segment),
            Tree::Opaque(opaque) => opaque.fields.get_mut(segment),
            _ => None,
        }
    }

    /// Members in traversal order: array indices ascending, object keys
    /// in insertion order. Scalars have none.
    pub fn members(&self) -> Vec<(String, &Tree)> {
        match self {
            Tree::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            Tree::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
            Tree::Opaque(opaque) => opaque.fields.iter().map(|(k, v)| (k.clone(), v)).collect(),
            _ => Vec::new(),
        }
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix,
/// e.g. `2017-01-01T23:45:45.000Z`.
pub fn to_iso_string(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<bool> for Tree {
    fn from(b: bool) -> Self {
        Tree::Bool(b)
    }
}

impl From<i32> for Tree {
    fn from(n: i32) -> Self {
        Tree::Number(n.into())
    }
}

impl From<i64> for Tree {
    fn from(n: i64) -> Self {
        Tree::Number(n.into())
    }
}

impl From<u64> for Tree {
    fn from(n: u64) -> Self {
        Tree::Number(n.into())
    }
}

impl From<usize> for Tree {
    fn from(n: usize) -> Self {
        Tree::Number((n as u64).into())
    }
}

/// Non-finite floats have no JSON representation and become `Null`.
impl From<f64> for Tree {
    fn from(f: f64) -> Self {
        Number::from_f64(f).map_or(Tree::Null, Tree::Number)
    }
}

impl From<&str> for Tree {
    fn from(s: &str) -> Self {
        Tree::String(s.to_string())
    }
}

impl From<String> for Tree {
    fn from(s: String) -> Self {
        Tree::String(s)
    }
}

impl From<DateTime<Utc>> for Tree {
    fn from(d: DateTime<Utc>) -> Self {
        Tree::Date(d)
    }
}

impl From<Opaque> for Tree {
    fn from(o: Opaque) -> Self {
        Tree::Opaque(o)
    }
}

impl From<Vec<Tree>> for Tree {
    fn from(items: Vec<Tree>) -> Self {
        Tree::Array(items)
    }
}

impl From<Map> for Tree {
    fn from(map: Map) -> Self {
        Tree::Object(map)
    }
}

impl From<Value> for Tree {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => Tree::Null,
            Value::Bool(b) => Tree::Bool(b),
            Value::Number(n) => Tree::Number(n),
            Value::String(s) => Tree::String(s),
            Value::Array(items) => Tree::Array(items.into_iter().map(Tree::from).collect()),
            Value::Object(map) => {
                Tree::Object(map.into_iter().map(|(k, v)| (k, Tree::from(v))).collect())
            }
        }
    }
}

/// Dates become ISO strings and opaque values their field object.
impl From<Tree> for Value {
    fn from(t: Tree) -> Self {
        match t {
            Tree::Null => Value::Null,
            Tree::Bool(b) => Value::Bool(b),
            Tree::Number(n) => Value::Number(n),
            Tree::String(s) => Value::String(s),
            Tree::Date(d) => Value::String(to_iso_string(&d)),
            Tree::Opaque(o) => Value::Object(
                o.fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
            Tree::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Tree::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// A path stored as data: a string expression, or an array of strings and
/// non-negative integers.
impl TryFrom<&Tree> for PathInput<'static> {
    type Error = MagicError;

    fn try_from(value: &Tree) -> Result<Self, Self::Error> {
        match value {
            Tree::String(s) => Ok(PathInput::from(s.clone())),
            Tree::Array(items) => items
                .iter()
                .map(|item| match item {
                    Tree::String(s) => Ok(s.clone()),
                    Tree::Number(n) if n.is_u64() => Ok(n.to_string()),
                    _ => Err(MagicError::InvalidPathType),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(PathInput::from),
            _ => Err(MagicError::InvalidPathType),
        }
    }
}
