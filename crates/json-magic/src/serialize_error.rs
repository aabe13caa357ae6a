//! Plain-tree serialization of errors.

use std::error::Error;

use indexmap::IndexMap;

use crate::transform::convert_date_to_iso_string;
use crate::tree::{Map, Tree};

/// Replaces a property that refers back to the error itself.
pub const CIRCULAR_MARKER: &str = "[Circular]";

/// One own property of an [`ErrorObject`].
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorField {
    Value(Tree),
    Nested(IndexMap<String, ErrorField>),
    /// A reference back to the error being serialized.
    SelfRef,
}

impl From<Tree> for ErrorField {
    fn from(value: Tree) -> Self {
        ErrorField::Value(value)
    }
}

/// An error as a structured value: name, message, optional stack text and
/// its own properties in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorObject {
    pub name: String,
    pub message: String,
    pub stack: Option<String>,
    pub properties: IndexMap<String, ErrorField>,
}

impl ErrorObject {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        ErrorObject {
            name: name.into(),
            message: message.into(),
            stack: None,
            properties: IndexMap::new(),
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<ErrorField>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Adapt a Rust error. The stack text is the error followed by its
    /// chain of sources, one per line.
    ///
    /// ```
    /// use json_magic::ErrorObject;
    ///
    /// let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
    /// let error = ErrorObject::from_std_error(&io);
    /// assert_eq!(error.name, "Error");
    /// assert_eq!(error.message, "disk full");
    /// assert_eq!(error.stack.as_deref(), Some("Error: disk full"));
    /// ```
    pub fn from_std_error(error: &(dyn Error + 'static)) -> Self {
        let message = error.to_string();
        let mut stack = format!("Error: {message}");
        let mut source = error.source();
        while let Some(cause) = source {
            stack.push_str("\n    caused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }
        ErrorObject::new("Error", message).with_stack(stack)
    }
}

/// Serialize an error into a plain object tree.
///
/// `name`, `message` and `stack` (when present) come first and are not
/// shadowed by properties of the same name. Self-references become
/// `"[Circular]"` and dates become ISO strings.
pub fn serialize_error(error: &ErrorObject) -> Tree {
    let mut map = Map::new();
    map.insert("name".to_string(), Tree::from(error.name.as_str()));
    map.insert("message".to_string(), Tree::from(error.message.as_str()));
    if let Some(stack) = &error.stack {
        map.insert("stack".to_string(), Tree::from(stack.as_str()));
    }
    for (key, field) in &error.properties {
        map.entry(key.clone()).or_insert_with(|| field_to_tree(field));
    }
    let mut tree = Tree::Object(map);
    convert_date_to_iso_string(&mut tree);
    tree
}

fn field_to_tree(field: &ErrorField) -> Tree {
    match field {
        ErrorField::Value(value) => value.clone(),
        ErrorField::Nested(fields) => Tree::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), field_to_tree(v)))
                .collect(),
        ),
        ErrorField::SelfRef => Tree::from(CIRCULAR_MARKER),
    }
}
