//! Type definitions for paths.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

use crate::PathError;

/// A step in a path: an object key or an array index, always as text.
pub type PathStep = String;

/// A parsed path. The empty path addresses the root.
pub type Path = Vec<PathStep>;

/// The notation a path is written in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Separator {
    /// RFC 6901 style `/a/b`, the default.
    #[default]
    Slash,
    /// Dot notation `a.b`, never root-prefixed.
    Dot,
    /// Any other separator string, e.g. `$$`.
    Custom(String),
}

impl Separator {
    /// Resolve a separator name.
    ///
    /// `"/"` is [`Separator::Slash`], `"."` and `"dot"` (any case) are
    /// [`Separator::Dot`]. The empty string yields `None`, which callers
    /// treat as "infer from the path".
    ///
    /// ```
    /// use json_magic_pointer::Separator;
    ///
    /// assert_eq!(Separator::from_name("DOT"), Some(Separator::Dot));
    /// assert_eq!(Separator::from_name("$$"), Some(Separator::Custom("$$".into())));
    /// assert_eq!(Separator::from_name(""), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Separator> {
        match name {
            "" => None,
            "/" => Some(Separator::Slash),
            "." => Some(Separator::Dot),
            _ if name.eq_ignore_ascii_case("dot") => Some(Separator::Dot),
            _ => Some(Separator::Custom(name.to_string())),
        }
    }

    /// The literal text placed between segments.
    pub fn as_str(&self) -> &str {
        match self {
            Separator::Slash => "/",
            Separator::Dot => ".",
            Separator::Custom(s) => s,
        }
    }

    pub fn is_slash(&self) -> bool {
        self.as_str() == "/"
    }

    pub fn is_dot(&self) -> bool {
        self.as_str() == "."
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A path argument: either an expression still to be parsed or an
/// already split segment sequence, which is used unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathInput<'a> {
    Expr(Cow<'a, str>),
    Segments(Cow<'a, [String]>),
}

impl<'a> From<&'a str> for PathInput<'a> {
    fn from(s: &'a str) -> Self {
        PathInput::Expr(Cow::Borrowed(s))
    }
}

impl<'a> From<&'a String> for PathInput<'a> {
    fn from(s: &'a String) -> Self {
        PathInput::Expr(Cow::Borrowed(s.as_str()))
    }
}

impl From<String> for PathInput<'static> {
    fn from(s: String) -> Self {
        PathInput::Expr(Cow::Owned(s))
    }
}

impl<'a> From<&'a [String]> for PathInput<'a> {
    fn from(segments: &'a [String]) -> Self {
        PathInput::Segments(Cow::Borrowed(segments))
    }
}

impl<'a> From<&'a Vec<String>> for PathInput<'a> {
    fn from(segments: &'a Vec<String>) -> Self {
        PathInput::Segments(Cow::Borrowed(segments.as_slice()))
    }
}

impl From<Vec<String>> for PathInput<'static> {
    fn from(segments: Vec<String>) -> Self {
        PathInput::Segments(Cow::Owned(segments))
    }
}

impl<'a> From<&'a [&'a str]> for PathInput<'static> {
    fn from(segments: &'a [&'a str]) -> Self {
        PathInput::Segments(Cow::Owned(segments.iter().map(|s| s.to_string()).collect()))
    }
}

impl<const N: usize> From<[&str; N]> for PathInput<'static> {
    fn from(segments: [&str; N]) -> Self {
        PathInput::Segments(Cow::Owned(segments.iter().map(|s| s.to_string()).collect()))
    }
}

/// Accepts a JSON string (an expression) or an array of strings and
/// non-negative integers (segments). Anything else is not a path.
impl TryFrom<&Value> for PathInput<'static> {
    type Error = PathError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(PathInput::Expr(Cow::Owned(s.clone()))),
            Value::Array(items) => {
                let mut segments = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => segments.push(s.clone()),
                        Value::Number(n) if n.is_u64() => segments.push(n.to_string()),
                        _ => return Err(PathError::InvalidPathType),
                    }
                }
                Ok(PathInput::Segments(Cow::Owned(segments)))
            }
            _ => Err(PathError::InvalidPathType),
        }
    }
}
