//! RFC 6901 reference-token codec and index predicates.

use crate::PathError;

/// Unescapes a JSON Pointer path component.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// # Example
///
/// ```
/// use json_magic_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// assert_eq!(unescape_component("no-escapes"), "no-escapes");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~1 must be replaced before ~0
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component.
///
/// Per RFC 6901, `~` is replaced with `~0` and `/` is replaced with `~1`.
///
/// # Example
///
/// ```
/// use json_magic_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~ must be escaped before /
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse a JSON Pointer string into unescaped reference tokens.
///
/// The empty string is the root. Any other pointer must start with `/`.
///
/// # Example
///
/// ```
/// use json_magic_pointer::parse_json_pointer;
///
/// assert_eq!(parse_json_pointer("").unwrap(), Vec::<String>::new());
/// assert_eq!(parse_json_pointer("/a~0b/c~1d").unwrap(), vec!["a~b", "c/d"]);
/// assert!(parse_json_pointer("a/b").is_err());
/// ```
pub fn parse_json_pointer(pointer: &str) -> Result<Vec<String>, PathError> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    match pointer.strip_prefix('/') {
        Some(rest) => Ok(rest.split('/').map(unescape_component).collect()),
        None => Err(PathError::InvalidPointer(pointer.to_string())),
    }
}

/// Format reference tokens into a JSON Pointer string.
///
/// Returns an empty string for the root path.
///
/// # Example
///
/// ```
/// use json_magic_pointer::format_json_pointer;
///
/// assert_eq!(format_json_pointer::<&str>(&[]), "");
/// assert_eq!(format_json_pointer(&["a/b".to_string(), "0".to_string()]), "/a~1b/0");
/// ```
pub fn format_json_pointer<S: AsRef<str>>(path: &[S]) -> String {
    if path.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component.as_ref()));
    }
    out
}

/// Check if a string is a canonical non-negative array index.
///
/// # Example
///
/// ```
/// use json_magic_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("-"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    // First char can't be leading zero unless it's just "0"
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

/// Check if a string consists only of ASCII digits.
pub fn is_integer(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    s.bytes().all(|b| b.is_ascii_digit())
}

/// The reserved "one past the end" array segment.
pub const APPEND_MARKER: &str = "-";

/// Whether a segment addresses an array slot: digits or the append marker.
///
/// Used to decide which container to create for a missing intermediate.
pub fn is_array_segment(segment: &str) -> bool {
    segment == APPEND_MARKER || is_integer(segment)
}
