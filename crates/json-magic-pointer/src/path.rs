//! Separator-aware path parsing and compiling.
//!
//! Unlike the RFC 6901 codec in [`crate::util`], these functions do no
//! escaping: a segment that contains the separator cannot be expressed
//! in a compiled path, and callers that need such keys pass segments or
//! use `ignore_separator`.

use crate::types::{Path, PathInput, Separator};

/// Parse a path expression into segments.
///
/// - Segments are returned unchanged.
/// - The empty expression is the root (empty path).
/// - With no separator, `.` is used when the expression contains more dots
///   than slashes, otherwise `/`.
/// - A single leading separator is stripped.
/// - With `ignore_separator`, the remainder is one literal segment.
///
/// # Example
///
/// ```
/// use json_magic_pointer::{parse_path, Separator};
///
/// assert_eq!(parse_path("a/b/c", None, false), vec!["a", "b", "c"]);
/// assert_eq!(parse_path(".a.b.c", None, false), vec!["a", "b", "c"]);
/// assert_eq!(parse_path("/a.b.c", None, false), vec!["/a", "b", "c"]);
/// let sep = Separator::Custom("$$".into());
/// assert_eq!(parse_path("a$$b$$c", Some(&sep), false), vec!["a", "b", "c"]);
/// assert_eq!(parse_path("a$$b$$c", Some(&sep), true), vec!["a$$b$$c"]);
/// ```
pub fn parse_path<'a>(
    input: impl Into<PathInput<'a>>,
    separator: Option<&Separator>,
    ignore_separator: bool,
) -> Path {
    let expr = match input.into() {
        PathInput::Segments(segments) => return segments.into_owned(),
        PathInput::Expr(expr) => expr,
    };
    if expr.is_empty() {
        return Vec::new();
    }

    let sep = match separator.map(Separator::as_str) {
        Some(s) if !s.is_empty() => s,
        _ => infer_separator(&expr),
    };

    match expr.find(sep) {
        None => vec![expr.into_owned()],
        Some(pos) => {
            let rest = if pos == 0 { &expr[sep.len()..] } else { &expr[..] };
            if ignore_separator {
                return vec![rest.to_string()];
            }
            rest.split(sep).map(str::to_string).collect()
        }
    }
}

/// Pick `.` or `/` by occurrence count; ties go to `/`.
pub fn infer_separator(expr: &str) -> &'static str {
    if expr.matches('.').count() > expr.matches('/').count() {
        "."
    } else {
        "/"
    }
}

/// Compile segments into a path expression.
///
/// The empty path compiles to `""`. Dot paths are never root-prefixed;
/// other separators are prepended unless `ignore_leading` is set.
///
/// # Example
///
/// ```
/// use json_magic_pointer::{compile_path, Separator};
///
/// assert_eq!(compile_path(&["a", "b", "c"], None, false), "/a/b/c");
/// assert_eq!(compile_path(&["a", "b", "c"], Some(&Separator::Dot), false), "a.b.c");
/// let sep = Separator::Custom("$$".into());
/// assert_eq!(compile_path(&["a", "b", "c"], Some(&sep), true), "a$$b$$c");
/// ```
pub fn compile_path<S: AsRef<str>>(
    segments: &[S],
    separator: Option<&Separator>,
    ignore_leading: bool,
) -> String {
    if segments.is_empty() {
        return String::new();
    }
    let sep = separator.map(Separator::as_str).filter(|s| !s.is_empty()).unwrap_or("/");
    let mut out = String::new();
    if sep != "." && !ignore_leading {
        out.push_str(sep);
    }
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        out.push_str(segment.as_ref());
    }
    out
}

/// The path a scalar root is reported under: `""` in dot notation,
/// the separator itself otherwise.
pub fn root_path(separator: &Separator) -> String {
    if separator.is_dot() {
        String::new()
    } else {
        separator.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sep(name: &str) -> Separator {
        Separator::from_name(name).unwrap()
    }

    #[test]
    fn test_parse_inferred() {
        assert_eq!(parse_path("a/b/c", None, false), vec!["a", "b", "c"]);
        assert_eq!(parse_path("/a/b/c", None, false), vec!["a", "b", "c"]);
        assert_eq!(parse_path("a.b.c", None, false), vec!["a", "b", "c"]);
        assert_eq!(parse_path("/a.b.c", None, false), vec!["/a", "b", "c"]);
        assert_eq!(parse_path("a", None, false), vec!["a"]);
        assert_eq!(parse_path("", None, false), Path::new());
        // tie goes to slash
        assert_eq!(parse_path("a.b/c", None, false), vec!["a.b", "c"]);
    }

    #[test]
    fn test_parse_ignore_separator() {
        assert_eq!(parse_path(".a.b.c", None, true), vec!["a.b.c"]);
        assert_eq!(parse_path("/a/b/c", None, true), vec!["a/b/c"]);
        assert_eq!(parse_path(".a/b/c", None, true), vec![".a/b/c"]);
        assert_eq!(parse_path(".a/b/c", Some(&sep(".")), true), vec!["a/b/c"]);
        assert_eq!(parse_path(".a/b/c", Some(&sep("dot")), true), vec!["a/b/c"]);
        assert_eq!(parse_path("/a.b.c", Some(&sep("/")), true), vec!["a.b.c"]);
    }

    #[test]
    fn test_parse_segments_unchanged() {
        let segments = vec!["a/b".to_string(), "".to_string()];
        assert_eq!(parse_path(&segments, Some(&Separator::Dot), true), segments);
    }

    #[test]
    fn test_parse_strips_only_one_leading_separator() {
        assert_eq!(parse_path("//a", None, false), vec!["", "a"]);
        assert_eq!(parse_path("/", None, false), vec![""]);
    }

    #[test]
    fn test_compile() {
        assert_eq!(compile_path(&["a", "b", "c"], None, false), "/a/b/c");
        assert_eq!(compile_path(&["a", "b", "c"], None, true), "a/b/c");
        assert_eq!(compile_path(&["a", "b", "c"], Some(&sep("dot")), false), "a.b.c");
        assert_eq!(compile_path(&["a"], Some(&sep("$$")), false), "$$a");
        assert_eq!(compile_path::<&str>(&[], None, false), "");
    }

    #[test]
    fn test_root_path() {
        assert_eq!(root_path(&Separator::Slash), "/");
        assert_eq!(root_path(&Separator::Dot), "");
        assert_eq!(root_path(&sep("::")), "::");
    }
}
