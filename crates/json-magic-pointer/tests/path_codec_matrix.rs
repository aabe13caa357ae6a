use json_magic_pointer::{
    compile_path, format_json_pointer, parse_json_pointer, parse_path, PathError, PathInput,
    Separator,
};
use serde_json::json;

#[test]
fn pointer_parse_format_roundtrip_matrix() {
    let cases = ["", "/", "/foo", "/foo/bar", "/a~0b/c~1d", "/arr/0", "/~0/~1", "/foo///"];

    for pointer in cases {
        let path = parse_json_pointer(pointer).expect("valid pointer");
        let out = format_json_pointer(&path);
        assert_eq!(out, pointer);
    }
}

#[test]
fn parse_path_notation_matrix() {
    let cases: [(&str, &[&str]); 8] = [
        ("a/b/c", &["a", "b", "c"]),
        ("/a/b/c", &["a", "b", "c"]),
        ("a.b.c", &["a", "b", "c"]),
        (".a.b.c", &["a", "b", "c"]),
        ("/a.b.c", &["/a", "b", "c"]),
        ("0.a.b", &["0", "a", "b"]),
        ("0/a/b", &["0", "a", "b"]),
        ("plain", &["plain"]),
    ];

    for (expr, expected) in cases {
        assert_eq!(parse_path(expr, None, false), expected, "parsing {expr:?}");
    }
}

#[test]
fn compile_then_parse_matches_in_every_notation() {
    let segments = vec!["a".to_string(), "0".to_string(), "key".to_string()];
    for sep in [
        Separator::Slash,
        Separator::Dot,
        Separator::Custom("$$".to_string()),
        Separator::Custom("::".to_string()),
    ] {
        let compiled = compile_path(&segments, Some(&sep), false);
        assert_eq!(parse_path(&compiled, Some(&sep), false), segments, "via {sep}");
    }
}

#[test]
fn inferred_separator_resolves_to_same_location() {
    // Re-compiling an inferred path is not byte-identical but addresses
    // the same segments.
    let parsed = parse_path("a.b.c", None, false);
    let recompiled = compile_path(&parsed, None, false);
    assert_eq!(recompiled, "/a/b/c");
    assert_eq!(parse_path(&recompiled, None, false), parsed);
}

#[test]
fn dynamic_path_values() {
    let input = PathInput::try_from(&json!(["a", 1, "b"])).expect("segments");
    assert_eq!(parse_path(input, None, false), vec!["a", "1", "b"]);

    let input = PathInput::try_from(&json!(".x.y")).expect("expression");
    assert_eq!(parse_path(input, None, false), vec!["x", "y"]);

    assert_eq!(PathInput::try_from(&json!(true)), Err(PathError::InvalidPathType));
    assert_eq!(PathInput::try_from(&json!(null)), Err(PathError::InvalidPathType));
}
