//! Normalizer behavior and properties.

use proptest::prelude::*;
use secvul_extract::normalizer::{
    is_cosmetic_change, normalize_for_compare, strip_comments, CommentStyle,
};

fn norm(src: &str, lang: Option<&str>) -> String {
    normalize_for_compare(Some(src), lang)
}

#[test]
fn comment_markers_inside_strings_are_kept() {
    assert_eq!(
        norm("x = \"a//b\"; // real comment\ny=1;", Some("C")),
        "x=\"a//b\";y=1;"
    );
}

#[test]
fn escaped_quote_does_not_end_the_literal() {
    assert_eq!(norm(r#""a\"b" // c"#, Some("C")), r#""a\"b""#);
}

#[test]
fn leading_hash_line_contributes_nothing() {
    assert_eq!(
        norm("   # note\ncode()", Some("Python")),
        norm("code()", Some("Python"))
    );
}

#[test]
fn hash_lines_are_code_in_c_family_languages() {
    assert_eq!(norm("#include <a.h>\nint x;", Some("C")), "#include<a.h>intx;");
}

#[test]
fn block_comment_and_spacing_only_change_is_cosmetic() {
    assert!(is_cosmetic_change(
        "int parse(){ /*c*/ return 1; }",
        "int parse(){ return 1; }",
        Some("C"),
    ));
    assert_eq!(
        norm("int parse(){ /*c*/ return 1; }", Some("C")),
        "intparse(){return1;}"
    );
}

#[test]
fn identifier_change_is_not_cosmetic() {
    assert!(!is_cosmetic_change("int a = b;", "int a = c;", Some("C")));
}

#[test]
fn missing_or_empty_input_normalizes_to_empty() {
    assert_eq!(normalize_for_compare(None, Some("C")), "");
    assert_eq!(normalize_for_compare(Some(""), None), "");
    assert_eq!(normalize_for_compare(Some(" \n\t"), None), "");
}

#[test]
fn language_lookup_is_case_insensitive() {
    assert_eq!(CommentStyle::for_language(Some("python")), CommentStyle::CFamilyAndHash);
    assert_eq!(CommentStyle::for_language(Some("Ruby")), CommentStyle::CFamilyAndHash);
    assert_eq!(CommentStyle::for_language(Some("Java")), CommentStyle::CFamily);
    assert_eq!(CommentStyle::for_language(None), CommentStyle::CFamily);
}

#[test]
fn strip_comments_preserves_layout() {
    let src = "def f():\n    # explain\n    return 1  # tail\n";
    assert_eq!(
        strip_comments(src, Some("Python")),
        "def f():\n    \n    return 1  # tail\n"
    );
    assert_eq!(
        strip_comments("int a; /* gone */\nint b; // gone\n", Some("C")),
        "int a; \nint b; \n"
    );
}

fn language() -> impl Strategy<Value = Option<&'static str>> {
    prop_oneof![Just(None), Just(Some("C")), Just(Some("Python")), Just(Some("Java"))]
}

/// Biased towards characters that drive the scanner.
fn source() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-c/*#\"'\\\\ \t\r\n]{0,48}",
        any::<String>(),
    ]
}

proptest! {
    #[test]
    fn normalization_is_idempotent(src in source(), lang in language()) {
        let once = norm(&src, lang);
        let twice = norm(&once, lang);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn normalized_text_has_no_whitespace(src in source(), lang in language()) {
        let out = norm(&src, lang);
        prop_assert!(!out.chars().any(char::is_whitespace), "{:?}", out);
    }

    #[test]
    fn whitespace_only_edits_are_cosmetic(src in "[a-z;=(){} ]{0,32}", lang in language()) {
        let spaced = src.replace(' ', " \n\t ");
        prop_assert!(is_cosmetic_change(&src, &spaced, lang));
    }
}
