//! Code normalizer: a canonical form of a method body that is blind to
//! comments and whitespace, used only to decide whether a before/after
//! pair changed anything but cosmetics.
//!
//! Every language gets C-family comments (`//`, `/* */`) removed while
//! string and char literals are left intact. Languages whose comment
//! marker is a leading `#` additionally lose such lines.
//!
//! Normalized text is never written out; stored code stays verbatim.

mod scanner;

use secvul_core::constants::HASH_COMMENT_LANGUAGES;

use self::scanner::{scan, Mode};

/// Which comment syntaxes a language's bodies are scanned with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `//` and `/* */` only.
    CFamily,
    /// `//`, `/* */` and whole lines whose first non-blank char is `#`.
    CFamilyAndHash,
}

impl CommentStyle {
    /// Pick the style for a declared language. Unknown or missing
    /// languages get C-family handling.
    pub fn for_language(language: Option<&str>) -> Self {
        match language {
            Some(lang)
                if HASH_COMMENT_LANGUAGES
                    .iter()
                    .any(|h| h.eq_ignore_ascii_case(lang.trim())) =>
            {
                Self::CFamilyAndHash
            }
            _ => Self::CFamily,
        }
    }

    fn hash_comments(self) -> bool {
        self == Self::CFamilyAndHash
    }
}

/// Canonical compare form of `src`: comments removed, all whitespace
/// removed. Missing or empty input yields an empty string.
///
/// `normalize_for_compare(normalize_for_compare(s)) == normalize_for_compare(s)`
/// for every input and language.
pub fn normalize_for_compare(src: Option<&str>, language: Option<&str>) -> String {
    match src {
        Some(src) if !src.is_empty() => {
            scan(src, CommentStyle::for_language(language).hash_comments(), Mode::Compare)
        }
        _ => String::new(),
    }
}

/// Remove comments but keep whitespace and line structure. A removed
/// hash-comment line leaves its indentation and line break behind.
pub fn strip_comments(src: &str, language: Option<&str>) -> String {
    scan(src, CommentStyle::for_language(language).hash_comments(), Mode::Strip)
}

/// True when `before` and `after` normalize to the same text, i.e. the
/// change touched only comments or whitespace.
pub fn is_cosmetic_change(before: &str, after: &str, language: Option<&str>) -> bool {
    normalize_for_compare(Some(before), language) == normalize_for_compare(Some(after), language)
}
