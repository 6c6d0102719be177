//! Search keys for accent- and case-insensitive substring matching.
//!
//! Names are stored twice: once for display and once as a normalized key.
//! Searches normalize the keyword the same way and match it as a substring of
//! the key column, so "Café", "CAFE" and "cafe" all find each other without a
//! dedicated search index.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Decomposes `input` canonically, drops combining marks and everything that is
/// not a letter or digit, then lowercases what is left.
pub fn normalize(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// `LIKE` pattern matching `keyword` anywhere inside a normalized key.
pub fn like_pattern(keyword: &str) -> String {
    format!("%{}%", normalize(keyword))
}
