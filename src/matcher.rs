//! Keyword extraction from free-text searches.
//!
//! A table keyword is "used" when some whitespace-separated token equals it,
//! its plural (`+s`) or its gerund (`+ing`), compared case-insensitively.
//! No other stemming and no substring matching.

use crate::table::ReferenceTable;

/// Lower-cased whitespace tokens across all queries.
fn tokenize<S: AsRef<str>>(queries: &[S]) -> Vec<String> {
    queries
        .iter()
        .flat_map(|q| q.as_ref().split_whitespace())
        .map(str::to_lowercase)
        .collect()
}

/// True if `token` (already lower-case) is `keyword`, `keyword+s` or `keyword+ing`.
fn token_matches(token: &str, keyword: &str) -> bool {
    match token.strip_prefix(keyword) {
        Some(rest) => rest.is_empty() || rest == "s" || rest == "ing",
        None => false,
    }
}

/// Keywords of `table` used by any of `queries`, in table order and original casing.
/// Each keyword appears at most once.
pub fn matched_keywords<S: AsRef<str>>(queries: &[S], table: &ReferenceTable) -> Vec<String> {
    let tokens = tokenize(queries);
    if tokens.is_empty() {
        return Vec::new();
    }

    table
        .keywords()
        .filter(|kw| {
            let lower = kw.to_lowercase();
            tokens.iter().any(|t| token_matches(t, &lower))
        })
        .map(str::to_string)
        .collect()
}
