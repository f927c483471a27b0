//! Shared utility functions.

/// Keep at most `max_chars` characters of `s`.
///
/// Budgets in this crate are counted in characters, not bytes, so a cut never
/// lands inside a multi-byte sequence.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Number of characters in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn squash_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
