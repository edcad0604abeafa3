// src/utils.rs
/// Normalize a free-text term for matching: trimmed, lowercase.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Case-insensitive term match: equal, or one term contained in the other.
/// Empty terms never match anything.
pub fn terms_match(a: &str, b: &str) -> bool {
    let a = normalize_term(a);
    let b = normalize_term(b);

    if a.is_empty() || b.is_empty() {
        return false;
    }

    a == b || a.contains(&b) || b.contains(&a)
}

/// Split a comma-separated input into trimmed, non-empty entries.
pub fn split_terms(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
