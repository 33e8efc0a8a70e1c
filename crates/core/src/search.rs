//! Helpers for case-insensitive substring filters.

/// Build an `ILIKE` pattern matching `term` anywhere in the column.
///
/// `%`, `_` and `\` in the user term are escaped so they match literally
/// (PostgreSQL's default `LIKE` escape character is backslash). Returns
/// `None` for blank terms, which callers treat as "no filter".
pub fn contains_pattern(term: &str) -> Option<String> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }

    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    Some(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_term_in_wildcards() {
        assert_eq!(contains_pattern("Somativa"), Some("%Somativa%".to_string()));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(contains_pattern("  OP10 "), Some("%OP10%".to_string()));
    }

    #[test]
    fn blank_term_means_no_filter() {
        assert_eq!(contains_pattern(""), None);
        assert_eq!(contains_pattern("   "), None);
    }

    #[test]
    fn escapes_like_metacharacters() {
        assert_eq!(contains_pattern("50%"), Some("%50\\%%".to_string()));
        assert_eq!(contains_pattern("a_b"), Some("%a\\_b%".to_string()));
        assert_eq!(contains_pattern("c:\\x"), Some("%c:\\\\x%".to_string()));
    }
}
