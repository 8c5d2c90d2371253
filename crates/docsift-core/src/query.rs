//! Query parsing and validation.
//!
//! A raw query is split into terms: every double-quoted span becomes one
//! phrase term (quotes stripped), and whatever remains outside the quotes is
//! split on whitespace. Phrases come first, in order of appearance, followed
//! by the bare words in order of appearance.

use std::sync::OnceLock;

use regex::Regex;

/// Longest query accepted by [`validate_query`], in characters.
pub const MAX_QUERY_CHARS: usize = 500;
/// Shortest query accepted by [`validate_query`], in characters.
pub const MIN_QUERY_CHARS: usize = 2;

fn quoted_regex() -> &'static Regex {
    static QUOTED: OnceLock<Regex> = OnceLock::new();
    QUOTED.get_or_init(|| Regex::new(r#""([^"]*)""#).expect("quote pattern is valid"))
}

/// Split a raw query into search terms.
///
/// ```rust
/// use docsift_core::query::parse_query;
///
/// assert_eq!(parse_query(r#""quick fox" jumps"#), vec!["quick fox", "jumps"]);
/// assert!(parse_query("").is_empty());
/// ```
pub fn parse_query(query: &str) -> Vec<String> {
    let re = quoted_regex();

    let phrases = re
        .captures_iter(query)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string());

    let remainder = re.replace_all(query, "");
    let words: Vec<String> = remainder
        .split_whitespace()
        .map(|w| w.to_string())
        .collect();

    phrases
        .chain(words)
        .filter(|term| !term.is_empty())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("search query cannot be empty")]
    Empty,
    #[error("search query must be at least {MIN_QUERY_CHARS} characters long")]
    TooShort,
    #[error("search query is too long (maximum {MAX_QUERY_CHARS} characters)")]
    TooLong,
}

/// Check a user-supplied query before searching and return its cleaned form.
///
/// Surrounding whitespace is trimmed and the characters `<>{}[]\` are
/// replaced with spaces.
pub fn validate_query(query: &str) -> Result<String, QueryError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(QueryError::Empty);
    }
    let len = trimmed.chars().count();
    if len < MIN_QUERY_CHARS {
        return Err(QueryError::TooShort);
    }
    if len > MAX_QUERY_CHARS {
        return Err(QueryError::TooLong);
    }
    Ok(trimmed
        .chars()
        .map(|c| match c {
            '<' | '>' | '{' | '}' | '[' | ']' | '\\' => ' ',
            other => other,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrase_then_words() {
        assert_eq!(parse_query(r#""quick fox" jumps"#), vec!["quick fox", "jumps"]);
    }

    #[test]
    fn phrases_precede_words_regardless_of_position() {
        assert_eq!(
            parse_query(r#"alpha "beta gamma" delta "epsilon""#),
            vec!["beta gamma", "epsilon", "alpha", "delta"]
        );
    }

    #[test]
    fn empty_and_blank_queries() {
        assert!(parse_query("").is_empty());
        assert!(parse_query("   \t ").is_empty());
        assert!(parse_query(r#""""#).is_empty());
        assert!(parse_query(r#"" ""#).is_empty());
    }

    #[test]
    fn unbalanced_quote_stays_in_word() {
        assert_eq!(parse_query(r#"say "hello"#), vec!["say", "\"hello"]);
    }

    #[test]
    fn removing_phrase_joins_neighbours_only_by_whitespace() {
        assert_eq!(parse_query(r#"a"b c"d"#), vec!["b c", "ad"]);
    }

    #[test]
    fn validate_rejects_bad_lengths() {
        assert_eq!(validate_query("  "), Err(QueryError::Empty));
        assert_eq!(validate_query("x"), Err(QueryError::TooShort));
        assert_eq!(validate_query(&"y".repeat(501)), Err(QueryError::TooLong));
    }

    #[test]
    fn validate_cleans_brackets() {
        assert_eq!(validate_query(" <b>fox</b> ").unwrap(), " b fox /b ");
    }
}
