//! Word tokenizer and stop-word filtering.
//!
//! A token is a maximal run of word characters (Unicode alphanumerics plus
//! underscore) between word boundaries, lowercased. Everything else is a
//! separator. Classification, search suggestions and similarity use the raw
//! token stream; keyword extraction, the statistical model and analytics
//! additionally drop stop words.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

fn word_regex() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\b\w+\b").expect("word pattern is valid"))
}

/// English stop words shared by keyword extraction, analytics and the
/// statistical classifier.
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "again", "all", "also", "an", "and", "any", "are", "at", "be", "been",
    "before", "being", "both", "but", "by", "can", "could", "did", "do", "does", "down", "during",
    "each", "few", "for", "from", "further", "had", "has", "have", "he", "her", "here", "him",
    "his", "how", "i", "in", "into", "is", "it", "its", "just", "may", "me", "might", "more",
    "most", "must", "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "out",
    "over", "own", "same", "she", "should", "some", "such", "than", "that", "the", "their", "them",
    "then", "these", "they", "this", "those", "through", "to", "too", "under", "up", "us", "very",
    "was", "we", "were", "what", "when", "where", "which", "who", "why", "will", "with", "would",
    "you", "your",
];

fn stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

/// Split `text` into lowercase word tokens, in order of appearance.
///
/// ```rust
/// use docsift_core::tokenize::tokenize;
///
/// assert_eq!(tokenize("Hello, World_1!"), vec!["hello", "world_1"]);
/// assert!(tokenize("").is_empty());
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    word_regex()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Distinct lowercase tokens of `text`.
pub fn token_set(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    word_regex()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn is_stop_word(token: &str) -> bool {
    stop_words().contains(token)
}

pub fn remove_stop_words(tokens: Vec<String>) -> Vec<String> {
    tokens.into_iter().filter(|t| !is_stop_word(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t").is_empty());
        assert!(token_set("").is_empty());
    }

    #[test]
    fn punctuation_separates_tokens() {
        assert_eq!(
            tokenize("state-of-the-art, e.g. C++"),
            vec!["state", "of", "the", "art", "e", "g", "c"]
        );
    }

    #[test]
    fn underscore_and_digits_are_word_chars() {
        assert_eq!(tokenize("snake_case v2 2024"), vec!["snake_case", "v2", "2024"]);
    }

    #[test]
    fn lowercases_unicode() {
        assert_eq!(tokenize("Ärzte Über"), vec!["ärzte", "über"]);
    }

    #[test]
    fn token_set_dedupes() {
        let set = token_set("Cat cat CAT dog");
        assert_eq!(set.len(), 2);
        assert!(set.contains("cat"));
        assert!(set.contains("dog"));
    }

    #[test]
    fn stop_words_removed() {
        let kept = remove_stop_words(tokenize("the quick fox and the hound"));
        assert_eq!(kept, vec!["quick", "fox", "hound"]);
    }
}
