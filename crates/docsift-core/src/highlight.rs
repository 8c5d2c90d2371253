//! Excerpt highlighting and truncation.
//!
//! Highlighting wraps every whole-word occurrence of a term in
//! [`MARK_OPEN`]/[`MARK_CLOSE`], keeping the matched text's original casing.
//! "Whole word" means the term is delimited by word boundaries on both
//! sides, so `cat` marks nothing in `"catalog cats"` even though the search
//! matcher accepts that document by substring containment.
//!
//! All terms are applied in a single pass, longest first, so inserted markup
//! is never re-matched and a phrase wins over a word it contains.
//!
//! # Truncation
//!
//! Text longer than the limit is cut just after the first sentence end
//! (`.`, `!`, `?`) found in `[limit - window, limit + window)`, or at the
//! limit itself when there is none. The kept text is trimmed and `...` is
//! appended. Lengths are counted in characters.

use regex::{Captures, Regex, RegexBuilder};
use serde::Deserialize;

pub const MARK_OPEN: &str = "<mark>";
pub const MARK_CLOSE: &str = "</mark>";
pub const ELLIPSIS: &str = "...";

/// Excerpt length limits, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ExcerptLimits {
    /// Limit for excerpts produced without any highlight terms.
    pub plain_chars: usize,
    /// Limit for excerpts that went through highlighting; larger to leave
    /// room for the markup.
    pub highlighted_chars: usize,
    /// How far around the limit to look for a sentence end.
    pub sentence_window: usize,
}

impl Default for ExcerptLimits {
    fn default() -> Self {
        Self {
            plain_chars: 1500,
            highlighted_chars: 2000,
            sentence_window: 100,
        }
    }
}

/// Mark whole-word occurrences of `terms` in `content` and truncate the
/// result for display.
pub fn highlight(
    content: &str,
    terms: &[String],
    case_sensitive: bool,
    limits: &ExcerptLimits,
) -> String {
    let mut terms: Vec<&str> = terms
        .iter()
        .map(String::as_str)
        .filter(|t| !t.trim().is_empty())
        .collect();

    if terms.is_empty() {
        return truncate_excerpt(content, limits.plain_chars, limits.sentence_window);
    }

    terms.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    terms.dedup();

    let marked = match whole_word_pattern(&terms, case_sensitive) {
        Some(re) => re
            .replace_all(content, |caps: &Captures| {
                format!("{}{}{}", MARK_OPEN, &caps[0], MARK_CLOSE)
            })
            .into_owned(),
        None => content.to_string(),
    };

    truncate_excerpt(&marked, limits.highlighted_chars, limits.sentence_window)
}

fn whole_word_pattern(terms: &[&str], case_sensitive: bool) -> Option<Regex> {
    let alternation = terms
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"\b(?:{})\b", alternation);

    match RegexBuilder::new(&pattern)
        .case_insensitive(!case_sensitive)
        .build()
    {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(terms = terms.len(), error = %e, "highlight pattern rejected; excerpt left unmarked");
            None
        }
    }
}

/// Shorten `text` to roughly `max_chars` characters, preferring to stop at a
/// sentence end within `window` characters of the limit.
pub fn truncate_excerpt(text: &str, max_chars: usize, window: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_chars {
        return text.to_string();
    }

    let start = max_chars.saturating_sub(window);
    let end = (max_chars + window).min(chars.len());
    let break_point = (start..end)
        .find(|&i| matches!(chars[i], '.' | '!' | '?'))
        .map(|i| i + 1)
        .unwrap_or(max_chars);

    let kept: String = chars[..break_point].iter().collect();
    let mut out = close_open_mark(kept.trim());
    if break_point < chars.len() {
        out.push_str(ELLIPSIS);
    }
    out
}

/// Drop a mark tag cut in half at the end of `text` and close a mark left
/// open by the cut.
fn close_open_mark(text: &str) -> String {
    let mut out = text.to_string();
    if let Some(lt) = out.rfind('<') {
        let tail = &out[lt..];
        if !tail.contains('>') && (MARK_OPEN.starts_with(tail) || MARK_CLOSE.starts_with(tail)) {
            out.truncate(lt);
            out.truncate(out.trim_end().len());
        }
    }
    if out.matches(MARK_OPEN).count() > out.matches(MARK_CLOSE).count() {
        out.push_str(MARK_CLOSE);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(ts: &[&str]) -> Vec<String> {
        ts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn substring_inside_word_is_not_marked() {
        let out = highlight("catalog cats", &terms(&["cat"]), false, &ExcerptLimits::default());
        assert_eq!(out, "catalog cats");
        assert!(!out.contains(MARK_OPEN));
    }

    #[test]
    fn case_insensitive_keeps_original_casing() {
        let out = highlight("Rust rust RUST", &terms(&["rust"]), false, &ExcerptLimits::default());
        assert_eq!(out, "<mark>Rust</mark> <mark>rust</mark> <mark>RUST</mark>");
    }

    #[test]
    fn case_sensitive_marks_exact_only() {
        let out = highlight("Rust rust", &terms(&["rust"]), true, &ExcerptLimits::default());
        assert_eq!(out, "Rust <mark>rust</mark>");
    }

    #[test]
    fn phrase_wins_over_contained_word() {
        let out = highlight(
            "the quick fox ran",
            &terms(&["fox", "quick fox"]),
            false,
            &ExcerptLimits::default(),
        );
        assert_eq!(out, "the <mark>quick fox</mark> ran");
    }

    #[test]
    fn markup_is_not_rematched() {
        let out = highlight("mark the spot", &terms(&["mark", "spot"]), false, &ExcerptLimits::default());
        assert_eq!(out, "<mark>mark</mark> the <mark>spot</mark>");
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let out = highlight("price is 5.00 today", &terms(&["5.00"]), false, &ExcerptLimits::default());
        assert_eq!(out, "price is <mark>5.00</mark> today");
        let none = highlight("price is 5x00 today", &terms(&["5.00"]), false, &ExcerptLimits::default());
        assert!(!none.contains(MARK_OPEN));
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_excerpt("short.", 1500, 100), "short.");
    }

    #[test]
    fn truncates_after_first_sentence_end_in_window() {
        let text = format!("{}. {}", "a".repeat(1450), "b".repeat(200));
        let out = truncate_excerpt(&text, 1500, 100);
        assert_eq!(out, format!("{}....", "a".repeat(1450)));
    }

    #[test]
    fn truncates_at_limit_without_sentence_end() {
        let text = "x".repeat(1700);
        let out = truncate_excerpt(&text, 1500, 100);
        assert_eq!(out.chars().count(), 1503);
        assert!(out.ends_with(ELLIPSIS));
    }

    #[test]
    fn sentence_end_at_very_end_adds_no_ellipsis() {
        let text = format!("{}.", "z".repeat(1550));
        let out = truncate_excerpt(&text, 1500, 100);
        assert_eq!(out, text);
    }

    #[test]
    fn cut_inside_mark_closes_it() {
        let inside_word = format!("{}{}needle{}", "x".repeat(10), MARK_OPEN, MARK_CLOSE);
        let out = truncate_excerpt(&inside_word, 19, 0);
        assert_eq!(out, format!("{}{}nee{}...", "x".repeat(10), MARK_OPEN, MARK_CLOSE));

        let inside_tag = format!("{}{}needle{}", "x".repeat(10), MARK_OPEN, MARK_CLOSE);
        let out = truncate_excerpt(&inside_tag, 13, 0);
        assert_eq!(out, format!("{}...", "x".repeat(10)));
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "é".repeat(20);
        let out = truncate_excerpt(&text, 10, 5);
        assert_eq!(out, format!("{}...", "é".repeat(10)));
    }

    #[test]
    fn highlighted_excerpts_use_larger_limit() {
        let content = format!("needle {}", "w ".repeat(1000));
        let out = highlight(&content, &terms(&["needle"]), false, &ExcerptLimits::default());
        assert!(out.starts_with("<mark>needle</mark>"));
        assert!(out.chars().count() > 1500);
        let plain = highlight(&content, &[], false, &ExcerptLimits::default());
        assert!(plain.chars().count() <= 1503);
    }
}
