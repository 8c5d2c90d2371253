//! Text helpers used during ingestion and display: title extraction,
//! cleanup, keyword extraction, summaries and human-readable formatting.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::tokenize::is_stop_word;

pub const UNTITLED: &str = "Untitled Document";
const MAX_TITLE_CHARS: usize = 200;
const TITLE_INDICATORS: &[&str] = &[
    "chapter",
    "section",
    "introduction",
    "conclusion",
    "abstract",
    "summary",
];

fn label_regex() -> &'static Regex {
    static LABEL: OnceLock<Regex> = OnceLock::new();
    LABEL.get_or_init(|| Regex::new(r"(?i)^(title:|subject:)").expect("label pattern is valid"))
}

fn alpha_word_regex() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\b[a-z]{3,}\b").expect("keyword pattern is valid"))
}

fn sentence_split_regex() -> &'static Regex {
    static SPLIT: OnceLock<Regex> = OnceLock::new();
    SPLIT.get_or_init(|| Regex::new(r"[.!?]+").expect("sentence pattern is valid"))
}

/// Pick a display title from extracted document text.
///
/// Tries, in order: the first line longer than three characters that cleans
/// to a non-empty title of at most 200 characters; a title-looking line
/// among the first ten; the first sentence; the first 100 characters.
pub fn extract_title(content: &str) -> String {
    if content.trim().is_empty() {
        return UNTITLED.to_string();
    }

    let lines: Vec<&str> = content.split('\n').collect();

    for line in &lines {
        let line = line.trim();
        if line.chars().count() > 3 {
            if let Some(title) = acceptable_title(line) {
                return title;
            }
        }
    }

    for line in lines.iter().take(10) {
        let line = line.trim();
        if !line.is_empty() && is_likely_title(line) {
            if let Some(title) = acceptable_title(line) {
                return title;
            }
        }
    }

    if let Some(first) = content.split('.').next().map(str::trim) {
        if !first.is_empty() && first.chars().count() <= MAX_TITLE_CHARS {
            return clean_title(first);
        }
    }

    let head: String = content.chars().take(100).collect();
    let head = head.trim();
    if head.is_empty() {
        UNTITLED.to_string()
    } else {
        clean_title(head)
    }
}

fn acceptable_title(line: &str) -> Option<String> {
    let title = clean_title(line);
    (!title.is_empty() && title.chars().count() <= MAX_TITLE_CHARS).then_some(title)
}

/// Collapse whitespace, drop a leading `Title:`/`Subject:` label, trim
/// ` .-_=+` from both ends and title-case single-case text.
pub fn clean_title(title: &str) -> String {
    let collapsed = title.split_whitespace().collect::<Vec<_>>().join(" ");
    let unlabeled = label_regex().replace(&collapsed, "");
    let trimmed = unlabeled.trim_matches(|c| matches!(c, ' ' | '.' | '-' | '_' | '=' | '+'));

    if is_upper(trimmed) || is_lower(trimmed) {
        title_case(trimmed)
    } else {
        trimmed.to_string()
    }
}

fn is_likely_title(line: &str) -> bool {
    let len = line.chars().count();
    if !(5..=100).contains(&len) {
        return false;
    }
    if is_upper(line) {
        return true;
    }
    let lowered = line.to_lowercase();
    if TITLE_INDICATORS.iter().any(|i| lowered.contains(i)) {
        return true;
    }
    let starts_upper = line.chars().next().is_some_and(char::is_uppercase);
    if line.split_whitespace().count() <= 8 && starts_upper {
        let capitals = line.chars().filter(|c| c.is_uppercase()).count();
        return capitals as f64 / len as f64 > 0.1;
    }
    false
}

fn is_upper(s: &str) -> bool {
    let mut cased = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        cased |= c.is_uppercase();
    }
    cased
}

fn is_lower(s: &str) -> bool {
    let mut cased = false;
    for c in s.chars() {
        if c.is_uppercase() {
            return false;
        }
        cased |= c.is_lowercase();
    }
    cased
}

/// Uppercase the first letter of every run of letters, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Collapse whitespace runs to single spaces, strip control characters and
/// trim.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| !c.is_control())
                .collect::<String>()
        })
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Most frequent ASCII-alphabetic words longer than three characters that
/// are not stop words, most frequent first. Ties keep first-seen order.
pub fn extract_keywords(text: &str, max: usize) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for m in alpha_word_regex().find_iter(&lowered) {
        let word = m.as_str();
        if word.len() <= 3 || is_stop_word(word) {
            continue;
        }
        let count = counts.entry(word).or_insert(0);
        if *count == 0 {
            order.push(word);
        }
        *count += 1;
    }

    // Stable sort keeps first-seen order among equal counts.
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.into_iter().take(max).map(str::to_string).collect()
}

/// First `max_sentences` sentences longer than ten characters, joined with
/// `". "` and terminated with a period.
pub fn summarize(content: &str, max_sentences: usize) -> String {
    if content.is_empty() {
        return "No content available".to_string();
    }
    let sentences: Vec<&str> = sentence_split_regex()
        .split(content)
        .map(str::trim)
        .filter(|s| s.chars().count() > 10)
        .take(max_sentences)
        .collect();
    if sentences.is_empty() {
        return "No meaningful content found".to_string();
    }
    let mut summary = sentences.join(". ");
    if !summary.ends_with(['.', '!', '?']) {
        summary.push('.');
    }
    summary
}

/// `0 B`, `512.0 B`, `1.5 KB`, ... up to terabytes.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}

/// `250ms`, `4.2s`, `3.5m`, `1.2h`.
pub fn format_duration(seconds: f64) -> String {
    if seconds < 1.0 {
        format!("{:.0}ms", seconds * 1000.0)
    } else if seconds < 60.0 {
        format!("{:.1}s", seconds)
    } else if seconds < 3600.0 {
        format!("{:.1}m", seconds / 60.0)
    } else {
        format!("{:.1}h", seconds / 3600.0)
    }
}

/// Replace path and shell-hostile characters with `_`, drop control
/// characters and cap the name at 255 characters, keeping the extension.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            other => other,
        })
        .collect();

    if cleaned.chars().count() <= 255 {
        return cleaned;
    }
    match cleaned.rsplit_once('.') {
        Some((stem, ext)) => {
            let keep = 255usize.saturating_sub(ext.chars().count() + 1);
            let stem: String = stem.chars().take(keep).collect();
            format!("{stem}.{ext}")
        }
        None => cleaned.chars().take(255).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_from_first_meaningful_line() {
        assert_eq!(extract_title("\n\n  Annual Report 2023 \nbody text"), "Annual Report 2023");
        assert_eq!(extract_title("ab\nSecond Line Here"), "Second Line Here");
    }

    #[test]
    fn title_labels_and_case() {
        assert_eq!(extract_title("TITLE: QUARTERLY RESULTS"), "Quarterly Results");
        assert_eq!(extract_title("subject: meeting notes"), "Meeting Notes");
        assert_eq!(extract_title("=== Mixed Case Heading ==="), "Mixed Case Heading");
    }

    #[test]
    fn blank_content_is_untitled() {
        assert_eq!(extract_title(""), UNTITLED);
        assert_eq!(extract_title("  \n\t"), UNTITLED);
    }

    #[test]
    fn overlong_lines_fall_back_to_first_chars() {
        let long = "word ".repeat(60);
        let title = extract_title(&long);
        assert!(title.chars().count() <= 100);
        assert!(title.starts_with("Word Word"));
    }

    #[test]
    fn title_case_follows_letter_runs() {
        assert_eq!(title_case("hello world-wide"), "Hello World-Wide");
        assert_eq!(title_case("v2beta"), "V2Beta");
    }

    #[test]
    fn clean_text_collapses_and_strips() {
        assert_eq!(clean_text("  a\t\tb \n c\u{7}d  "), "a b cd");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn keywords_by_frequency() {
        let text = "Rust rust RUST compiler compiler memory the and with safety";
        assert_eq!(extract_keywords(text, 3), vec!["rust", "compiler", "memory"]);
        assert!(extract_keywords("", 5).is_empty());
    }

    #[test]
    fn summary_takes_long_sentences() {
        let text = "Short. This sentence is long enough! Another long sentence here? Third long sentence as well.";
        assert_eq!(
            summarize(text, 2),
            "This sentence is long enough. Another long sentence here."
        );
        assert_eq!(summarize("", 3), "No content available");
        assert_eq!(summarize("Hi. Yo.", 3), "No meaningful content found");
    }

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512.0 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(0.25), "250ms");
        assert_eq!(format_duration(4.2), "4.2s");
        assert_eq!(format_duration(90.0), "1.5m");
        assert_eq!(format_duration(5400.0), "1.5h");
    }

    #[test]
    fn filenames_are_sanitized() {
        assert_eq!(sanitize_filename("a/b:c*?.txt"), "a_b_c__.txt");
        let long = format!("{}.pdf", "n".repeat(300));
        let safe = sanitize_filename(&long);
        assert_eq!(safe.chars().count(), 255);
        assert!(safe.ends_with(".pdf"));
    }
}
