//! Document classification.
//!
//! Two strategies implement [`Classifier`]:
//!
//! - [`KeywordClassifier`] scores text against per-category keyword lists.
//! - [`ModelClassifier`] predicts with a trained naive Bayes model and falls
//!   back to keyword scoring while untrained.
//!
//! # Keyword scoring
//!
//! For each category, every keyword contributes `+1` if it appears as a
//! whole token, plus `0.5` for each non-overlapping substring occurrence in
//! the lowercased text. The sum is divided by the number of keywords. The
//! highest normalized score wins (ties go to the earlier category) if it
//! exceeds the threshold; otherwise the text is [`FALLBACK_CATEGORY`].
//!
//! The keyword table sits behind a [`RwLock`]: scoring takes the read lock,
//! [`KeywordClassifier::add_category_keywords`] takes the write lock.

mod keywords;
mod model;

pub use model::{ModelClassifier, NaiveBayesModel, MIN_TRAINING_DOCUMENTS, MIN_TRAINING_LABELS};

use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard};

use crate::error::{CoreError, Result};
use crate::models::CategoryScore;
use crate::tokenize::token_set;

/// Label assigned when no category scores above the threshold.
pub const FALLBACK_CATEGORY: &str = "Other";

/// Minimum winning score (exclusive).
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// A classification strategy.
pub trait Classifier: Send + Sync {
    /// Strategy name as used in configuration (`"keyword"`, `"model"`).
    fn name(&self) -> &'static str;

    /// Assign one category label to `content`.
    fn classify(&self, content: &str) -> Result<String>;

    /// Keyword table backing this classifier, used for confidence scoring
    /// and category management.
    fn keywords(&self) -> &KeywordClassifier;

    /// Per-category confidence in `[0.0, 1.0]`, in registration order.
    fn classification_confidence(&self, content: &str) -> Result<Vec<CategoryScore>> {
        self.keywords().classification_confidence(content)
    }

    fn classify_batch(&self, contents: &[String]) -> Result<Vec<String>> {
        contents.iter().map(|c| self.classify(c)).collect()
    }
}

/// Ordered category labels plus the keyword lists used to score them.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    /// Every known label, including [`FALLBACK_CATEGORY`].
    categories: Vec<String>,
    /// Scored categories in registration order.
    keywords: Vec<(String, Vec<String>)>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        let keywords: Vec<(String, Vec<String>)> = keywords::DEFAULT_KEYWORDS
            .iter()
            .map(|(category, words)| {
                (
                    category.to_string(),
                    words.iter().map(|w| w.to_string()).collect(),
                )
            })
            .collect();
        let mut categories: Vec<String> = keywords.iter().map(|(c, _)| c.clone()).collect();
        categories.push(FALLBACK_CATEGORY.to_string());
        Self {
            categories,
            keywords,
        }
    }
}

impl KeywordTable {
    /// A table with no categories besides the fallback.
    pub fn empty() -> Self {
        Self {
            categories: vec![FALLBACK_CATEGORY.to_string()],
            keywords: Vec::new(),
        }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn keywords_for(&self, category: &str) -> Option<&[String]> {
        self.keywords
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, words)| words.as_slice())
    }

    /// Add keywords to `category`, registering it at the end if it is new.
    /// Keywords are lowercased and trimmed; blanks and duplicates are
    /// skipped. Returns how many keywords were added.
    pub fn add(&mut self, category: &str, new_keywords: &[String]) -> usize {
        let idx = match self.keywords.iter().position(|(c, _)| c == category) {
            Some(idx) => idx,
            None => {
                self.keywords.push((category.to_string(), Vec::new()));
                if !self.categories.iter().any(|c| c == category) {
                    self.categories.push(category.to_string());
                }
                self.keywords.len() - 1
            }
        };

        let words = &mut self.keywords[idx].1;
        let before = words.len();
        for kw in new_keywords {
            let kw = kw.trim().to_lowercase();
            if !kw.is_empty() && !words.contains(&kw) {
                words.push(kw);
            }
        }
        words.len() - before
    }

    /// Uncapped normalized score of every scored category, in order.
    fn scores(&self, content: &str) -> Vec<(&str, f64)> {
        let lowered = content.to_lowercase();
        let tokens: HashSet<String> = token_set(content);

        self.keywords
            .iter()
            .map(|(category, words)| {
                if words.is_empty() {
                    return (category.as_str(), 0.0);
                }
                let raw: f64 = words
                    .iter()
                    .map(|kw| {
                        let whole = if tokens.contains(kw) { 1.0 } else { 0.0 };
                        whole + 0.5 * lowered.matches(kw.as_str()).count() as f64
                    })
                    .sum();
                (category.as_str(), raw / words.len() as f64)
            })
            .collect()
    }
}

/// Keyword-scoring classifier.
#[derive(Debug)]
pub struct KeywordClassifier {
    table: RwLock<KeywordTable>,
    threshold: f64,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(KeywordTable::default(), DEFAULT_THRESHOLD)
    }
}

impl KeywordClassifier {
    pub fn new(table: KeywordTable, threshold: f64) -> Self {
        Self {
            table: RwLock::new(table),
            threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, KeywordTable>> {
        self.table.read().map_err(|_| CoreError::LockPoisoned)
    }

    /// Best keyword category for `content`, or [`FALLBACK_CATEGORY`].
    pub fn classify_by_keywords(&self, content: &str) -> Result<String> {
        if content.trim().is_empty() {
            return Ok(FALLBACK_CATEGORY.to_string());
        }

        let table = self.read()?;
        let mut best: Option<(&str, f64)> = None;
        for (category, score) in table.scores(content) {
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((category, score)),
            }
        }

        let label = match best {
            Some((category, score)) if score > self.threshold => category,
            _ => FALLBACK_CATEGORY,
        };
        tracing::debug!(category = label, "keyword classification");
        Ok(label.to_string())
    }

    pub fn classification_confidence(&self, content: &str) -> Result<Vec<CategoryScore>> {
        let table = self.read()?;
        Ok(table
            .scores(content)
            .into_iter()
            .map(|(category, score)| CategoryScore {
                category: category.to_string(),
                score: score.min(1.0),
            })
            .collect())
    }

    /// All labels, including the fallback and any added at runtime.
    pub fn categories(&self) -> Result<Vec<String>> {
        Ok(self.read()?.categories().to_vec())
    }

    /// Keywords of `category`; empty for unknown categories.
    pub fn category_keywords(&self, category: &str) -> Result<Vec<String>> {
        Ok(self
            .read()?
            .keywords_for(category)
            .map(<[String]>::to_vec)
            .unwrap_or_default())
    }

    pub fn add_category_keywords(&self, category: &str, keywords: &[String]) -> Result<usize> {
        let mut table = self.table.write().map_err(|_| CoreError::LockPoisoned)?;
        let added = table.add(category, keywords);
        tracing::info!(category, added, "category keywords updated");
        Ok(added)
    }
}

impl Classifier for KeywordClassifier {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn classify(&self, content: &str) -> Result<String> {
        self.classify_by_keywords(content)
    }

    fn keywords(&self) -> &KeywordClassifier {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn blank_content_is_other() {
        let c = KeywordClassifier::default();
        assert_eq!(c.classify("").unwrap(), "Other");
        assert_eq!(c.classify("   \n").unwrap(), "Other");
    }

    #[test]
    fn domain_samples() {
        let c = KeywordClassifier::default();
        assert_eq!(c.classify("legal contract clause liability").unwrap(), "Legal");
        assert_eq!(c.classify("football match tournament league").unwrap(), "Sports");
        // Medical and Healthcare tie; Medical is registered first.
        assert_eq!(
            c.classify("patient diagnosis treatment hospital").unwrap(),
            "Medical"
        );
    }

    #[test]
    fn classification_is_deterministic() {
        let c = KeywordClassifier::default();
        let text = "quarterly report with revenue forecast and performance metrics";
        let first = c.classify(text).unwrap();
        for _ in 0..5 {
            assert_eq!(c.classify(text).unwrap(), first);
        }
    }

    #[test]
    fn weak_signal_falls_back() {
        let c = KeywordClassifier::default();
        assert_eq!(c.classify("zzz qqq xyzzy").unwrap(), "Other");
    }

    #[test]
    fn confidence_is_bounded_and_ordered() {
        let c = KeywordClassifier::default();
        let text = "legal legal legal law court judge lawyer attorney contract clause";
        let scores = c.classification_confidence(text).unwrap();
        assert_eq!(scores.len(), 34);
        assert_eq!(scores[0].category, "Business");
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(&s.score)));

        let legal = scores.iter().find(|s| s.category == "Legal").unwrap();
        assert!(legal.score > 0.0);
    }

    #[test]
    fn confidence_caps_at_one() {
        let mut table = KeywordTable::empty();
        table.add("Tiny", &words(&["go"]));
        let c = KeywordClassifier::new(table, DEFAULT_THRESHOLD);
        let scores = c.classification_confidence("go go go go go").unwrap();
        assert_eq!(scores, vec![CategoryScore { category: "Tiny".into(), score: 1.0 }]);
    }

    #[test]
    fn ties_go_to_first_registered() {
        let mut table = KeywordTable::empty();
        table.add("First", &words(&["alpha", "beta"]));
        table.add("Second", &words(&["alpha", "beta"]));
        let c = KeywordClassifier::new(table, DEFAULT_THRESHOLD);
        assert_eq!(c.classify("alpha beta").unwrap(), "First");
    }

    #[test]
    fn substring_occurrences_count_half() {
        let mut table = KeywordTable::empty();
        table.add("Cats", &words(&["cat"]));
        let c = KeywordClassifier::new(table, DEFAULT_THRESHOLD);
        // "cat" is not a token here, but occurs twice as a substring.
        let scores = c.classification_confidence("catalog cats").unwrap();
        assert_eq!(scores[0].score, 1.0);
        assert_eq!(c.classify("catalog cats").unwrap(), "Cats");
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut table = KeywordTable::empty();
        table.add("Ten", &words(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]));
        // One substring hit and no whole-token hit: 0.5 / 10 = 0.05.
        let c = KeywordClassifier::new(table.clone(), 0.05);
        assert_eq!(c.classify("jx").unwrap(), "Other");
        let c = KeywordClassifier::new(table, 0.04);
        assert_eq!(c.classify("jx").unwrap(), "Ten");
    }

    #[test]
    fn add_keywords_extends_existing_category() {
        let c = KeywordClassifier::default();
        let before = c.category_keywords("Sports").unwrap().len();
        let added = c
            .add_category_keywords("Sports", &words(&["Cricket", " wicket ", "", "football"]))
            .unwrap();
        assert_eq!(added, 2);
        let after = c.category_keywords("Sports").unwrap();
        assert_eq!(after.len(), before + 2);
        assert!(after.contains(&"cricket".to_string()));
        assert!(after.contains(&"wicket".to_string()));
    }

    #[test]
    fn add_keywords_registers_new_category_once() {
        let c = KeywordClassifier::default();
        c.add_category_keywords("Open Source", &words(&["github", "license"]))
            .unwrap();
        c.add_category_keywords("Open Source", &words(&["contributor"]))
            .unwrap();

        let categories = c.categories().unwrap();
        assert_eq!(categories.iter().filter(|l| *l == "Open Source").count(), 1);
        assert_eq!(categories.last().unwrap(), "Open Source");
        assert_eq!(
            c.category_keywords("Open Source").unwrap(),
            words(&["github", "license", "contributor"])
        );
        assert_eq!(
            c.classify("github license contributor").unwrap(),
            "Open Source"
        );
    }

    #[test]
    fn unknown_category_has_no_keywords() {
        let c = KeywordClassifier::default();
        assert!(c.category_keywords("Astrology").unwrap().is_empty());
    }

    #[test]
    fn default_categories_end_with_other() {
        let categories = KeywordClassifier::default().categories().unwrap();
        assert_eq!(categories.len(), 35);
        assert_eq!(categories.first().unwrap(), "Business");
        assert_eq!(categories.last().unwrap(), "Other");
    }

    #[test]
    fn batch_matches_single() {
        let c = KeywordClassifier::default();
        let docs = words(&["football league season", "", "court verdict lawyer"]);
        assert_eq!(
            c.classify_batch(&docs).unwrap(),
            vec![
                c.classify(&docs[0]).unwrap(),
                "Other".to_string(),
                c.classify(&docs[2]).unwrap()
            ]
        );
    }
}
