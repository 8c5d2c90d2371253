//! Substring search, filtered search, similarity lookup and suggestions.
//!
//! Every operation works on a caller-supplied document snapshot and
//! preserves its order; nothing here ranks results. Matching is by
//! substring containment, while excerpts highlight whole words only (see
//! [`crate::highlight`]), so a document can match without any visible mark.

use std::collections::{BTreeSet, HashSet};

use serde::Deserialize;

use crate::highlight::{highlight, ExcerptLimits};
use crate::models::{Document, Scope, SearchHit, SimilarDocument};
use crate::query::parse_query;
use crate::similarity::jaccard_similarity;
use crate::tokenize::{token_set, tokenize};

/// Default Jaccard cut-off for [`SearchEngine::find_similar`].
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.3;
/// Shared terms highlighted in a similarity excerpt.
pub const MAX_SIMILARITY_HIGHLIGHTS: usize = 10;
/// Shortest partial word [`suggest`] completes.
pub const MIN_SUGGEST_CHARS: usize = 2;

/// Criteria for [`SearchEngine::advanced_search`]. Unset or blank fields
/// do not filter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdvancedQuery {
    /// Terms that must all appear in the title or content.
    pub include: Vec<String>,
    /// Terms none of which may appear in the title or content.
    pub exclude: Vec<String>,
    /// Exact category label.
    pub category: Option<String>,
    /// Substring of the media type, e.g. `"pdf"`.
    pub file_type: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    limits: ExcerptLimits,
}

impl SearchEngine {
    pub fn new(limits: ExcerptLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &ExcerptLimits {
        &self.limits
    }

    /// Documents whose `scope` text contains every term of `query`.
    ///
    /// A blank query, or one that parses to no terms, matches nothing.
    pub fn search(
        &self,
        documents: &[Document],
        query: &str,
        scope: Scope,
        case_sensitive: bool,
    ) -> Vec<SearchHit> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let terms = parse_query(query);
        if terms.is_empty() {
            return Vec::new();
        }

        let needles: Vec<String> = if case_sensitive {
            terms.clone()
        } else {
            terms.iter().map(|t| t.to_lowercase()).collect()
        };

        let hits: Vec<SearchHit> = documents
            .iter()
            .filter(|doc| {
                let text = searchable_text(doc, scope);
                let text = if case_sensitive {
                    text
                } else {
                    text.to_lowercase()
                };
                needles.iter().all(|n| text.contains(n.as_str()))
            })
            .map(|doc| self.hit(doc, &terms, case_sensitive))
            .collect();

        tracing::debug!(terms = terms.len(), scanned = documents.len(), hits = hits.len(), "search");
        hits
    }

    /// Filter by category, media type and include/exclude terms. Term tests
    /// are case-insensitive against `"{title} {content}"`.
    pub fn advanced_search(&self, documents: &[Document], query: &AdvancedQuery) -> Vec<SearchHit> {
        let include = normalized_terms(&query.include);
        let exclude = normalized_terms(&query.exclude);
        let category = query.category.as_deref().filter(|c| !c.is_empty());
        let file_type = query.file_type.as_deref().filter(|f| !f.is_empty());

        documents
            .iter()
            .filter(|doc| category.map_or(true, |c| doc.category.as_deref() == Some(c)))
            .filter(|doc| file_type.map_or(true, |f| doc.media_type.contains(f)))
            .filter(|doc| {
                let text = format!("{} {}", doc.title, doc.content).to_lowercase();
                include.iter().all(|t| text.contains(t.as_str()))
                    && !exclude.iter().any(|t| text.contains(t.as_str()))
            })
            .map(|doc| self.hit(doc, &include, false))
            .collect()
    }

    /// Documents whose content shares at least `threshold` Jaccard
    /// similarity with `reference`. Documents without any tokens are
    /// skipped. Up to [`MAX_SIMILARITY_HIGHLIGHTS`] shared terms, in sorted
    /// order, are highlighted.
    pub fn find_similar(
        &self,
        documents: &[Document],
        reference: &str,
        threshold: f64,
    ) -> Vec<SimilarDocument> {
        if reference.trim().is_empty() {
            return Vec::new();
        }
        let reference_tokens = token_set(reference);

        documents
            .iter()
            .filter_map(|doc| {
                let doc_tokens = token_set(&doc.content);
                if doc_tokens.is_empty() {
                    return None;
                }
                let similarity = jaccard_similarity(&reference_tokens, &doc_tokens);
                if similarity < threshold {
                    return None;
                }
                let shared: BTreeSet<&String> = reference_tokens.intersection(&doc_tokens).collect();
                let terms: Vec<String> = shared
                    .into_iter()
                    .take(MAX_SIMILARITY_HIGHLIGHTS)
                    .cloned()
                    .collect();
                Some(SimilarDocument {
                    hit: self.hit(doc, &terms, false),
                    similarity,
                })
            })
            .collect()
    }

    fn hit(&self, doc: &Document, terms: &[String], case_sensitive: bool) -> SearchHit {
        SearchHit {
            id: doc.id,
            document: doc.clone(),
            excerpt: highlight(&doc.content, terms, case_sensitive, &self.limits),
        }
    }
}

fn searchable_text(doc: &Document, scope: Scope) -> String {
    match scope {
        Scope::Title => doc.title.clone(),
        Scope::Content => doc.content.clone(),
        Scope::Both => format!("{} {}", doc.title, doc.content),
    }
}

fn normalized_terms(terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Content words that extend `partial`, sorted, at most `max`.
///
/// Candidates are the lowercased tokens of every document's content. The
/// prefix test is case-sensitive, so a partial with capitals completes
/// nothing. Exact matches are not suggestions.
pub fn suggest(documents: &[Document], partial: &str, max: usize) -> Vec<String> {
    let partial_len = partial.chars().count();
    if partial_len < MIN_SUGGEST_CHARS {
        return Vec::new();
    }

    let mut seen: HashSet<String> = HashSet::new();
    for doc in documents {
        for token in tokenize(&doc.content) {
            if token.starts_with(partial) && token.chars().count() > partial_len {
                seen.insert(token);
            }
        }
    }

    let mut suggestions: Vec<String> = seen.into_iter().collect();
    suggestions.sort();
    suggestions.truncate(max);
    suggestions
}
