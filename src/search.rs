//! Search commands: `search`, `filter`, `similar` and `suggest`.

use anyhow::{bail, Result};

use docsift_core::query::validate_query;
use docsift_core::search::suggest;
use docsift_core::{AdvancedQuery, DocumentStore, Scope, SearchEngine, SearchHit};

use crate::config::Config;
use crate::sqlite_store::SqliteStore;

pub async fn run_search(
    config: &Config,
    query: &str,
    scope: Scope,
    case_sensitive: bool,
    limit: Option<usize>,
) -> Result<()> {
    let query = validate_query(query)?;
    let store = SqliteStore::open(config).await?;
    let documents = store.list_all().await?;

    let engine = SearchEngine::new(config.search.excerpt_limits());
    let hits = engine.search(&documents, &query, scope, case_sensitive);
    let limit = limit.unwrap_or(config.search.limit);

    if hits.is_empty() {
        println!("No results.");
        return Ok(());
    }
    println!("{} result(s) for \"{}\"", hits.len(), query);
    println!();
    for hit in hits.iter().take(limit) {
        print_hit(hit, None);
    }
    Ok(())
}

pub async fn run_filter(config: &Config, query: AdvancedQuery) -> Result<()> {
    let store = SqliteStore::open(config).await?;
    let documents = store.list_all().await?;

    let engine = SearchEngine::new(config.search.excerpt_limits());
    let hits = engine.advanced_search(&documents, &query);

    if hits.is_empty() {
        println!("No results.");
        return Ok(());
    }
    for hit in hits.iter().take(config.search.limit) {
        print_hit(hit, None);
    }
    Ok(())
}

/// Documents similar to stored document `id` (excluding itself) or to
/// free `text`.
pub async fn run_similar(
    config: &Config,
    id: Option<i64>,
    text: Option<String>,
    threshold: Option<f64>,
) -> Result<()> {
    let threshold = threshold.unwrap_or(config.search.similarity_threshold);
    if !(0.0..=1.0).contains(&threshold) {
        bail!("--threshold must be in [0.0, 1.0]");
    }

    let store = SqliteStore::open(config).await?;
    let documents = store.list_all().await?;

    let (reference, exclude) = match (id, text) {
        (_, Some(text)) => (text, None),
        (Some(id), None) => match documents.iter().find(|d| d.id == id) {
            Some(doc) => (doc.content.clone(), Some(id)),
            None => bail!("Document not found: {}", id),
        },
        (None, None) => bail!("Provide a document id or --text"),
    };

    let engine = SearchEngine::new(config.search.excerpt_limits());
    let similar: Vec<_> = engine
        .find_similar(&documents, &reference, threshold)
        .into_iter()
        .filter(|s| Some(s.hit.id) != exclude)
        .collect();

    if similar.is_empty() {
        println!("No similar documents.");
        return Ok(());
    }
    for s in similar.iter().take(config.search.limit) {
        print_hit(&s.hit, Some(s.similarity));
    }
    Ok(())
}

pub async fn run_suggest(config: &Config, partial: &str, max: Option<usize>) -> Result<()> {
    let store = SqliteStore::open(config).await?;
    let documents = store.list_all().await?;

    for word in suggest(
        &documents,
        partial,
        max.unwrap_or(config.search.max_suggestions),
    ) {
        println!("{}", word);
    }
    Ok(())
}

fn print_hit(hit: &SearchHit, similarity: Option<f64>) {
    let doc = &hit.document;
    match similarity {
        Some(score) => println!("[{}] {} (similarity: {:.2})", hit.id, doc.title, score),
        None => println!("[{}] {}", hit.id, doc.title),
    }
    println!("    file: {} ({})", doc.filename, doc.media_type);
    println!(
        "    category: {}",
        doc.category.as_deref().unwrap_or("-")
    );
    println!("    uploaded: {}", doc.uploaded_at);
    println!("    > {}", preview(&hit.excerpt, 240));
    println!();
}

/// First `max` characters of an excerpt on one line.
fn preview(excerpt: &str, max: usize) -> String {
    let flat = excerpt.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        return flat;
    }
    let cut: String = flat.chars().take(max).collect();
    format!("{}...", cut.trim_end())
}
