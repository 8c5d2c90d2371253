//! Classifier construction from configuration, plus the `classify`,
//! `reclassify`, `train` and `categories` commands.

use std::sync::Arc;

use anyhow::{bail, Context, Result};

use docsift_core::classify::{MIN_TRAINING_DOCUMENTS, MIN_TRAINING_LABELS};
use docsift_core::{Classifier, DocumentStore, KeywordClassifier, KeywordTable, ModelClassifier};

use crate::config::Config;
use crate::sqlite_store::SqliteStore;

/// Keyword classifier with the built-in table plus `[classifier.keywords]`.
pub fn keyword_classifier(config: &Config) -> Result<KeywordClassifier> {
    let classifier = KeywordClassifier::new(KeywordTable::default(), config.classifier.threshold);
    for (category, words) in &config.classifier.keywords {
        let added = classifier.add_category_keywords(category, words)?;
        tracing::debug!(category = %category, added, "applied configured keywords");
    }
    Ok(classifier)
}

/// The strategy selected by `classifier.strategy`.
pub fn build_classifier(config: &Config) -> Result<Arc<dyn Classifier>> {
    let keywords = keyword_classifier(config)?;
    match config.classifier.strategy.as_str() {
        "keyword" => Ok(Arc::new(keywords)),
        "model" => Ok(Arc::new(ModelClassifier::new(
            keywords,
            config.classifier.model_path.clone(),
        ))),
        other => bail!("Unknown classifier strategy: '{}'", other),
    }
}

pub async fn run_classify(
    config: &Config,
    id: Option<i64>,
    text: Option<String>,
    confidence: bool,
) -> Result<()> {
    let content = match (id, text) {
        (_, Some(text)) => text,
        (Some(id), None) => {
            let store = SqliteStore::open(config).await?;
            match store.get(id).await? {
                Some(doc) => doc.content,
                None => bail!("Document not found: {}", id),
            }
        }
        (None, None) => bail!("Provide a document id or --text"),
    };

    let classifier = build_classifier(config)?;
    let category = classifier.classify(&content)?;
    println!("{}", category);

    if confidence {
        let mut scores = classifier.classification_confidence(&content)?;
        scores.retain(|s| s.score > 0.0);
        scores.sort_by(|a, b| b.score.total_cmp(&a.score));
        println!();
        for s in scores.iter().take(5) {
            println!("  {:<24} {:.3}", s.category, s.score);
        }
    }
    Ok(())
}

/// Re-run classification over one document, or all of them, and store any
/// changed labels.
pub async fn run_reclassify(config: &Config, id: Option<i64>) -> Result<()> {
    let store = SqliteStore::open(config).await?;
    let classifier = build_classifier(config)?;

    let documents = match id {
        Some(id) => match store.get(id).await? {
            Some(doc) => vec![doc],
            None => bail!("Document not found: {}", id),
        },
        None => store.list_all().await?,
    };

    let mut changed = 0;
    for doc in &documents {
        let category = classifier.classify(&doc.content)?;
        if doc.category.as_deref() != Some(category.as_str()) {
            store.update_category(doc.id, &category).await?;
            println!(
                "  [{}] {}: {} -> {}",
                doc.id,
                doc.title,
                doc.category.as_deref().unwrap_or("-"),
                category
            );
            changed += 1;
        }
    }

    println!(
        "Reclassified {} document(s), {} changed.",
        documents.len(),
        changed
    );
    Ok(())
}

pub async fn run_train(config: &Config) -> Result<()> {
    let Some(model_path) = config.classifier.model_path.clone() else {
        bail!("classifier.model_path must be set to train a model");
    };
    if let Some(parent) = model_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let store = SqliteStore::open(config).await?;
    let documents = store.list_all().await?;
    let classifier = ModelClassifier::new(keyword_classifier(config)?, Some(model_path.clone()));

    if classifier.train(&documents)? {
        println!("Model trained and saved to {}", model_path.display());
    } else {
        println!(
            "Not enough labelled data to train (need at least {} categorized documents across {} categories).",
            MIN_TRAINING_DOCUMENTS, MIN_TRAINING_LABELS
        );
    }
    Ok(())
}

/// With no argument, list every category with its keyword count and how
/// many stored documents carry it. With a category, list its keywords.
pub async fn run_categories(config: &Config, category: Option<String>) -> Result<()> {
    let classifier = keyword_classifier(config)?;

    if let Some(category) = category {
        if !classifier.categories()?.contains(&category) {
            bail!("Unknown category: '{}'", category);
        }
        let keywords = classifier.category_keywords(&category)?;
        println!("{} ({} keywords)", category, keywords.len());
        println!("  {}", keywords.join(", "));
        return Ok(());
    }

    let store = SqliteStore::open(config).await?;
    let documents = store.list_all().await?;

    println!("  {:<24} {:>8} {:>10}", "CATEGORY", "KEYWORDS", "DOCUMENTS");
    println!("  {}", "-".repeat(44));
    for name in classifier.categories()? {
        let keywords = classifier.category_keywords(&name)?.len();
        let count = documents
            .iter()
            .filter(|d| d.category.as_deref() == Some(name.as_str()))
            .count();
        println!("  {:<24} {:>8} {:>10}", name, keywords, count);
    }
    Ok(())
}
