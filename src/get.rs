//! Document retrieval and removal: `list`, `get` and `delete`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use docsift_core::text::{
    clean_text, extract_keywords, format_duration, format_file_size, sanitize_filename, summarize,
};
use docsift_core::DocumentStore;

use crate::config::Config;
use crate::sqlite_store::SqliteStore;

pub async fn run_list(config: &Config, category: Option<&str>) -> Result<()> {
    let store = SqliteStore::open(config).await?;
    let documents = match category {
        Some(c) => store.list_by_category(c).await?,
        None => store.list_all().await?,
    };

    if documents.is_empty() {
        println!("No documents.");
        return Ok(());
    }

    println!(
        "  {:>5}  {:<40} {:<20} {:>10}  {}",
        "ID", "TITLE", "CATEGORY", "SIZE", "UPLOADED"
    );
    println!("  {}", "-".repeat(100));
    for doc in &documents {
        println!(
            "  {:>5}  {:<40} {:<20} {:>10}  {}",
            doc.id,
            truncate(&doc.title, 40),
            truncate(doc.category.as_deref().unwrap_or("-"), 20),
            format_file_size(doc.size.max(0) as u64),
            doc.uploaded_at
        );
    }
    println!();
    println!("{} document(s)", documents.len());
    Ok(())
}

const SUMMARY_SENTENCES: usize = 2;
const KEYWORDS_SHOWN: usize = 8;

/// Print one document. With `save_raw`, also write its original bytes to
/// that path, or under the stored filename when the path is a directory.
pub async fn run_get(config: &Config, id: i64, save_raw: Option<&Path>) -> Result<()> {
    let store = SqliteStore::open(config).await?;
    let Some(doc) = store.get(id).await? else {
        bail!("Document not found: {}", id);
    };

    println!("--- Document ---");
    println!("id:          {}", doc.id);
    println!("title:       {}", doc.title);
    println!("filename:    {}", doc.filename);
    println!("type:        {}", doc.media_type);
    println!("size:        {}", format_file_size(doc.size.max(0) as u64));
    println!(
        "category:    {}",
        doc.category.as_deref().unwrap_or("-")
    );
    println!("uploaded:    {}", doc.uploaded_at);
    if let Some(seconds) = doc.processing_seconds {
        println!("processing:  {}", format_duration(seconds));
    }
    println!(
        "summary:     {}",
        clean_text(&summarize(&doc.content, SUMMARY_SENTENCES))
    );
    println!(
        "keywords:    {}",
        extract_keywords(&doc.content, KEYWORDS_SHOWN).join(", ")
    );
    println!();
    println!("--- Content ---");
    println!("{}", doc.content);

    if let Some(path) = save_raw {
        let Some(raw) = &doc.raw else {
            bail!("Document {} has no stored original", id);
        };
        let target = raw_target(path, &doc.filename);
        std::fs::write(&target, raw)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        println!();
        println!("Original saved to {}", target.display());
    }
    Ok(())
}

pub async fn run_delete(config: &Config, id: i64) -> Result<()> {
    let store = SqliteStore::open(config).await?;
    if !store.delete(id).await? {
        bail!("Document not found: {}", id);
    }
    tracing::info!(id, "document deleted");
    println!("Deleted document {}.", id);
    Ok(())
}

fn raw_target(path: &Path, filename: &str) -> PathBuf {
    if path.is_dir() {
        path.join(sanitize_filename(filename))
    } else {
        path.to_path_buf()
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("short", 40), "short");
        assert_eq!(truncate("Überraschung im Büro", 10), "Überras...");
    }

    #[test]
    fn raw_target_uses_stored_name_inside_directories() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert_eq!(
            raw_target(tmp.path(), "q3: plan/final?.txt"),
            tmp.path().join("q3_ plan_final_.txt")
        );
        let file = tmp.path().join("out.bin");
        assert_eq!(raw_target(&file, "ignored.txt"), file);
    }
}
