//! File ingestion: `docsift add`.
//!
//! Each file is read, its text extracted by media type, titled from the
//! first meaningful line, classified and stored together with the
//! original bytes. Directories are walked recursively and only files with
//! a supported extension are picked up. A failing file is reported and
//! skipped; the rest of the batch continues.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use walkdir::WalkDir;

use docsift_core::text::extract_title;
use docsift_core::{Classifier, DocumentStore, NewDocument};

use crate::classify::build_classifier;
use crate::config::Config;
use crate::extract::{extract_text, media_type_for_path};
use crate::sqlite_store::SqliteStore;

/// Turn raw file bytes into a document ready for storage.
///
/// `category` overrides classification when given.
pub fn prepare_document(
    filename: &str,
    bytes: Vec<u8>,
    media_type: &str,
    classifier: &dyn Classifier,
    category: Option<&str>,
) -> Result<NewDocument> {
    let start = Instant::now();

    let content = extract_text(&bytes, media_type)?;
    if content.is_empty() {
        bail!("no text could be extracted");
    }

    let title = extract_title(&content);
    let category = match category {
        Some(c) => c.to_string(),
        None => classifier.classify(&content)?,
    };

    Ok(NewDocument {
        filename: filename.to_string(),
        title,
        content,
        size: bytes.len() as i64,
        media_type: media_type.to_string(),
        category: Some(category),
        processing_seconds: Some(start.elapsed().as_secs_f64()),
        raw: Some(bytes),
    })
}

/// Expand `paths` into the files to ingest. Directories contribute their
/// supported files in name order; explicitly named files are kept as-is so
/// unsupported ones get reported.
pub fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry
                    .with_context(|| format!("Failed to walk directory: {}", path.display()))?;
                if entry.file_type().is_file() && media_type_for_path(entry.path()).is_some() {
                    files.push(entry.into_path());
                }
            }
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            bail!("No such file or directory: {}", path.display());
        }
    }
    Ok(files)
}

async fn ingest_file(
    path: &Path,
    config: &Config,
    classifier: &dyn Classifier,
    store: &SqliteStore,
    category: Option<&str>,
) -> Result<(i64, String, Option<String>)> {
    let Some(media_type) = media_type_for_path(path) else {
        bail!("unsupported file type");
    };

    let size = std::fs::metadata(path)?.len();
    if size > config.ingest.max_file_bytes {
        bail!(
            "file is {} bytes, limit is {}",
            size,
            config.ingest.max_file_bytes
        );
    }

    let bytes = tokio::fs::read(path).await?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let doc = prepare_document(&filename, bytes, media_type, classifier, category)?;
    let title = doc.title.clone();
    let label = doc.category.clone();
    let id = store.add(doc).await?;
    Ok((id, title, label))
}

pub async fn run_add(config: &Config, paths: &[PathBuf], category: Option<&str>) -> Result<()> {
    let files = collect_files(paths)?;
    if files.is_empty() {
        println!("No supported files found.");
        return Ok(());
    }

    let store = SqliteStore::open(config).await?;
    let classifier = build_classifier(config)?;

    let mut added = 0;
    let mut failed = 0;
    for path in &files {
        match ingest_file(path, config, classifier.as_ref(), &store, category).await {
            Ok((id, title, label)) => {
                added += 1;
                tracing::debug!(id, path = %path.display(), "document stored");
                println!(
                    "  added [{}] {} ({})",
                    id,
                    title,
                    label.as_deref().unwrap_or("-")
                );
            }
            Err(e) => {
                failed += 1;
                tracing::warn!(path = %path.display(), error = %e, "skipping file");
                println!("  skipped {}: {:#}", path.display(), e);
            }
        }
    }

    println!();
    println!("Added {} document(s), {} skipped.", added, failed);
    if added == 0 {
        bail!("no documents were added");
    }
    Ok(())
}
