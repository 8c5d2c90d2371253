//! Collection statistics: `docsift stats` and `docsift report`.

use std::path::Path;

use anyhow::{Context, Result};

use docsift_core::analytics::{category_analysis, generate_statistics, render_report};
use docsift_core::text::{format_duration, format_file_size};
use docsift_core::DocumentStore;

use crate::config::Config;
use crate::sqlite_store::SqliteStore;

pub async fn run_stats(config: &Config, json: bool) -> Result<()> {
    let store = SqliteStore::open(config).await?;
    let documents = store.list_all().await?;
    let stats = generate_statistics(&documents);

    if json {
        let value = serde_json::json!({
            "statistics": stats,
            "categories": category_analysis(&documents),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let db_size = std::fs::metadata(&config.db.path)
        .map(|m| m.len())
        .unwrap_or(0);

    println!("docsift collection stats");
    println!("========================");
    println!();
    println!("  Database:    {}", config.db.path.display());
    println!("  Size:        {}", format_file_size(db_size));
    println!();
    println!("  Documents:   {}", stats.total_documents);
    println!(
        "  Content:     {}",
        format_file_size(stats.total_size.max(0) as u64)
    );
    println!(
        "  Avg. processing: {}",
        format_duration(stats.avg_processing_time)
    );

    if let Some(trends) = &stats.upload_trends {
        println!(
            "  Upload days: {} ({:.1} per day)",
            trends.total_days, trends.avg_per_day
        );
    }

    if !stats.categories.is_empty() {
        println!();
        println!("  By category:");
        println!("  {:<28} {:>6} {:>12}", "CATEGORY", "DOCS", "AVG SIZE");
        println!("  {}", "-".repeat(48));
        for (category, summary) in category_analysis(&documents) {
            println!(
                "  {:<28} {:>6} {:>12}",
                category,
                summary.count,
                format_file_size(summary.avg_size.max(0.0) as u64)
            );
        }
    }

    if !stats.media_types.is_empty() {
        println!();
        println!("  By file type:");
        for (media_type, count) in &stats.media_types {
            println!("  {:<40} {:>6}", media_type, count);
        }
    }

    if let Some(content) = &stats.content {
        println!();
        println!(
            "  Words:       {} total, {} unique",
            content.total_words, content.unique_words
        );
        if !content.most_common_words.is_empty() {
            let common: Vec<String> = content
                .most_common_words
                .iter()
                .map(|(w, c)| format!("{w} ({c})"))
                .collect();
            println!("  Common:      {}", common.join(", "));
        }
    }
    println!();
    Ok(())
}

/// Write the plain-text analytics report to `out`, or stdout.
pub async fn run_report(config: &Config, out: Option<&Path>) -> Result<()> {
    let store = SqliteStore::open(config).await?;
    let documents = store.list_all().await?;

    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let report = render_report(&generate_statistics(&documents), &generated_at);

    match out {
        Some(path) => {
            std::fs::write(path, &report)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        None => println!("{}", report),
    }
    Ok(())
}
