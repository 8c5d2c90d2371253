//! Collection statistics and the plain-text analytics report.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Write as _;

use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;

use crate::models::Document;
use crate::tokenize::{is_stop_word, tokenize};

const MIB: f64 = 1024.0 * 1024.0;
const SMALL_LIMIT: i64 = 1024 * 1024;
const MEDIUM_LIMIT: i64 = 10 * 1024 * 1024;
const LARGE_LIMIT: i64 = 100 * 1024 * 1024;

/// Label used for documents without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollectionStats {
    pub total_documents: usize,
    /// Sum of payload sizes in bytes.
    pub total_size: i64,
    /// Mean over documents with a recorded processing time, else `0`.
    pub avg_processing_time: f64,
    pub processing: Option<ProcessingTimes>,
    pub categories: BTreeMap<String, usize>,
    pub media_types: BTreeMap<String, usize>,
    pub upload_trends: Option<UploadTrends>,
    pub content: Option<ContentStats>,
    pub performance: Option<PerformanceMetrics>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingTimes {
    pub min: f64,
    pub max: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadTrends {
    /// Uploads per `YYYY-MM-DD`.
    pub daily: BTreeMap<String, usize>,
    /// Uploads per `YYYY-MM`.
    pub monthly: BTreeMap<String, usize>,
    pub total_days: usize,
    pub avg_per_day: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentStats {
    pub avg_content_length: f64,
    pub min_content_length: usize,
    pub max_content_length: usize,
    pub avg_word_count: f64,
    pub min_word_count: usize,
    pub max_word_count: usize,
    pub avg_title_length: f64,
    pub total_words: usize,
    pub unique_words: usize,
    /// Up to ten `(word, count)` pairs, most frequent first.
    pub most_common_words: Vec<(String, usize)>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SizeDistribution {
    pub small: usize,
    pub medium: usize,
    pub large: usize,
    pub xlarge: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    pub size_distribution: SizeDistribution,
    /// Mean processing time per size bucket, for buckets with timings.
    pub avg_processing_by_size: BTreeMap<String, f64>,
    /// Mean MiB/s over documents with positive size and processing time.
    pub processing_efficiency: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategorySummary {
    pub count: usize,
    pub total_size: i64,
    pub avg_size: f64,
    pub total_processing_time: f64,
    pub avg_processing_time: f64,
    pub media_types: BTreeMap<String, usize>,
}

pub fn generate_statistics(documents: &[Document]) -> CollectionStats {
    if documents.is_empty() {
        return CollectionStats::default();
    }

    let times: Vec<f64> = documents
        .iter()
        .filter_map(|d| d.processing_seconds)
        .collect();
    let (avg_processing_time, processing) = if times.is_empty() {
        (0.0, None)
    } else {
        let total: f64 = times.iter().sum();
        let min = times.iter().copied().fold(f64::INFINITY, f64::min);
        let max = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (
            total / times.len() as f64,
            Some(ProcessingTimes { min, max, total }),
        )
    };

    let mut categories = BTreeMap::new();
    let mut media_types = BTreeMap::new();
    for doc in documents {
        if let Some(category) = doc.category.as_deref().filter(|c| !c.is_empty()) {
            *categories.entry(category.to_string()).or_insert(0) += 1;
        }
        if !doc.media_type.is_empty() {
            *media_types.entry(doc.media_type.clone()).or_insert(0) += 1;
        }
    }

    CollectionStats {
        total_documents: documents.len(),
        total_size: documents.iter().map(|d| d.size).sum(),
        avg_processing_time,
        processing,
        categories,
        media_types,
        upload_trends: upload_trends(documents),
        content: Some(content_stats(documents)),
        performance: Some(performance_metrics(documents)),
    }
}

/// Parse a stored upload timestamp: `YYYY-MM-DD HH:MM:SS`, or ISO 8601
/// with a `T` separator and optional fraction, `Z` or offset.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if raw.contains('T') {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_local());
        }
        let trimmed = raw.trim_end_matches('Z');
        return NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f").ok();
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f").ok()
}

fn upload_trends(documents: &[Document]) -> Option<UploadTrends> {
    let dates: Vec<NaiveDateTime> = documents
        .iter()
        .filter_map(|d| parse_timestamp(&d.uploaded_at))
        .collect();
    if dates.is_empty() {
        return None;
    }

    let mut daily = BTreeMap::new();
    let mut monthly = BTreeMap::new();
    for date in &dates {
        *daily.entry(date.format("%Y-%m-%d").to_string()).or_insert(0) += 1;
        *monthly.entry(date.format("%Y-%m").to_string()).or_insert(0) += 1;
    }
    let total_days = daily.len();
    Some(UploadTrends {
        avg_per_day: dates.len() as f64 / total_days.max(1) as f64,
        daily,
        monthly,
        total_days,
    })
}

fn content_stats(documents: &[Document]) -> ContentStats {
    let n = documents.len() as f64;
    let mut lengths = Vec::with_capacity(documents.len());
    let mut word_counts = Vec::with_capacity(documents.len());
    let mut title_total = 0usize;

    let mut frequency: HashMap<String, usize> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();
    let mut vocabulary: HashSet<String> = HashSet::new();

    for doc in documents {
        lengths.push(doc.content.chars().count());
        title_total += doc.title.chars().count();

        let words = tokenize(&doc.content);
        word_counts.push(words.len());
        for word in words {
            if word.chars().count() > 2 && !is_stop_word(&word) {
                let count = frequency.entry(word.clone()).or_insert(0);
                if *count == 0 {
                    first_seen.push(word.clone());
                }
                *count += 1;
            }
            vocabulary.insert(word);
        }
    }

    first_seen.sort_by(|a, b| frequency[b].cmp(&frequency[a]));
    let most_common_words = first_seen
        .into_iter()
        .take(10)
        .map(|w| {
            let count = frequency[&w];
            (w, count)
        })
        .collect();

    let total_words: usize = word_counts.iter().sum();
    ContentStats {
        avg_content_length: lengths.iter().sum::<usize>() as f64 / n,
        min_content_length: lengths.iter().copied().min().unwrap_or(0),
        max_content_length: lengths.iter().copied().max().unwrap_or(0),
        avg_word_count: total_words as f64 / n,
        min_word_count: word_counts.iter().copied().min().unwrap_or(0),
        max_word_count: word_counts.iter().copied().max().unwrap_or(0),
        avg_title_length: title_total as f64 / n,
        total_words,
        unique_words: vocabulary.len(),
        most_common_words,
    }
}

fn size_bucket(size: i64) -> &'static str {
    if size < SMALL_LIMIT {
        "small"
    } else if size < MEDIUM_LIMIT {
        "medium"
    } else if size < LARGE_LIMIT {
        "large"
    } else {
        "xlarge"
    }
}

fn performance_metrics(documents: &[Document]) -> PerformanceMetrics {
    let mut distribution = SizeDistribution::default();
    let mut timings: BTreeMap<&'static str, Vec<f64>> = BTreeMap::new();
    let mut rates = Vec::new();

    for doc in documents {
        let bucket = size_bucket(doc.size);
        match bucket {
            "small" => distribution.small += 1,
            "medium" => distribution.medium += 1,
            "large" => distribution.large += 1,
            _ => distribution.xlarge += 1,
        }
        if let Some(t) = doc.processing_seconds.filter(|t| *t != 0.0) {
            timings.entry(bucket).or_default().push(t);
            if t > 0.0 && doc.size > 0 {
                rates.push(doc.size as f64 / MIB / t);
            }
        }
    }

    let avg_processing_by_size = timings
        .into_iter()
        .map(|(bucket, ts)| (bucket.to_string(), ts.iter().sum::<f64>() / ts.len() as f64))
        .collect();
    let processing_efficiency = if rates.is_empty() {
        0.0
    } else {
        rates.iter().sum::<f64>() / rates.len() as f64
    };

    PerformanceMetrics {
        size_distribution: distribution,
        avg_processing_by_size,
        processing_efficiency,
    }
}

/// Per-category totals and averages; documents without a category are
/// grouped under [`UNCATEGORIZED`]. A missing processing time counts as 0.
pub fn category_analysis(documents: &[Document]) -> BTreeMap<String, CategorySummary> {
    let mut summaries: BTreeMap<String, CategorySummary> = BTreeMap::new();
    for doc in documents {
        let label = doc
            .category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED);
        let entry = summaries.entry(label.to_string()).or_default();
        entry.count += 1;
        entry.total_size += doc.size;
        entry.total_processing_time += doc.processing_seconds.unwrap_or(0.0);
        *entry.media_types.entry(doc.media_type.clone()).or_insert(0) += 1;
    }
    for summary in summaries.values_mut() {
        let count = summary.count as f64;
        summary.avg_size = summary.total_size as f64 / count;
        summary.avg_processing_time = summary.total_processing_time / count;
    }
    summaries
}

/// Render `stats` as the plain-text analytics report.
pub fn render_report(stats: &CollectionStats, generated_at: &str) -> String {
    let rule = "-".repeat(20);
    let mut out = String::new();
    let total = stats.total_documents.max(1) as f64;

    // Writing to a String cannot fail.
    let _ = writeln!(out, "DOCUMENT ANALYTICS REPORT");
    let _ = writeln!(out, "{}\n", "=".repeat(50));

    let _ = writeln!(out, "BASIC STATISTICS\n{rule}");
    let _ = writeln!(out, "Total Documents: {}", stats.total_documents);
    let _ = writeln!(out, "Total Size: {:.2} MB", stats.total_size as f64 / MIB);
    let _ = writeln!(
        out,
        "Average Processing Time: {:.2} seconds\n",
        stats.avg_processing_time
    );

    for (heading, counts) in [
        ("DOCUMENT CATEGORIES", &stats.categories),
        ("FILE TYPES", &stats.media_types),
    ] {
        if counts.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{heading}\n{rule}");
        for (label, count) in counts {
            let pct = *count as f64 / total * 100.0;
            let _ = writeln!(out, "{label}: {count} ({pct:.1}%)");
        }
        out.push('\n');
    }

    if let Some(content) = &stats.content {
        let _ = writeln!(out, "CONTENT ANALYSIS\n{rule}");
        let _ = writeln!(
            out,
            "Average Content Length: {:.0} characters",
            content.avg_content_length
        );
        let _ = writeln!(out, "Average Word Count: {:.0} words", content.avg_word_count);
        let _ = writeln!(out, "Total Unique Words: {}", content.unique_words);
        if !content.most_common_words.is_empty() {
            let _ = writeln!(out, "\nMost Common Words:");
            for (word, count) in content.most_common_words.iter().take(5) {
                let _ = writeln!(out, "  {word}: {count}");
            }
        }
        out.push('\n');
    }

    if let Some(perf) = &stats.performance {
        let _ = writeln!(out, "PERFORMANCE METRICS\n{rule}");
        let d = &perf.size_distribution;
        let _ = writeln!(out, "Size Distribution:");
        for (bucket, count) in [
            ("small", d.small),
            ("medium", d.medium),
            ("large", d.large),
            ("xlarge", d.xlarge),
        ] {
            let _ = writeln!(out, "  {bucket}: {count}");
        }
        let _ = writeln!(
            out,
            "Processing Efficiency: {:.2} MB/second",
            perf.processing_efficiency
        );
    }

    let _ = write!(out, "\nReport generated on: {generated_at}");
    out
}
