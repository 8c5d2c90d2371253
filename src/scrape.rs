//! Web page ingestion: `docsift scrape`.
//!
//! Pages are fetched with `reqwest`, reduced to their visible text with
//! `scraper`, and stored as `text/plain` documents.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use scraper::{Html, Node, Selector};

use docsift_core::text::{clean_text, extract_title};
use docsift_core::{Classifier, DocumentStore, NewDocument};

use crate::classify::build_classifier;
use crate::config::{Config, ScrapeConfig};
use crate::extract::MIME_TEXT;
use crate::sqlite_store::SqliteStore;

/// Category assigned to scraped pages when classification is switched off.
pub const WEB_CONTENT_CATEGORY: &str = "Web Content";

const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "svg", "head"];

pub fn build_client(config: &ScrapeConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.as_str())
        .build()
        .context("Failed to build HTTP client")
}

/// Visible text of an HTML page: one line per text node, skipping scripts,
/// styles and the document head.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let root = match Selector::parse("body") {
        Ok(sel) => document.select(&sel).next(),
        Err(_) => None,
    };
    let root = match root {
        Some(body) => *body,
        None => *document.root_element(),
    };

    let mut lines = Vec::new();
    for node in root.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|e| SKIPPED_ELEMENTS.contains(&e.name()))
        });
        if hidden {
            continue;
        }
        let line = clean_text(text);
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines.join("\n")
}

/// Fetch `url` and return its text. Non-HTML text responses are returned
/// as-is.
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to fetch {}", url))?
        .error_for_status()?;

    let is_html = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.contains("html"))
        .unwrap_or(true);

    let body = response.text().await?;
    Ok(if is_html {
        html_to_text(&body)
    } else {
        body.trim().to_string()
    })
}

/// Build the stored document for a scraped page, or fail when the page
/// has too little text to be useful.
pub fn page_document(
    url: &str,
    text: String,
    index: usize,
    config: &ScrapeConfig,
    classifier: Option<&dyn Classifier>,
    url_title: bool,
    started: Instant,
) -> Result<NewDocument> {
    let chars = text.trim().chars().count();
    if chars <= config.min_content_chars {
        bail!("no meaningful content ({} characters)", chars);
    }

    let title = if url_title {
        format!("Web Content from {}", url)
    } else {
        extract_title(&text)
    };
    let category = match classifier {
        Some(c) => c.classify(&text)?,
        None => WEB_CONTENT_CATEGORY.to_string(),
    };
    let raw = text.clone().into_bytes();

    Ok(NewDocument {
        filename: format!(
            "web_content_{}_{}.txt",
            chrono::Utc::now().timestamp(),
            index + 1
        ),
        title,
        size: raw.len() as i64,
        content: text,
        media_type: MIME_TEXT.to_string(),
        category: Some(category),
        processing_seconds: Some(started.elapsed().as_secs_f64()),
        raw: Some(raw),
    })
}

/// Non-blank lines of a URL list file.
pub fn read_url_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read URL file: {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

pub async fn run_scrape(
    config: &Config,
    mut urls: Vec<String>,
    url_file: Option<&Path>,
    classify: bool,
    url_title: bool,
) -> Result<()> {
    if let Some(path) = url_file {
        urls.extend(read_url_file(path)?);
    }
    if urls.is_empty() {
        bail!("No URLs given");
    }

    let client = build_client(&config.scrape)?;
    let store = SqliteStore::open(config).await?;
    let classifier = if classify {
        Some(build_classifier(config)?)
    } else {
        None
    };

    let mut added = 0;
    for (i, url) in urls.iter().enumerate() {
        let started = Instant::now();
        tracing::info!(url = %url, "scraping");

        let result = async {
            let text = fetch_text(&client, url).await?;
            let doc = page_document(
                url,
                text,
                i,
                &config.scrape,
                classifier.as_deref(),
                url_title,
                started,
            )?;
            store.add(doc).await
        }
        .await;

        match result {
            Ok(id) => {
                added += 1;
                println!("  scraped [{}] {}", id, url);
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "scrape failed");
                println!("  failed {}: {:#}", url, e);
            }
        }
    }

    println!();
    println!("Scraped {} of {} URL(s).", added, urls.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsift_core::KeywordClassifier;

    const PAGE: &str = r#"<!doctype html>
<html>
<head><title>Match report</title><style>body { color: red; }</style></head>
<body>
  <h1>League Final</h1>
  <script>var tracking = "football";</script>
  <p>The   football match decided the tournament.
  The league   champion was crowned after a tense final.</p>
</body>
</html>"#;

    #[test]
    fn html_text_skips_scripts_and_styles() {
        let text = html_to_text(PAGE);
        assert_eq!(
            text,
            "League Final\nThe football match decided the tournament. The league champion was crowned after a tense final."
        );
        assert!(!text.contains("tracking"));
        assert!(!text.contains("color"));
    }

    #[test]
    fn control_characters_are_stripped() {
        let text = html_to_text("<body><p>ring\u{7} the   bell</p><p>\u{1b}</p></body>");
        assert_eq!(text, "ring the bell");
    }

    #[test]
    fn short_pages_are_rejected() {
        let err = page_document(
            "https://example.org",
            "too short".to_string(),
            0,
            &ScrapeConfig::default(),
            None,
            false,
            Instant::now(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("no meaningful content"));
    }

    #[test]
    fn page_document_fields() {
        let classifier = KeywordClassifier::default();
        let text = html_to_text(PAGE);
        let doc = page_document(
            "https://example.org/final",
            text.clone(),
            2,
            &ScrapeConfig::default(),
            Some(&classifier),
            false,
            Instant::now(),
        )
        .unwrap();

        assert_eq!(doc.title, "League Final");
        assert_eq!(doc.category.as_deref(), Some("Sports"));
        assert_eq!(doc.media_type, "text/plain");
        assert!(doc.filename.starts_with("web_content_"));
        assert!(doc.filename.ends_with("_3.txt"));
        assert_eq!(doc.size, text.len() as i64);
    }

    #[test]
    fn url_title_and_unclassified() {
        let doc = page_document(
            "https://example.org/final",
            html_to_text(PAGE),
            0,
            &ScrapeConfig::default(),
            None,
            true,
            Instant::now(),
        )
        .unwrap();
        assert_eq!(doc.title, "Web Content from https://example.org/final");
        assert_eq!(doc.category.as_deref(), Some(WEB_CONTENT_CATEGORY));
    }

    #[test]
    fn url_file_skips_blank_lines() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "https://a.example\n\n  https://b.example  \n").unwrap();
        assert_eq!(
            read_url_file(tmp.path()).unwrap(),
            vec!["https://a.example", "https://b.example"]
        );
    }
}
