use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use docsift_core::ExcerptLimits;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub scrape: ScrapeConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClassifierConfig {
    /// `"keyword"` or `"model"`.
    #[serde(default = "default_strategy")]
    pub strategy: String,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default)]
    pub model_path: Option<PathBuf>,
    /// Extra keywords per category; unknown categories are registered.
    #[serde(default)]
    pub keywords: BTreeMap<String, Vec<String>>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            threshold: default_threshold(),
            model_path: None,
            keywords: BTreeMap::new(),
        }
    }
}

fn default_strategy() -> String {
    "keyword".to_string()
}
fn default_threshold() -> f64 {
    docsift_core::classify::DEFAULT_THRESHOLD
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
    #[serde(default = "default_highlighted_excerpt_chars")]
    pub highlighted_excerpt_chars: usize,
    #[serde(default = "default_sentence_window")]
    pub sentence_window: usize,
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            excerpt_chars: default_excerpt_chars(),
            highlighted_excerpt_chars: default_highlighted_excerpt_chars(),
            sentence_window: default_sentence_window(),
            similarity_threshold: default_similarity_threshold(),
            max_suggestions: default_max_suggestions(),
            limit: default_limit(),
        }
    }
}

impl SearchConfig {
    pub fn excerpt_limits(&self) -> ExcerptLimits {
        ExcerptLimits {
            plain_chars: self.excerpt_chars,
            highlighted_chars: self.highlighted_excerpt_chars,
            sentence_window: self.sentence_window,
        }
    }
}

fn default_excerpt_chars() -> usize {
    1500
}
fn default_highlighted_excerpt_chars() -> usize {
    2000
}
fn default_sentence_window() -> usize {
    100
}
fn default_similarity_threshold() -> f64 {
    docsift_core::search::DEFAULT_SIMILARITY_THRESHOLD
}
fn default_max_suggestions() -> usize {
    5
}
fn default_limit() -> usize {
    20
}

#[derive(Debug, Deserialize, Clone)]
pub struct IngestConfig {
    /// Files larger than this are skipped.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

fn default_max_file_bytes() -> u64 {
    50 * 1024 * 1024
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScrapeConfig {
    #[serde(default = "default_scrape_timeout")]
    pub timeout_secs: u64,
    /// Pages yielding less text than this are rejected.
    #[serde(default = "default_min_content_chars")]
    pub min_content_chars: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_scrape_timeout(),
            min_content_chars: default_min_content_chars(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_scrape_timeout() -> u64 {
    15
}
fn default_min_content_chars() -> usize {
    50
}
fn default_user_agent() -> String {
    format!("docsift/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7341".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    match config.classifier.strategy.as_str() {
        "keyword" | "model" => {}
        other => bail!(
            "Unknown classifier strategy: '{}'. Must be keyword or model.",
            other
        ),
    }

    if !(0.0..=1.0).contains(&config.classifier.threshold) {
        bail!("classifier.threshold must be in [0.0, 1.0]");
    }

    let search = &config.search;
    if !(0.0..=1.0).contains(&search.similarity_threshold) {
        bail!("search.similarity_threshold must be in [0.0, 1.0]");
    }
    if search.excerpt_chars <= search.sentence_window
        || search.highlighted_excerpt_chars <= search.sentence_window
    {
        bail!("search excerpt lengths must be greater than search.sentence_window");
    }
    if search.limit == 0 {
        bail!("search.limit must be >= 1");
    }

    if config.scrape.timeout_secs == 0 {
        bail!("scrape.timeout_secs must be > 0");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_src: &str) -> Result<Config> {
        let config: Config = toml::from_str(toml_src)?;
        validate(&config)?;
        Ok(config)
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let config = parse("[db]\npath = \"./data/docsift.sqlite\"\n").unwrap();
        assert_eq!(config.classifier.strategy, "keyword");
        assert_eq!(config.classifier.threshold, 0.1);
        assert_eq!(config.search.excerpt_chars, 1500);
        assert_eq!(config.search.highlighted_excerpt_chars, 2000);
        assert_eq!(config.search.similarity_threshold, 0.3);
        assert_eq!(config.ingest.max_file_bytes, 52_428_800);
        assert_eq!(config.scrape.timeout_secs, 15);
        assert_eq!(config.server.bind, "127.0.0.1:7341");
    }

    #[test]
    fn extra_keywords_table() {
        let config = parse(
            r#"
[db]
path = "x.sqlite"

[classifier.keywords]
"Open Source" = ["github", "license"]
"#,
        )
        .unwrap();
        assert_eq!(
            config.classifier.keywords["Open Source"],
            vec!["github".to_string(), "license".to_string()]
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse("[db]\npath = \"x\"\n[classifier]\nstrategy = \"neural\"\n").is_err());
        assert!(parse("[db]\npath = \"x\"\n[classifier]\nthreshold = 1.5\n").is_err());
        assert!(parse("[db]\npath = \"x\"\n[search]\nexcerpt_chars = 50\n").is_err());
        assert!(parse("[db]\npath = \"x\"\n[scrape]\ntimeout_secs = 0\n").is_err());
    }
}
