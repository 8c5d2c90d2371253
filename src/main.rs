//! # docsift CLI
//!
//! The `docsift` binary ingests documents, classifies them and searches the
//! collection. Every command reads a TOML configuration file.
//!
//! ## Usage
//!
//! ```bash
//! docsift --config ./config/docsift.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `docsift init` | Create the SQLite database and schema |
//! | `docsift add <paths>...` | Ingest files or directories |
//! | `docsift scrape <urls>...` | Ingest web pages |
//! | `docsift list` | List stored documents |
//! | `docsift get <id>` | Show one document |
//! | `docsift delete <id>` | Remove a document |
//! | `docsift search "<query>"` | Highlighted substring search |
//! | `docsift filter` | Include/exclude/category/type filtering |
//! | `docsift similar <id>` | Documents similar to a document or text |
//! | `docsift suggest <partial>` | Word completions |
//! | `docsift classify <id>` | Classify a stored document or text |
//! | `docsift reclassify` | Re-run classification over stored documents |
//! | `docsift train` | Train the statistical classifier |
//! | `docsift categories` | List categories and keywords |
//! | `docsift stats` | Collection statistics |
//! | `docsift report` | Plain-text analytics report |
//! | `docsift serve` | Start the HTTP API |

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use docsift::{classify, config, get, ingest, migrate, scrape, search, server, stats};
use docsift_core::{AdvancedQuery, Scope};

/// docsift: local document ingestion, classification and search.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/docsift.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "docsift",
    about = "docsift: local document ingestion, classification and search",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/docsift.toml")]
    config: PathBuf,

    /// Log at debug level (overrides RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema. Safe to run repeatedly.
    Init,

    /// Ingest files. Directories are scanned recursively for
    /// .pdf, .docx, .txt and .md files.
    Add {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Store under this category instead of classifying.
        #[arg(long)]
        category: Option<String>,
    },

    /// Fetch web pages and store their text.
    Scrape {
        urls: Vec<String>,

        /// Read additional URLs from a file, one per line.
        #[arg(long)]
        url_file: Option<PathBuf>,

        /// Store as "Web Content" instead of classifying.
        #[arg(long)]
        no_classify: bool,

        /// Title documents "Web Content from <url>" instead of using the
        /// first line of text.
        #[arg(long)]
        url_title: bool,
    },

    /// List stored documents, newest first.
    List {
        #[arg(long)]
        category: Option<String>,
    },

    /// Show a document with its full text.
    Get {
        id: i64,

        /// Write the original file bytes to this path. A directory receives
        /// the stored filename.
        #[arg(long)]
        save_raw: Option<PathBuf>,
    },

    /// Delete a document.
    Delete { id: i64 },

    /// Find documents containing every query term. Quote phrases:
    /// `"quick fox" jumps`.
    Search {
        query: String,

        /// title, content, or both.
        #[arg(long, default_value = "content")]
        scope: Scope,

        #[arg(long)]
        case_sensitive: bool,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// Filter by required and forbidden terms, category and file type.
    Filter {
        #[arg(long)]
        include: Vec<String>,

        #[arg(long)]
        exclude: Vec<String>,

        #[arg(long)]
        category: Option<String>,

        /// Substring of the media type, e.g. `pdf`.
        #[arg(long)]
        file_type: Option<String>,
    },

    /// Find documents similar to a stored document or to `--text`.
    Similar {
        #[arg(required_unless_present = "text", conflicts_with = "text")]
        id: Option<i64>,

        #[arg(long)]
        text: Option<String>,

        /// Minimum Jaccard similarity, 0.0 to 1.0.
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Complete a partial word from the collection's vocabulary.
    Suggest {
        partial: String,

        #[arg(long)]
        max: Option<usize>,
    },

    /// Classify a stored document or `--text`.
    Classify {
        #[arg(required_unless_present = "text", conflicts_with = "text")]
        id: Option<i64>,

        #[arg(long)]
        text: Option<String>,

        /// Also print the top category scores.
        #[arg(long)]
        confidence: bool,
    },

    /// Re-run classification for one document or all of them.
    Reclassify { id: Option<i64> },

    /// Train the statistical classifier on categorized documents.
    Train,

    /// List categories, or the keywords of one category.
    Categories { category: Option<String> },

    /// Collection statistics.
    Stats {
        /// Print machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Plain-text analytics report.
    Report {
        /// Write to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Start the HTTP API on `[server].bind`.
    Serve,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("docsift=debug,docsift_core=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("docsift=info,docsift_core=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Add { paths, category } => {
            ingest::run_add(&cfg, &paths, category.as_deref()).await?;
        }
        Commands::Scrape {
            urls,
            url_file,
            no_classify,
            url_title,
        } => {
            scrape::run_scrape(&cfg, urls, url_file.as_deref(), !no_classify, url_title).await?;
        }
        Commands::List { category } => {
            get::run_list(&cfg, category.as_deref()).await?;
        }
        Commands::Get { id, save_raw } => {
            get::run_get(&cfg, id, save_raw.as_deref()).await?;
        }
        Commands::Delete { id } => {
            get::run_delete(&cfg, id).await?;
        }
        Commands::Search {
            query,
            scope,
            case_sensitive,
            limit,
        } => {
            search::run_search(&cfg, &query, scope, case_sensitive, limit).await?;
        }
        Commands::Filter {
            include,
            exclude,
            category,
            file_type,
        } => {
            let query = AdvancedQuery {
                include,
                exclude,
                category,
                file_type,
            };
            search::run_filter(&cfg, query).await?;
        }
        Commands::Similar {
            id,
            text,
            threshold,
        } => {
            search::run_similar(&cfg, id, text, threshold).await?;
        }
        Commands::Suggest { partial, max } => {
            search::run_suggest(&cfg, &partial, max).await?;
        }
        Commands::Classify {
            id,
            text,
            confidence,
        } => {
            classify::run_classify(&cfg, id, text, confidence).await?;
        }
        Commands::Reclassify { id } => {
            classify::run_reclassify(&cfg, id).await?;
        }
        Commands::Train => {
            classify::run_train(&cfg).await?;
        }
        Commands::Categories { category } => {
            classify::run_categories(&cfg, category).await?;
        }
        Commands::Stats { json } => {
            stats::run_stats(&cfg, json).await?;
        }
        Commands::Report { out } => {
            stats::run_report(&cfg, out.as_deref()).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
