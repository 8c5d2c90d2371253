//! # docsift
//!
//! A local-first document ingestion, classification and search tool.
//!
//! docsift extracts text from PDF, Word and plain-text files or scraped web
//! pages, assigns each document a category, stores everything in SQLite and
//! offers highlighted substring search, similarity lookup and collection
//! analytics through a CLI and a JSON HTTP API.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌─────────────┐   ┌──────────┐
//! │ add/scrape  │──▶│  extract +  │──▶│  SQLite  │
//! │ files, URLs │   │  classify   │   │ documents│
//! └─────────────┘   └─────────────┘   └────┬─────┘
//!                                          │
//!                      ┌───────────────────┤
//!                      ▼                   ▼
//!                 ┌──────────┐       ┌──────────┐
//!                 │   CLI    │       │   HTTP   │
//!                 │(docsift) │       │  (axum)  │
//!                 └──────────┘       └──────────┘
//! ```
//!
//! The storage-agnostic pipeline (tokenizer, classifiers, search,
//! similarity, analytics) lives in the `docsift-core` crate.
//!
//! ## Quick Start
//!
//! ```bash
//! docsift init                          # create database
//! docsift add ./papers                  # ingest a directory
//! docsift search "quarterly revenue"    # highlighted search
//! docsift serve                         # start the HTTP API
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`db`] | SQLite connection pool |
//! | [`migrate`] | Schema creation |
//! | [`sqlite_store`] | `DocumentStore` over SQLite |
//! | [`extract`] | PDF/DOCX/text extraction |
//! | [`ingest`] | `add` command |
//! | [`scrape`] | `scrape` command |
//! | [`classify`] | Classifier construction and classification commands |
//! | [`search`] | `search`, `filter`, `similar`, `suggest` |
//! | [`get`] | `list`, `get`, `delete` |
//! | [`stats`] | `stats` and `report` |
//! | [`server`] | HTTP API |

pub mod classify;
pub mod config;
pub mod db;
pub mod extract;
pub mod get;
pub mod ingest;
pub mod migrate;
pub mod scrape;
pub mod search;
pub mod server;
pub mod sqlite_store;
pub mod stats;
