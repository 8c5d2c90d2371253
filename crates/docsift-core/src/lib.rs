//! # docsift core
//!
//! Storage-agnostic logic for docsift: document models, the tokenizer,
//! keyword and statistical classification, query parsing, substring search
//! with highlighting, Jaccard similarity and collection analytics.
//!
//! This crate contains no tokio, sqlx, network or filesystem-scanning
//! dependencies. Every pipeline function works on an in-memory snapshot of
//! [`models::Document`]s handed in by the caller; the [`store`] module
//! defines the trait the application's storage backends implement.
//!
//! ## Data Flow
//!
//! ```text
//! raw text ──▶ tokenize ──┬──▶ classify    (category)
//!                         ├──▶ search      (AND-match + highlight)
//!                         └──▶ similarity  (Jaccard)
//! ```

pub mod analytics;
pub mod classify;
pub mod error;
pub mod highlight;
pub mod models;
pub mod query;
pub mod search;
pub mod similarity;
pub mod store;
pub mod text;
pub mod tokenize;

pub use classify::{Classifier, KeywordClassifier, KeywordTable, ModelClassifier};
pub use error::CoreError;
pub use highlight::ExcerptLimits;
pub use models::{
    CategoryScore, Document, DocumentRow, NewDocument, Scope, SearchHit, SimilarDocument,
};
pub use search::{AdvancedQuery, SearchEngine};
pub use store::{DocumentStore, InMemoryStore};
