//! Storage abstraction for docsift.
//!
//! The [`DocumentStore`] trait covers everything the CLI and HTTP frontends
//! need from persistence. The pipeline itself never touches a store: callers
//! fetch a snapshot with [`DocumentStore::list_all`] and hand it to the
//! search, similarity and analytics functions.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

pub use memory::InMemoryStore;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Document, NewDocument};

/// Abstract document storage backend.
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`list_all`](DocumentStore::list_all) | Every document, newest first |
/// | [`get`](DocumentStore::get) | One document by id |
/// | [`add`](DocumentStore::add) | Insert, returning the new id |
/// | [`delete`](DocumentStore::delete) | Remove by id |
/// | [`update_category`](DocumentStore::update_category) | Relabel a document |
/// | [`list_by_category`](DocumentStore::list_by_category) | Documents with one label |
/// | [`categories`](DocumentStore::categories) | Distinct labels in use |
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents, most recently uploaded first; equal timestamps are
    /// ordered by id, highest first.
    async fn list_all(&self) -> Result<Vec<Document>>;

    async fn get(&self, id: i64) -> Result<Option<Document>>;

    /// Store a new document. The store assigns the id and upload timestamp.
    async fn add(&self, doc: NewDocument) -> Result<i64>;

    /// Returns `false` if no document had this id.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Returns `false` if no document had this id.
    async fn update_category(&self, id: i64, category: &str) -> Result<bool>;

    /// Documents labelled exactly `category`, in [`list_all`](DocumentStore::list_all) order.
    async fn list_by_category(&self, category: &str) -> Result<Vec<Document>>;

    /// Distinct non-null categories, sorted.
    async fn categories(&self) -> Result<Vec<String>>;
}
