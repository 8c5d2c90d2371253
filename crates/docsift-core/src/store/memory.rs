//! In-memory [`DocumentStore`] for tests and throwaway sessions.
//!
//! Documents live in a `Vec` behind a `std::sync::RwLock`. Ids are assigned
//! sequentially from 1 and never reused, matching SQLite `AUTOINCREMENT`.

use std::collections::BTreeSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::Result;
use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::{Document, NewDocument};

use super::DocumentStore;

#[derive(Default)]
struct Inner {
    docs: Vec<Document>,
    last_id: i64,
}

#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>> {
        self.inner.read().map_err(|_| CoreError::LockPoisoned.into())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
        self.inner.write().map_err(|_| CoreError::LockPoisoned.into())
    }

    fn sorted(mut docs: Vec<Document>) -> Vec<Document> {
        docs.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at).then(b.id.cmp(&a.id)));
        docs
    }
}

fn now_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<Document>> {
        Ok(Self::sorted(self.read()?.docs.clone()))
    }

    async fn get(&self, id: i64) -> Result<Option<Document>> {
        Ok(self.read()?.docs.iter().find(|d| d.id == id).cloned())
    }

    async fn add(&self, doc: NewDocument) -> Result<i64> {
        let mut inner = self.write()?;
        inner.last_id += 1;
        let id = inner.last_id;
        inner.docs.push(Document {
            id,
            filename: doc.filename,
            title: doc.title,
            content: doc.content,
            size: doc.size,
            media_type: doc.media_type,
            category: doc.category,
            uploaded_at: now_timestamp(),
            processing_seconds: doc.processing_seconds,
            raw: doc.raw,
        });
        Ok(id)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut inner = self.write()?;
        let before = inner.docs.len();
        inner.docs.retain(|d| d.id != id);
        Ok(inner.docs.len() != before)
    }

    async fn update_category(&self, id: i64, category: &str) -> Result<bool> {
        let mut inner = self.write()?;
        match inner.docs.iter_mut().find(|d| d.id == id) {
            Some(doc) => {
                doc.category = Some(category.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Document>> {
        let docs = self
            .read()?
            .docs
            .iter()
            .filter(|d| d.category.as_deref() == Some(category))
            .cloned()
            .collect();
        Ok(Self::sorted(docs))
    }

    async fn categories(&self) -> Result<Vec<String>> {
        let set: BTreeSet<String> = self
            .read()?
            .docs
            .iter()
            .filter_map(|d| d.category.clone())
            .collect();
        Ok(set.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_doc(title: &str, category: Option<&str>) -> NewDocument {
        NewDocument {
            filename: format!("{title}.txt"),
            title: title.to_string(),
            content: format!("{title} body"),
            size: 10,
            media_type: "text/plain".to_string(),
            category: category.map(str::to_string),
            processing_seconds: Some(0.1),
            raw: Some(b"raw".to_vec()),
        }
    }

    #[tokio::test]
    async fn add_get_delete() {
        let store = InMemoryStore::new();
        let id = store.add(new_doc("one", None)).await.unwrap();
        assert_eq!(id, 1);

        let doc = store.get(id).await.unwrap().unwrap();
        assert_eq!(doc.title, "one");
        assert_eq!(doc.raw.as_deref(), Some(&b"raw"[..]));
        assert_eq!(doc.uploaded_at.len(), 19);

        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
        assert!(store.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn ids_are_not_reused() {
        let store = InMemoryStore::new();
        let a = store.add(new_doc("a", None)).await.unwrap();
        store.delete(a).await.unwrap();
        let b = store.add(new_doc("b", None)).await.unwrap();
        assert!(b > a);
    }

    #[tokio::test]
    async fn list_all_newest_first_then_id_desc() {
        let store = InMemoryStore::new();
        for t in ["a", "b", "c"] {
            store.add(new_doc(t, None)).await.unwrap();
        }
        {
            let mut inner = store.inner.write().unwrap();
            inner.docs[0].uploaded_at = "2030-01-01 00:00:00".into();
            inner.docs[1].uploaded_at = "2020-01-01 00:00:00".into();
            inner.docs[2].uploaded_at = "2020-01-01 00:00:00".into();
        }
        let ids: Vec<i64> = store.list_all().await.unwrap().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[tokio::test]
    async fn categories_and_relabel() {
        let store = InMemoryStore::new();
        let a = store.add(new_doc("a", Some("Legal"))).await.unwrap();
        store.add(new_doc("b", Some("Business"))).await.unwrap();
        store.add(new_doc("c", None)).await.unwrap();
        store.add(new_doc("d", Some("Legal"))).await.unwrap();

        assert_eq!(store.categories().await.unwrap(), vec!["Business", "Legal"]);
        assert_eq!(store.list_by_category("Legal").await.unwrap().len(), 2);

        assert!(store.update_category(a, "Business").await.unwrap());
        assert!(!store.update_category(99, "Business").await.unwrap());
        assert_eq!(store.list_by_category("Business").await.unwrap().len(), 2);
    }
}
