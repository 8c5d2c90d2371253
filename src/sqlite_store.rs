//! SQLite-backed [`DocumentStore`] implementation.
//!
//! Rows are fetched in the positional [`DocumentRow`] shape and converted
//! into [`Document`] on the way out.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;

use docsift_core::{Document, DocumentRow, DocumentStore, NewDocument};

use crate::config::Config;
use crate::db;

const SELECT_COLUMNS: &str = "SELECT id, filename, title, content, file_size, file_type, \
     category, upload_date, processing_time, file_data FROM documents";

/// SQLite implementation of the [`DocumentStore`] trait over the
/// `documents` table created by [`crate::migrate`].
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to the database named in `config`. The schema must already
    /// exist (`docsift init`).
    pub async fn open(config: &Config) -> Result<Self> {
        Ok(Self::new(db::connect(config).await?))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn list_all(&self) -> Result<Vec<Document>> {
        let rows: Vec<DocumentRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} ORDER BY upload_date DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Document>> {
        let row: Option<DocumentRow> = sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Document::from))
    }

    async fn add(&self, doc: NewDocument) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO documents (filename, title, content, file_size, file_type,
                                   category, processing_time, file_data)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&doc.filename)
        .bind(&doc.title)
        .bind(&doc.content)
        .bind(doc.size)
        .bind(&doc.media_type)
        .bind(&doc.category)
        .bind(doc.processing_seconds)
        .bind(&doc.raw)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_category(&self, id: i64, category: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE documents SET category = ? WHERE id = ?")
            .bind(category)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Document>> {
        let rows: Vec<DocumentRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} WHERE category = ? ORDER BY upload_date DESC, id DESC"
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn categories(&self) -> Result<Vec<String>> {
        let categories: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT category FROM documents WHERE category IS NOT NULL ORDER BY category",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;

    async fn store() -> SqliteStore {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        crate::migrate::apply(&pool).await.unwrap();
        SqliteStore::new(pool)
    }

    fn new_doc(title: &str, category: Option<&str>) -> NewDocument {
        NewDocument {
            filename: format!("{title}.txt"),
            title: title.to_string(),
            content: format!("{title} body text"),
            size: 17,
            media_type: "text/plain".to_string(),
            category: category.map(str::to_string),
            processing_seconds: Some(0.02),
            raw: Some(b"original bytes".to_vec()),
        }
    }

    #[tokio::test]
    async fn add_then_get_round_trips_fields() {
        let store = store().await;
        let id = store.add(new_doc("alpha", Some("Legal"))).await.unwrap();

        let doc = store.get(id).await.unwrap().unwrap();
        assert_eq!(doc.id, id);
        assert_eq!(doc.filename, "alpha.txt");
        assert_eq!(doc.category.as_deref(), Some("Legal"));
        assert_eq!(doc.processing_seconds, Some(0.02));
        assert_eq!(doc.raw.as_deref(), Some(&b"original bytes"[..]));
        assert_eq!(doc.uploaded_at.len(), 19);
    }

    #[tokio::test]
    async fn missing_ids() {
        let store = store().await;
        assert!(store.get(42).await.unwrap().is_none());
        assert!(!store.delete(42).await.unwrap());
        assert!(!store.update_category(42, "Legal").await.unwrap());
    }

    #[tokio::test]
    async fn same_second_uploads_list_highest_id_first() {
        let store = store().await;
        let a = store.add(new_doc("a", None)).await.unwrap();
        let b = store.add(new_doc("b", None)).await.unwrap();
        sqlx::query("UPDATE documents SET upload_date = '2024-01-01 00:00:00'")
            .execute(store.pool())
            .await
            .unwrap();

        let ids: Vec<i64> = store.list_all().await.unwrap().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![b, a]);
    }

    #[tokio::test]
    async fn categories_are_distinct_and_sorted() {
        let store = store().await;
        let a = store.add(new_doc("a", Some("Technical"))).await.unwrap();
        store.add(new_doc("b", Some("Legal"))).await.unwrap();
        store.add(new_doc("c", None)).await.unwrap();
        store.add(new_doc("d", Some("Legal"))).await.unwrap();

        assert_eq!(store.categories().await.unwrap(), vec!["Legal", "Technical"]);
        assert_eq!(store.list_by_category("Legal").await.unwrap().len(), 2);

        assert!(store.update_category(a, "Legal").await.unwrap());
        assert_eq!(store.categories().await.unwrap(), vec!["Legal"]);
        assert!(store.delete(a).await.unwrap());
        assert_eq!(store.list_all().await.unwrap().len(), 3);
    }
}
