use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tokio::sync::broadcast;

use super::events::PermissionError;
use super::store::{sort_newest_first, ChangeFeed, Document, DocumentRef, DocumentStore, StoreError};

/// SQLSTATE for insufficient_privilege
const INSUFFICIENT_PRIVILEGE: &str = "42501";

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: String,
    data: Json<Value>,
    updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: row.id,
            data: row.data.0,
            updated_at: row.updated_at,
        }
    }
}

/// Postgres-backed document store. Change notifications cover writes made
/// through this process.
pub struct PgDocumentStore {
    pool: PgPool,
    feed: ChangeFeed,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            feed: ChangeFeed::new(),
        }
    }
}

fn map_error(e: sqlx::Error, operation: &str, path: String) -> StoreError {
    if let sqlx::Error::Database(ref db) = e {
        if db.code().as_deref() == Some(INSUFFICIENT_PRIVILEGE) {
            return PermissionError::new(operation, path).into();
        }
    }
    tracing::error!("Document store {} on {} failed: {:?}", operation, path, e);
    StoreError::Database(e)
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn get(&self, doc: &DocumentRef) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, data, updated_at
            FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(&doc.collection)
        .bind(&doc.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_error(e, "get", doc.path()))?;

        Ok(row.map(Document::from))
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, data, updated_at
            FROM documents
            WHERE collection = $1
            "#,
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_error(e, "list", collection.to_string()))?;

        let mut docs: Vec<Document> = rows.into_iter().map(Document::from).collect();
        sort_newest_first(&mut docs);
        Ok(docs)
    }

    async fn set(
        &self,
        doc: &DocumentRef,
        data: Value,
        merge: bool,
    ) -> Result<Document, StoreError> {
        // `||` on JSONB objects is a shallow merge
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO documents (collection, id, data, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (collection, id) DO UPDATE
            SET data = CASE
                    WHEN $4 AND jsonb_typeof(documents.data) = 'object'
                         AND jsonb_typeof(EXCLUDED.data) = 'object'
                    THEN documents.data || EXCLUDED.data
                    ELSE EXCLUDED.data
                END,
                updated_at = NOW()
            RETURNING id, data, updated_at
            "#,
        )
        .bind(&doc.collection)
        .bind(&doc.id)
        .bind(Json(data))
        .bind(merge)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_error(e, "set", doc.path()))?;

        self.feed.publish(doc.path());
        Ok(row.into())
    }

    async fn delete(&self, doc: &DocumentRef) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(&doc.collection)
            .bind(&doc.id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_error(e, "delete", doc.path()))?;

        let removed = result.rows_affected() > 0;
        if removed {
            self.feed.publish(doc.path());
        }
        Ok(removed)
    }

    fn changes(&self) -> broadcast::Receiver<String> {
        self.feed.subscribe()
    }
}
