use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;
use utoipa::ToSchema;

use super::events::PermissionError;
use crate::shared::time::parse_timestamp;

const CHANGE_FEED_CAPACITY: usize = 256;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    PermissionDenied(#[from] PermissionError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Backend(String),
}

/// Address of a single document. Two refs are the same subscription target
/// exactly when they compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentRef {
    pub collection: String,
    pub id: String,
}

impl DocumentRef {
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }

    pub fn path(&self) -> String {
        format!("{}/{}", self.collection, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    #[schema(value_type = Object)]
    pub data: Value,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Sort key for "newest first" listings: `data.timestamp` as epoch millis
    /// or a parseable date string; missing timestamps sort last.
    pub fn timestamp_millis(&self) -> i64 {
        match self.data.get("timestamp") {
            Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
            Some(Value::String(s)) => parse_timestamp(s)
                .map(|dt| dt.timestamp_millis())
                .unwrap_or(0),
            _ => 0,
        }
    }
}

/// Orders documents newest first.
pub fn sort_newest_first(docs: &mut [Document]) {
    docs.sort_by_key(|d| std::cmp::Reverse(d.timestamp_millis()));
}

/// Shallow merge of `incoming` into `existing` when both are objects;
/// otherwise `incoming` replaces the document.
pub fn merge_data(existing: Value, incoming: Value) -> Value {
    match (existing, incoming) {
        (Value::Object(mut base), Value::Object(patch)) => {
            base.extend(patch);
            Value::Object(base)
        }
        (_, incoming) => incoming,
    }
}

/// In-process broadcast of changed document paths
#[derive(Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<String>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(CHANGE_FEED_CAPACITY);
        Self { tx }
    }

    pub fn publish(&self, path: String) {
        let _ = self.tx.send(path);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }

    #[cfg(test)]
    pub fn listeners(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, doc: &DocumentRef) -> Result<Option<Document>, StoreError>;

    /// All documents of a collection, newest `timestamp` first
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    async fn set(
        &self,
        doc: &DocumentRef,
        data: Value,
        merge: bool,
    ) -> Result<Document, StoreError>;

    /// Returns whether a document was removed
    async fn delete(&self, doc: &DocumentRef) -> Result<bool, StoreError>;

    /// Paths of documents written or deleted after this call
    fn changes(&self) -> broadcast::Receiver<String>;
}
