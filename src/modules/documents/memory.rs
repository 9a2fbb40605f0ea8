use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::{broadcast, RwLock};

use super::events::PermissionError;
use super::store::{
    merge_data, sort_newest_first, ChangeFeed, Document, DocumentRef, DocumentStore, StoreError,
};

/// Process-local document store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<HashMap<DocumentRef, Document>>,
    denied_collections: RwLock<HashSet<String>>,
    feed: ChangeFeed,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse reads of `collection` from now on, as a security rule would.
    #[cfg(test)]
    pub async fn deny_reads(&self, collection: &str) {
        self.denied_collections
            .write()
            .await
            .insert(collection.to_string());
    }

    /// Open change-feed listeners
    #[cfg(test)]
    pub fn listeners(&self) -> usize {
        self.feed.listeners()
    }

    async fn ensure_readable(&self, operation: &str, path: String) -> Result<(), StoreError> {
        let collection = path.split('/').next().unwrap_or_default();
        if self.denied_collections.read().await.contains(collection) {
            return Err(PermissionError::new(operation, path).into());
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, doc: &DocumentRef) -> Result<Option<Document>, StoreError> {
        self.ensure_readable("get", doc.path()).await?;
        Ok(self.documents.read().await.get(doc).cloned())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.ensure_readable("list", collection.to_string()).await?;
        let mut docs: Vec<Document> = self
            .documents
            .read()
            .await
            .iter()
            .filter(|(key, _)| key.collection == collection)
            .map(|(_, doc)| doc.clone())
            .collect();
        sort_newest_first(&mut docs);
        Ok(docs)
    }

    async fn set(
        &self,
        doc: &DocumentRef,
        data: Value,
        merge: bool,
    ) -> Result<Document, StoreError> {
        let stored = {
            let mut documents = self.documents.write().await;
            let data = match (merge, documents.remove(doc)) {
                (true, Some(existing)) => merge_data(existing.data, data),
                _ => data,
            };
            let stored = Document {
                id: doc.id.clone(),
                data,
                updated_at: Utc::now(),
            };
            documents.insert(doc.clone(), stored.clone());
            stored
        };

        self.feed.publish(doc.path());
        Ok(stored)
    }

    async fn delete(&self, doc: &DocumentRef) -> Result<bool, StoreError> {
        let removed = self.documents.write().await.remove(doc).is_some();
        if removed {
            self.feed.publish(doc.path());
        }
        Ok(removed)
    }

    fn changes(&self) -> broadcast::Receiver<String> {
        self.feed.subscribe()
    }
}
