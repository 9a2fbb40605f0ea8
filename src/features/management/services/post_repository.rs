use std::sync::Arc;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::management::dtos::ManagementPostPayload;
use crate::features::management::models::ManagementPost;
use crate::modules::documents::{DocumentRef, DocumentStore};
use crate::modules::sheet::{actions, SheetClient, SheetClientExt};
use crate::shared::constants::MANAGEMENT_POSTS_COLLECTION;

/// Storage for management posts
#[async_trait]
pub trait ManagementPostRepository: Send + Sync {
    /// Newest first
    async fn list(&self) -> Result<Vec<ManagementPost>>;

    async fn get(&self, id: &str) -> Result<Option<ManagementPost>>;

    async fn create(&self, post: &ManagementPost) -> Result<()>;

    async fn update(&self, post: &ManagementPost) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;
}

/// Posts kept in the spreadsheet behind the script endpoint
pub struct SheetPostRepository {
    sheet: Arc<dyn SheetClient>,
}

impl SheetPostRepository {
    pub fn new(sheet: Arc<dyn SheetClient>) -> Self {
        Self { sheet }
    }
}

#[async_trait]
impl ManagementPostRepository for SheetPostRepository {
    async fn list(&self) -> Result<Vec<ManagementPost>> {
        let mut posts: Vec<ManagementPost> = self
            .sheet
            .fetch_as(actions::GET_MANAGEMENT_POSTS, &[])
            .await?;
        posts.sort_by_key(|p| std::cmp::Reverse(p.timestamp));
        Ok(posts)
    }

    async fn get(&self, id: &str) -> Result<Option<ManagementPost>> {
        Ok(self.list().await?.into_iter().find(|p| p.id == id))
    }

    async fn create(&self, post: &ManagementPost) -> Result<()> {
        self.sheet
            .post_payload(
                actions::POST_MANAGEMENT_POST,
                &ManagementPostPayload::from(post),
            )
            .await?;
        Ok(())
    }

    async fn update(&self, post: &ManagementPost) -> Result<()> {
        self.sheet
            .post_payload(
                actions::UPDATE_MANAGEMENT_POST,
                &ManagementPostPayload::from(post),
            )
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.sheet
            .post(
                actions::DELETE_MANAGEMENT_POST,
                vec![("id".to_string(), id.to_string())],
            )
            .await?;
        Ok(())
    }
}

/// Posts kept in the `managementPosts` document collection
pub struct DocumentPostRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentPostRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn doc_ref(id: &str) -> DocumentRef {
        DocumentRef::new(MANAGEMENT_POSTS_COLLECTION, id)
    }
}

#[async_trait]
impl ManagementPostRepository for DocumentPostRepository {
    async fn list(&self) -> Result<Vec<ManagementPost>> {
        let docs = self.store.list(MANAGEMENT_POSTS_COLLECTION).await?;
        Ok(docs.into_iter().map(ManagementPost::from_document).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<ManagementPost>> {
        let doc = self.store.get(&Self::doc_ref(id)).await?;
        Ok(doc.map(ManagementPost::from_document))
    }

    async fn create(&self, post: &ManagementPost) -> Result<()> {
        self.store
            .set(&Self::doc_ref(&post.id), post.to_document_data(), false)
            .await?;
        Ok(())
    }

    async fn update(&self, post: &ManagementPost) -> Result<()> {
        self.store
            .set(&Self::doc_ref(&post.id), post.to_document_data(), true)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(&Self::doc_ref(id)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::documents::MemoryDocumentStore;
    use crate::shared::test_helpers::MockSheetClient;
    use chrono::{DateTime, Utc};
    use serde_json::json;

    fn post(id: &str, millis: i64) -> ManagementPost {
        ManagementPost {
            id: id.to_string(),
            post_type: "Announcement".to_string(),
            title: format!("Post {}", id),
            content: "Body".to_string(),
            timestamp: DateTime::<Utc>::from_timestamp_millis(millis).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_documents_backend_lists_newest_first() {
        let repo = DocumentPostRepository::new(Arc::new(MemoryDocumentStore::new()));
        repo.create(&post("1", 1_000)).await.unwrap();
        repo.create(&post("2", 3_000)).await.unwrap();
        repo.create(&post("3", 2_000)).await.unwrap();

        let ids: Vec<_> = repo.list().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["2", "3", "1"]);

        repo.delete("2").await.unwrap();
        assert!(repo.get("2").await.unwrap().is_none());
        assert_eq!(repo.get("3").await.unwrap(), Some(post("3", 2_000)));
    }

    #[tokio::test]
    async fn test_sheet_backend_posts_form() {
        let sheet = Arc::new(MockSheetClient::new().respond(
            actions::GET_MANAGEMENT_POSTS,
            json!([
                { "ID": "a", "Type": "SOPs", "Title": "Gate SOP", "Content": "Close at 11", "Timestamp": 5_000 },
                { "ID": "b", "Type": "Maintenance", "Title": "Lift", "Content": "Serviced", "Timestamp": 9_000 }
            ]),
        ));
        let repo = SheetPostRepository::new(Arc::clone(&sheet) as _);

        let ids: Vec<_> = repo.list().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["b", "a"]);

        repo.create(&post("c", 7_000)).await.unwrap();
        let calls = sheet.calls_to(actions::POST_MANAGEMENT_POST);
        assert_eq!(calls[0].field("type"), Some("Announcement"));
        assert_eq!(calls[0].field("timestamp"), Some("7000"));
    }
}
