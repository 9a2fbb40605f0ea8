use std::sync::Arc;

use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::management::dtos::{
    CreateManagementPostDto, ManagementPostResponseDto, UpdateManagementPostDto,
};
use crate::features::management::models::{ManagementPost, PostType};
use super::post_repository::{
    DocumentPostRepository, ManagementPostRepository, SheetPostRepository,
};
use crate::modules::documents::{DocSubscription, DocumentRef, DocumentStore, ErrorEmitter};
use crate::modules::sheet::SheetClient;
use crate::shared::constants::MANAGEMENT_POSTS_COLLECTION;

pub struct ManagementService {
    repo: Arc<dyn ManagementPostRepository>,
    /// Present only on the documents backend; live streams need it
    documents: Option<Arc<dyn DocumentStore>>,
    emitter: ErrorEmitter,
}

impl ManagementService {
    pub fn with_sheet(sheet: Arc<dyn SheetClient>, emitter: ErrorEmitter) -> Self {
        Self {
            repo: Arc::new(SheetPostRepository::new(sheet)),
            documents: None,
            emitter,
        }
    }

    pub fn with_documents(store: Arc<dyn DocumentStore>, emitter: ErrorEmitter) -> Self {
        Self {
            repo: Arc::new(DocumentPostRepository::new(Arc::clone(&store))),
            documents: Some(store),
            emitter,
        }
    }

    pub fn post_types(&self) -> Vec<PostType> {
        PostType::ALL.to_vec()
    }

    pub async fn list(&self) -> Result<Vec<ManagementPostResponseDto>> {
        let posts = self.repo.list().await?;
        tracing::debug!("Fetched {} management posts", posts.len());
        Ok(posts.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: &str) -> Result<ManagementPostResponseDto> {
        Ok(self.find(id).await?.into())
    }

    pub async fn create(&self, dto: CreateManagementPostDto) -> Result<ManagementPostResponseDto> {
        let (Some(post_type), Some(title), Some(content)) = (dto.post_type, dto.title, dto.content)
        else {
            return Err(AppError::Validation("Please fill all fields.".to_string()));
        };

        let now = Utc::now();
        let post = ManagementPost {
            id: now.timestamp_millis().to_string(),
            post_type: post_type.as_str().to_string(),
            title,
            content,
            timestamp: now,
        };
        self.repo.create(&post).await?;

        tracing::info!("Management post published: id={}, type={}", post.id, post.post_type);
        Ok(post.into())
    }

    pub async fn update(
        &self,
        id: &str,
        dto: UpdateManagementPostDto,
    ) -> Result<ManagementPostResponseDto> {
        let post = dto.merge_into(self.find(id).await?);
        self.repo.update(&post).await?;

        tracing::info!("Management post updated: id={}", id);
        Ok(post.into())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.find(id).await?;
        self.repo.delete(id).await?;

        tracing::info!("Management post deleted: id={}", id);
        Ok(())
    }

    /// Starts following one post. The returned subscription must be kept
    /// alive for as long as updates are wanted.
    pub fn subscribe(&self, id: &str) -> Result<DocSubscription> {
        let store = self.documents.as_ref().ok_or_else(|| {
            AppError::BadRequest("Live updates need the documents backend.".to_string())
        })?;

        let mut subscription = DocSubscription::new(Arc::clone(store), self.emitter.clone());
        subscription.watch(Some(DocumentRef::new(MANAGEMENT_POSTS_COLLECTION, id)));
        Ok(subscription)
    }

    async fn find(&self, id: &str) -> Result<ManagementPost> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::documents::MemoryDocumentStore;
    use crate::shared::test_helpers::MockSheetClient;
    use serde_json::json;
    use std::time::Duration;

    fn create_dto(title: &str) -> CreateManagementPostDto {
        serde_json::from_value(json!({
            "type": "Announcement",
            "title": title,
            "content": "Community meeting on Sunday"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_subscribe_follows_updates() {
        let store = Arc::new(MemoryDocumentStore::new());
        let service = ManagementService::with_documents(store, ErrorEmitter::new());

        let created = service.create(create_dto("Meeting")).await.unwrap();
        let subscription = service.subscribe(&created.id).unwrap();
        let mut state = subscription.state();

        let first = tokio::time::timeout(
            Duration::from_secs(1),
            state.wait_for(|s| !s.is_loading),
        )
        .await
        .unwrap()
        .unwrap()
        .clone();
        assert_eq!(first.data.unwrap().data["title"], "Meeting");

        let patch = UpdateManagementPostDto {
            title: Some("Meeting moved".to_string()),
            ..Default::default()
        };
        service.update(&created.id, patch).await.unwrap();

        let next = tokio::time::timeout(
            Duration::from_secs(1),
            state.wait_for(|s| {
                s.data
                    .as_ref()
                    .is_some_and(|d| d.data["title"] == "Meeting moved")
            }),
        )
        .await
        .unwrap()
        .unwrap()
        .clone();
        assert!(next.error.is_none());
    }

    #[tokio::test]
    async fn test_subscribe_needs_documents_backend() {
        let service =
            ManagementService::with_sheet(Arc::new(MockSheetClient::new()), ErrorEmitter::new());
        assert!(matches!(
            service.subscribe("1"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_post() {
        let service = ManagementService::with_documents(
            Arc::new(MemoryDocumentStore::new()),
            ErrorEmitter::new(),
        );
        assert!(matches!(
            service.update("nope", UpdateManagementPostDto::default()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(service.delete("nope").await, Err(AppError::NotFound(_))));
    }
}
