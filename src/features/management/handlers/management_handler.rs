use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::Stream;
use tokio_stream::{wrappers::WatchStream, StreamExt};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireManagement;
use crate::features::management::dtos::{
    CreateManagementPostDto, ManagementPostResponseDto, UpdateManagementPostDto,
};
use crate::features::management::models::PostType;
use crate::features::management::services::ManagementService;
use crate::modules::documents::DocState;
use crate::shared::types::ApiResponse;

const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// List management posts, newest first
#[utoipa::path(
    get,
    path = "/api/management/posts",
    responses(
        (status = 200, description = "Posts", body = ApiResponse<Vec<ManagementPostResponseDto>>),
        (status = 502, description = "Remote store unavailable")
    ),
    tag = "management"
)]
pub async fn list_posts(
    State(service): State<Arc<ManagementService>>,
) -> Result<Json<ApiResponse<Vec<ManagementPostResponseDto>>>> {
    let posts = service.list().await?;
    Ok(Json(ApiResponse::list(posts)))
}

/// Get one post
#[utoipa::path(
    get,
    path = "/api/management/posts/{id}",
    params(
        ("id" = String, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post", body = ApiResponse<ManagementPostResponseDto>),
        (status = 404, description = "Post not found")
    ),
    tag = "management"
)]
pub async fn get_post(
    State(service): State<Arc<ManagementService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ManagementPostResponseDto>>> {
    let post = service.get(&id).await?;
    Ok(Json(ApiResponse::success(Some(post), None, None)))
}

/// Post types
#[utoipa::path(
    get,
    path = "/api/management/post-types",
    responses(
        (status = 200, description = "Post types", body = ApiResponse<Vec<PostType>>),
    ),
    tag = "management"
)]
pub async fn list_post_types(
    State(service): State<Arc<ManagementService>>,
) -> Result<Json<ApiResponse<Vec<PostType>>>> {
    Ok(Json(ApiResponse::list(service.post_types())))
}

/// Publish a post
#[utoipa::path(
    post,
    path = "/api/management/posts",
    request_body = CreateManagementPostDto,
    responses(
        (status = 201, description = "Post published", body = ApiResponse<ManagementPostResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Login required"),
        (status = 403, description = "Management access required")
    ),
    security(("bearer_auth" = [])),
    tag = "management"
)]
pub async fn create_post(
    State(service): State<Arc<ManagementService>>,
    RequireManagement(_session): RequireManagement,
    AppJson(dto): AppJson<CreateManagementPostDto>,
) -> Result<(StatusCode, Json<ApiResponse<ManagementPostResponseDto>>)> {
    dto.validate()?;

    let post = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(post),
            Some("Post published successfully.".to_string()),
            None,
        )),
    ))
}

/// Edit a post; absent fields are kept
#[utoipa::path(
    put,
    path = "/api/management/posts/{id}",
    params(
        ("id" = String, Path, description = "Post ID")
    ),
    request_body = UpdateManagementPostDto,
    responses(
        (status = 200, description = "Post updated", body = ApiResponse<ManagementPostResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Management access required"),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "management"
)]
pub async fn update_post(
    State(service): State<Arc<ManagementService>>,
    RequireManagement(_session): RequireManagement,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateManagementPostDto>,
) -> Result<Json<ApiResponse<ManagementPostResponseDto>>> {
    dto.validate()?;

    let post = service.update(&id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(post),
        Some("Post updated successfully.".to_string()),
        None,
    )))
}

/// Delete a post
#[utoipa::path(
    delete,
    path = "/api/management/posts/{id}",
    params(
        ("id" = String, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post deleted"),
        (status = 403, description = "Management access required"),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "management"
)]
pub async fn delete_post(
    State(service): State<Arc<ManagementService>>,
    RequireManagement(_session): RequireManagement,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Post deleted.".to_string()),
        None,
    )))
}

/// Live post state as server-sent events
///
/// Each `state` event carries the current snapshot; a new one is sent
/// whenever the post changes.
#[utoipa::path(
    get,
    path = "/api/management/posts/{id}/stream",
    params(
        ("id" = String, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Event stream of post state", body = DocState, content_type = "text/event-stream"),
        (status = 400, description = "Live updates unavailable on this backend")
    ),
    tag = "management"
)]
pub async fn stream_post(
    State(service): State<Arc<ManagementService>>,
    Path(id): Path<String>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, axum::Error>>>> {
    let subscription = service.subscribe(&id)?;
    let states = WatchStream::new(subscription.state());

    // The stream owns the subscription; a disconnect drops both
    let events = states.map(move |state| {
        let _subscription = &subscription;
        Event::default().event("state").json_data(&state)
    });

    Ok(Sse::new(events).keep_alive(
        KeepAlive::new()
            .interval(KEEP_ALIVE_INTERVAL)
            .text("ping"),
    ))
}

#[cfg(test)]
mod tests {
    use crate::features::auth::models::Role;
    use crate::features::management::{routes, ManagementService};
    use crate::modules::documents::{ErrorEmitter, MemoryDocumentStore};
    use crate::modules::sheet::actions;
    use crate::shared::test_helpers::{with_session, MockSheetClient};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn documents_service() -> Arc<ManagementService> {
        Arc::new(ManagementService::with_documents(
            Arc::new(MemoryDocumentStore::new()),
            ErrorEmitter::new(),
        ))
    }

    fn management_server(service: Arc<ManagementService>) -> TestServer {
        TestServer::new(with_session(routes::routes(service), vec![Role::Management])).unwrap()
    }

    #[tokio::test]
    async fn test_publish_edit_delete() {
        let server = management_server(documents_service());

        let response = server
            .post("/api/management/posts")
            .json(&json!({
                "type": "Duty Timings",
                "title": "Guard shifts",
                "content": "Night shift starts at 10pm"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        let id = body["data"]["id"].as_str().unwrap().to_string();
        assert!(id.parse::<i64>().is_ok());
        assert_eq!(body["data"]["type"], "Duty Timings");

        server
            .put(&format!("/api/management/posts/{}", id))
            .json(&json!({ "content": "Night shift starts at 11pm" }))
            .await
            .assert_status_ok();

        let body: Value = server
            .get(&format!("/api/management/posts/{}", id))
            .await
            .json();
        assert_eq!(body["data"]["title"], "Guard shifts");
        assert_eq!(body["data"]["content"], "Night shift starts at 11pm");

        server
            .delete(&format!("/api/management/posts/{}", id))
            .await
            .assert_status_ok();
        let body: Value = server.get("/api/management/posts").await.json();
        assert_eq!(body["meta"]["total"], 0);
    }

    #[tokio::test]
    async fn test_missing_fields_rejected() {
        let response = management_server(documents_service())
            .post("/api/management/posts")
            .json(&json!({ "title": "Only a title" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["errors"], json!(["Please fill all fields."]));
    }

    #[tokio::test]
    async fn test_writes_need_management() {
        let service = documents_service();
        let anonymous = TestServer::new(routes::routes(Arc::clone(&service))).unwrap();
        anonymous
            .post("/api/management/posts")
            .json(&json!({ "type": "SOPs", "title": "Gate", "content": "Closed at 11" }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        let mart_owner = TestServer::new(with_session(
            routes::routes(service),
            vec![Role::MartOwner],
        ))
        .unwrap();
        mart_owner
            .delete("/api/management/posts/1")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_sheet_backend_lists_and_refuses_streams() {
        let sheet = Arc::new(MockSheetClient::new().respond(
            actions::GET_MANAGEMENT_POSTS,
            json!([{ "ID": 7, "Type": "Maintenance", "Title": "Lift", "Content": "Serviced", "Timestamp": 1000 }]),
        ));
        let service = Arc::new(ManagementService::with_sheet(sheet, ErrorEmitter::new()));
        let server = TestServer::new(routes::routes(service)).unwrap();

        let body: Value = server.get("/api/management/posts").await.json();
        assert_eq!(body["data"][0]["id"], "7");

        server
            .get("/api/management/posts/7/stream")
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let body: Value = server.get("/api/management/post-types").await.json();
        assert_eq!(body["meta"]["total"], 6);
    }

    type Frames = axum::body::BodyDataStream;

    /// Reads SSE frames until a `state` event matches `wanted`.
    async fn next_state(
        frames: &mut Frames,
        buf: &mut String,
        wanted: impl Fn(&Value) -> bool,
    ) -> Value {
        use futures::StreamExt;

        tokio::time::timeout(std::time::Duration::from_secs(5), async {
            loop {
                while let Some(end) = buf.find("\n\n") {
                    let frame: String = buf.drain(..end + 2).collect();
                    let is_state = frame
                        .lines()
                        .any(|l| l.strip_prefix("event:").map(str::trim) == Some("state"));
                    if !is_state {
                        continue;
                    }
                    let data = frame
                        .lines()
                        .find_map(|l| l.strip_prefix("data:"))
                        .unwrap();
                    let state: Value = serde_json::from_str(data.trim_start()).unwrap();
                    if wanted(&state) {
                        return state;
                    }
                }
                let chunk = frames.next().await.unwrap().unwrap();
                buf.push_str(std::str::from_utf8(&chunk).unwrap());
            }
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_stream_follows_post_until_disconnect() {
        use crate::features::management::dtos::{CreateManagementPostDto, UpdateManagementPostDto};
        use crate::features::management::handlers::stream_post;
        use crate::features::management::models::PostType;
        use axum::extract::{Path, State};
        use axum::response::IntoResponse;

        let store = Arc::new(MemoryDocumentStore::new());
        let service = Arc::new(ManagementService::with_documents(
            Arc::clone(&store) as _,
            ErrorEmitter::new(),
        ));
        let post = service
            .create(CreateManagementPostDto {
                post_type: Some(PostType::Maintenance),
                title: Some("Water tank".to_string()),
                content: Some("Cleaning on Sunday".to_string()),
            })
            .await
            .unwrap();

        let response = stream_post(State(Arc::clone(&service)), Path(post.id.clone()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let mut frames = response.into_body().into_data_stream();
        let mut buf = String::new();

        let loaded = next_state(&mut frames, &mut buf, |s| !s["data"].is_null()).await;
        assert_eq!(loaded["isLoading"], false);
        assert_eq!(loaded["data"]["id"], post.id);
        assert_eq!(loaded["data"]["data"]["title"], "Water tank");

        service
            .update(
                &post.id,
                UpdateManagementPostDto {
                    content: Some("Moved to Monday".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let edited = next_state(&mut frames, &mut buf, |s| {
            s["data"]["data"]["content"] == "Moved to Monday"
        })
        .await;
        assert_eq!(edited["data"]["data"]["title"], "Water tank");
        assert!(store.listeners() > 0);

        drop(frames);
        tokio::time::timeout(std::time::Duration::from_secs(5), async {
            while store.listeners() > 0 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
    }
}
