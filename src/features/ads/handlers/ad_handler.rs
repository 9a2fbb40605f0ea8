use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::ads::dtos::{AdListQueryDto, AdResponseDto, CreateAdDto, UpdateAdDto};
use crate::features::ads::models::AdCategory;
use crate::features::ads::services::AdService;
use crate::features::auth::guards::MaybeSession;
use crate::shared::types::{ApiResponse, RecordPinDto};

/// List active ads
///
/// Expired ads are never returned. Results are newest first.
#[utoipa::path(
    get,
    path = "/api/ads",
    params(AdListQueryDto),
    responses(
        (status = 200, description = "Active ads", body = ApiResponse<Vec<AdResponseDto>>),
        (status = 400, description = "Unknown category"),
        (status = 502, description = "Remote store unavailable")
    ),
    tag = "ads"
)]
pub async fn list_ads(
    State(service): State<Arc<AdService>>,
    Query(query): Query<AdListQueryDto>,
) -> Result<Json<ApiResponse<Vec<AdResponseDto>>>> {
    let ads = service.list(query.category.as_deref()).await?;
    Ok(Json(ApiResponse::list(ads)))
}

/// Ad categories
#[utoipa::path(
    get,
    path = "/api/ads/categories",
    responses(
        (status = 200, description = "Categories", body = ApiResponse<Vec<AdCategory>>),
    ),
    tag = "ads"
)]
pub async fn list_categories(
    State(service): State<Arc<AdService>>,
) -> Result<Json<ApiResponse<Vec<AdCategory>>>> {
    Ok(Json(ApiResponse::list(service.categories())))
}

/// Post an ad
#[utoipa::path(
    post,
    path = "/api/ads",
    request_body = CreateAdDto,
    responses(
        (status = 201, description = "Ad posted", body = ApiResponse<AdResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "ads"
)]
pub async fn create_ad(
    State(service): State<Arc<AdService>>,
    AppJson(dto): AppJson<CreateAdDto>,
) -> Result<(StatusCode, Json<ApiResponse<AdResponseDto>>)> {
    dto.validate()?;

    let ad = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(ad),
            Some("Advertisement posted!".to_string()),
            None,
        )),
    ))
}

/// Edit an ad (PIN or admin)
#[utoipa::path(
    put,
    path = "/api/ads/{id}",
    params(
        ("id" = String, Path, description = "Ad ID")
    ),
    request_body = UpdateAdDto,
    responses(
        (status = 200, description = "Ad updated", body = ApiResponse<AdResponseDto>),
        (status = 400, description = "Validation error or PIN missing"),
        (status = 403, description = "Incorrect PIN"),
        (status = 404, description = "Ad not found")
    ),
    tag = "ads"
)]
pub async fn update_ad(
    State(service): State<Arc<AdService>>,
    MaybeSession(session): MaybeSession,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateAdDto>,
) -> Result<Json<ApiResponse<AdResponseDto>>> {
    dto.validate()?;

    let ad = service.update(&id, dto, session.as_ref()).await?;
    Ok(Json(ApiResponse::success(Some(ad), None, None)))
}

/// Delete an ad (PIN or admin)
#[utoipa::path(
    delete,
    path = "/api/ads/{id}",
    params(
        ("id" = String, Path, description = "Ad ID")
    ),
    request_body(content = RecordPinDto, description = "Optional for admin"),
    responses(
        (status = 200, description = "Ad deleted"),
        (status = 400, description = "PIN missing"),
        (status = 403, description = "Incorrect PIN"),
        (status = 404, description = "Ad not found")
    ),
    tag = "ads"
)]
pub async fn delete_ad(
    State(service): State<Arc<AdService>>,
    MaybeSession(session): MaybeSession,
    Path(id): Path<String>,
    body: Option<AppJson<RecordPinDto>>,
) -> Result<Json<ApiResponse<()>>> {
    let pin = body.and_then(|AppJson(dto)| dto.pin);
    service.delete(&id, pin.as_deref(), session.as_ref()).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Advertisement deleted.".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use crate::features::ads::{routes, AdService};
    use crate::modules::sheet::actions;
    use crate::shared::test_helpers::{admin_session, MockSheetClient};
    use crate::shared::time::now_millis;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn sheet_with_ads() -> Arc<MockSheetClient> {
        let now = now_millis();
        Arc::new(MockSheetClient::new().respond(
            actions::GET_ADS,
            json!([
                {
                    "ID": 1, "Title": "Old flat for rent", "Description": "Two bedrooms",
                    "Phone": "03001234567", "Category": "Property",
                    "Expiry": now + 3_600_000, "Timestamp": "2024-01-01T00:00:00Z", "Pin": "1111"
                },
                {
                    "ID": 2, "Title": "Biryani", "Description": "Friday special",
                    "Phone": "03001234567", "Category": "Food",
                    "Expiry": now - 1, "Timestamp": "2024-03-01T00:00:00Z", "Pin": "2222"
                },
                {
                    "ID": 3, "Title": "Tuition", "Description": "Maths and physics",
                    "Phone": "03001234567", "Category": "Tution Center",
                    "Expiry": now + 7_200_000, "Timestamp": "2024-02-01T00:00:00Z", "Pin": "3333"
                }
            ]),
        ))
    }

    fn server(sheet: Arc<MockSheetClient>) -> TestServer {
        let service = Arc::new(AdService::new(sheet, 24));
        TestServer::new(routes::routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_list_hides_expired_and_pins() {
        let response = server(sheet_with_ads()).get("/api/ads").await;
        response.assert_status_ok();

        let body: Value = response.json();
        let ads = body["data"].as_array().unwrap();
        let ids: Vec<_> = ads.iter().map(|a| a["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["3", "1"]);
        assert!(ads.iter().all(|a| a.get("pin").is_none()));
        assert_eq!(ads[1]["hoursLeft"], 1);
    }

    #[tokio::test]
    async fn test_list_filters_category() {
        let server = server(sheet_with_ads());

        let body: Value = server
            .get("/api/ads")
            .add_query_param("category", "Tution Center")
            .await
            .json();
        assert_eq!(body["meta"]["total"], 1);

        let body: Value = server
            .get("/api/ads")
            .add_query_param("category", "All Ads")
            .await
            .json();
        assert_eq!(body["meta"]["total"], 2);

        server
            .get("/api/ads")
            .add_query_param("category", "Cars")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_posts_form_with_expiry() {
        let sheet = Arc::new(MockSheetClient::new());
        let response = server(Arc::clone(&sheet))
            .post("/api/ads")
            .json(&json!({
                "category": "Food",
                "title": "Fresh samosas",
                "description": "Hot samosas every evening",
                "phone": "+92 300 1234567",
                "pin": "1234"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let calls = sheet.calls_to(actions::POST_AD);
        assert_eq!(calls.len(), 1);
        let call = &calls[0];
        assert_eq!(call.field("category"), Some("Food"));
        assert_eq!(call.field("pin"), Some("1234"));

        let expiry: i64 = call.field("expiry").unwrap().parse().unwrap();
        let id: i64 = call.field("id").unwrap().parse().unwrap();
        assert_eq!(expiry - id, 24 * 3_600_000);

        let body: Value = response.json();
        assert_eq!(body["data"]["hoursLeft"], 24);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_form() {
        let sheet = Arc::new(MockSheetClient::new());
        let response = server(Arc::clone(&sheet))
            .post("/api/ads")
            .json(&json!({
                "category": "Food",
                "title": "Hi",
                "description": "short",
                "phone": "12",
                "pin": "abcd"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["errors"].as_array().unwrap().len(), 4);
        assert!(sheet.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_requires_matching_pin() {
        let sheet = sheet_with_ads();
        let server = server(Arc::clone(&sheet));

        server
            .delete("/api/ads/1")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .delete("/api/ads/1")
            .json(&json!({ "pin": "9999" }))
            .await
            .assert_status(StatusCode::FORBIDDEN);
        assert!(sheet.calls_to(actions::DELETE_AD).is_empty());

        server
            .delete("/api/ads/1")
            .json(&json!({ "pin": "1111" }))
            .await
            .assert_status_ok();
        let deletes = sheet.calls_to(actions::DELETE_AD);
        assert_eq!(deletes[0].field("id"), Some("1"));

        server
            .delete("/api/ads/404")
            .json(&json!({ "pin": "1111" }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_edits_without_pin() {
        let sheet = sheet_with_ads();
        let service = Arc::new(AdService::new(Arc::clone(&sheet) as _, 24));
        let server = TestServer::new(admin_session(routes::routes(service))).unwrap();

        let response = server
            .put("/api/ads/3")
            .json(&json!({
                "category": "Tution Center",
                "title": "Maths tuition",
                "description": "Maths and physics, grades 6-10",
                "phone": "03001234567"
            }))
            .await;
        response.assert_status_ok();

        let updates = sheet.calls_to(actions::UPDATE_AD);
        assert_eq!(updates[0].field("title"), Some("Maths tuition"));
        assert_eq!(updates[0].field("pin"), None);
    }

    #[tokio::test]
    async fn test_remote_failure_is_bad_gateway() {
        let sheet = Arc::new(MockSheetClient::new().respond(
            actions::GET_ADS,
            json!({ "success": false, "error": "Sheet locked" }),
        ));
        let response = server(sheet).get("/api/ads").await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: Value = response.json();
        assert_eq!(body["message"], "Sheet locked");
    }
}
