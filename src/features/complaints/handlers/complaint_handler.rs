use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{MaybeSession, RequireManagement};
use crate::features::complaints::dtos::{
    ComplaintResponseDto, ComplaintStatusDto, CreateComplaintDto, UpdateComplaintDto,
};
use crate::features::complaints::services::ComplaintService;
use crate::shared::types::{ApiResponse, RecordPinDto};

/// List complaints, newest first
#[utoipa::path(
    get,
    path = "/api/complaints",
    responses(
        (status = 200, description = "Complaints", body = ApiResponse<Vec<ComplaintResponseDto>>),
        (status = 502, description = "Remote store unavailable")
    ),
    tag = "complaints"
)]
pub async fn list_complaints(
    State(service): State<Arc<ComplaintService>>,
) -> Result<Json<ApiResponse<Vec<ComplaintResponseDto>>>> {
    let complaints = service.list().await?;
    Ok(Json(ApiResponse::list(complaints)))
}

/// File a complaint
#[utoipa::path(
    post,
    path = "/api/complaints",
    request_body = CreateComplaintDto,
    responses(
        (status = 201, description = "Complaint filed", body = ApiResponse<ComplaintResponseDto>),
        (status = 400, description = "Validation error or unknown villa")
    ),
    tag = "complaints"
)]
pub async fn create_complaint(
    State(service): State<Arc<ComplaintService>>,
    AppJson(dto): AppJson<CreateComplaintDto>,
) -> Result<(StatusCode, Json<ApiResponse<ComplaintResponseDto>>)> {
    dto.validate()?;

    let complaint = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(complaint),
            Some("Complaint submitted!".to_string()),
            None,
        )),
    ))
}

/// Edit a complaint (PIN or admin)
#[utoipa::path(
    put,
    path = "/api/complaints/{id}",
    params(
        ("id" = String, Path, description = "Complaint ID")
    ),
    request_body = UpdateComplaintDto,
    responses(
        (status = 200, description = "Complaint updated", body = ApiResponse<ComplaintResponseDto>),
        (status = 400, description = "Validation error or PIN missing"),
        (status = 403, description = "Incorrect PIN"),
        (status = 404, description = "Complaint not found")
    ),
    tag = "complaints"
)]
pub async fn update_complaint(
    State(service): State<Arc<ComplaintService>>,
    MaybeSession(session): MaybeSession,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateComplaintDto>,
) -> Result<Json<ApiResponse<ComplaintResponseDto>>> {
    dto.validate()?;

    let complaint = service.update(&id, dto, session.as_ref()).await?;
    Ok(Json(ApiResponse::success(Some(complaint), None, None)))
}

/// Mark a complaint noted and/or resolved
#[utoipa::path(
    patch,
    path = "/api/complaints/{id}/status",
    params(
        ("id" = String, Path, description = "Complaint ID")
    ),
    request_body = ComplaintStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ComplaintResponseDto>),
        (status = 400, description = "No flag given"),
        (status = 401, description = "Login required"),
        (status = 403, description = "Management access required"),
        (status = 404, description = "Complaint not found")
    ),
    security(("bearer_auth" = [])),
    tag = "complaints"
)]
pub async fn update_complaint_status(
    State(service): State<Arc<ComplaintService>>,
    RequireManagement(_session): RequireManagement,
    Path(id): Path<String>,
    AppJson(dto): AppJson<ComplaintStatusDto>,
) -> Result<Json<ApiResponse<ComplaintResponseDto>>> {
    let complaint = service.update_status(&id, dto).await?;
    Ok(Json(ApiResponse::success(Some(complaint), None, None)))
}

/// Delete a complaint (PIN or admin)
#[utoipa::path(
    delete,
    path = "/api/complaints/{id}",
    params(
        ("id" = String, Path, description = "Complaint ID")
    ),
    request_body(content = RecordPinDto, description = "Optional for admin"),
    responses(
        (status = 200, description = "Complaint deleted"),
        (status = 400, description = "PIN missing"),
        (status = 403, description = "Incorrect PIN"),
        (status = 404, description = "Complaint not found")
    ),
    tag = "complaints"
)]
pub async fn delete_complaint(
    State(service): State<Arc<ComplaintService>>,
    MaybeSession(session): MaybeSession,
    Path(id): Path<String>,
    body: Option<AppJson<RecordPinDto>>,
) -> Result<Json<ApiResponse<()>>> {
    let pin = body.and_then(|AppJson(dto)| dto.pin);
    service.delete(&id, pin.as_deref(), session.as_ref()).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Complaint deleted.".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use crate::features::auth::models::Role;
    use crate::features::complaints::{routes, ComplaintService};
    use crate::features::villas::VillaService;
    use crate::modules::sheet::actions;
    use crate::shared::test_helpers::{with_session, MockSheetClient};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn sheet_with_complaints() -> Arc<MockSheetClient> {
        Arc::new(MockSheetClient::new().respond(
            actions::GET_COMPLAINTS,
            json!([
                {
                    "ID": 10, "Villa": "A-001", "Title": "Street light out",
                    "Description": "The light near the gate is broken",
                    "Noted": false, "Resolved": false, "ResolvedDate": "",
                    "Timestamp": "2024-01-01T00:00:00Z", "Pin": 4321
                },
                {
                    "ID": 11, "Villa": "B-002", "Title": "Water leak",
                    "Description": "Pipe leaking outside the villa",
                    "Noted": "TRUE", "Resolved": true,
                    "ResolvedDate": "2024-02-10T00:00:00Z",
                    "Timestamp": "2024-02-01T00:00:00Z", "Pin": "0042"
                }
            ]),
        ))
    }

    fn service(sheet: Arc<MockSheetClient>) -> Arc<ComplaintService> {
        let villas = Arc::new(VillaService::load(None).unwrap());
        Arc::new(ComplaintService::new(sheet, villas))
    }

    fn server(sheet: Arc<MockSheetClient>) -> TestServer {
        TestServer::new(routes::routes(service(sheet))).unwrap()
    }

    #[tokio::test]
    async fn test_list_newest_first_without_pins() {
        let response = server(sheet_with_complaints()).get("/api/complaints").await;
        response.assert_status_ok();

        let body: Value = response.json();
        let complaints = body["data"].as_array().unwrap();
        assert_eq!(complaints[0]["id"], "11");
        assert_eq!(complaints[0]["noted"], true);
        assert!(complaints[1]["resolvedDate"].is_null());
        assert!(complaints.iter().all(|c| c.get("pin").is_none()));
        assert!(complaints[0]["postedAgo"].as_str().unwrap().ends_with("ago"));
    }

    #[tokio::test]
    async fn test_create_normalizes_villa() {
        let sheet = Arc::new(MockSheetClient::new());
        let response = server(Arc::clone(&sheet))
            .post("/api/complaints")
            .json(&json!({
                "villa": "a-1",
                "title": "Garbage pickup",
                "description": "Garbage not collected for a week",
                "pin": "1234"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let posts = sheet.calls_to(actions::POST_COMPLAINT);
        assert_eq!(posts[0].field("villa"), Some("A-001"));
        assert_eq!(posts[0].field("pin"), Some("1234"));

        let body: Value = response.json();
        assert_eq!(body["data"]["villa"], "A-001");
        assert_eq!(body["data"]["resolved"], false);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_villa() {
        let sheet = Arc::new(MockSheetClient::new());
        let response = server(Arc::clone(&sheet))
            .post("/api/complaints")
            .json(&json!({
                "villa": "Z-999",
                "title": "Garbage pickup",
                "description": "Garbage not collected for a week",
                "pin": "1234"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["errors"][0], "Please enter a valid villa number.");
        assert!(sheet.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_checks_padded_pin() {
        let sheet = sheet_with_complaints();
        let server = server(Arc::clone(&sheet));
        let edit = json!({
            "villa": "B-002",
            "title": "Water leak again",
            "description": "Pipe leaking outside the villa",
            "pin": "0042"
        });

        server
            .put("/api/complaints/11")
            .json(&edit)
            .await
            .assert_status_ok();

        let updates = sheet.calls_to(actions::UPDATE_COMPLAINT);
        assert_eq!(updates[0].field("title"), Some("Water leak again"));
        assert_eq!(updates[0].field("pin"), None);

        let mut wrong = edit.clone();
        wrong["pin"] = json!("4321");
        server
            .put("/api/complaints/11")
            .json(&wrong)
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_status_requires_management() {
        let sheet = sheet_with_complaints();
        server(Arc::clone(&sheet))
            .patch("/api/complaints/10/status")
            .json(&json!({ "noted": true }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        let app = with_session(routes::routes(service(Arc::clone(&sheet))), vec![Role::MartOwner]);
        TestServer::new(app)
            .unwrap()
            .patch("/api/complaints/10/status")
            .json(&json!({ "noted": true }))
            .await
            .assert_status(StatusCode::FORBIDDEN);

        assert!(sheet.calls_to(actions::UPDATE_COMPLAINT_STATUS).is_empty());
    }

    #[tokio::test]
    async fn test_status_posts_each_flag() {
        let sheet = sheet_with_complaints();
        let app = with_session(routes::routes(service(Arc::clone(&sheet))), vec![Role::Management]);
        let server = TestServer::new(app).unwrap();

        let response = server
            .patch("/api/complaints/10/status")
            .json(&json!({ "noted": true, "resolved": true }))
            .await;
        response.assert_status_ok();

        let calls = sheet.calls_to(actions::UPDATE_COMPLAINT_STATUS);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].field("noted"), Some("true"));
        assert_eq!(calls[1].field("resolved"), Some("true"));
        assert!(!calls[1].field("resolvedDate").unwrap().is_empty());

        let body: Value = response.json();
        assert_eq!(body["data"]["noted"], true);
        assert!(body["data"]["resolvedDate"].is_string());

        server
            .patch("/api/complaints/11/status")
            .json(&json!({ "resolved": false }))
            .await
            .assert_status_ok();
        let calls = sheet.calls_to(actions::UPDATE_COMPLAINT_STATUS);
        assert_eq!(calls[2].field("resolvedDate"), Some(""));

        server
            .patch("/api/complaints/10/status")
            .json(&json!({}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_by_pin() {
        let sheet = sheet_with_complaints();
        let server = server(Arc::clone(&sheet));

        server
            .delete("/api/complaints/10")
            .json(&json!({ "pin": "4321" }))
            .await
            .assert_status_ok();

        let deletes = sheet.calls_to(actions::DELETE_COMPLAINT);
        assert_eq!(deletes[0].field("id"), Some("10"));
    }
}
