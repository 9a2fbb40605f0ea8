use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::masjid::dtos::{TimingsResponseDto, UpdateTimingsDto};
use crate::features::masjid::services::MasjidService;
use crate::shared::types::ApiResponse;

/// Namaz timings and masjid staff
#[utoipa::path(
    get,
    path = "/api/masjid/timings",
    responses(
        (status = 200, description = "Timings", body = ApiResponse<TimingsResponseDto>),
    ),
    tag = "masjid"
)]
pub async fn get_timings(
    State(service): State<Arc<MasjidService>>,
) -> Result<Json<ApiResponse<TimingsResponseDto>>> {
    Ok(Json(ApiResponse::success(Some(service.get().await), None, None)))
}

/// Replace the timings
#[utoipa::path(
    put,
    path = "/api/masjid/timings",
    request_body = UpdateTimingsDto,
    responses(
        (status = 200, description = "Timings updated", body = ApiResponse<TimingsResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Login required"),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = [])),
    tag = "masjid"
)]
pub async fn update_timings(
    State(service): State<Arc<MasjidService>>,
    RequireAdmin(_session): RequireAdmin,
    AppJson(dto): AppJson<UpdateTimingsDto>,
) -> Result<Json<ApiResponse<TimingsResponseDto>>> {
    dto.validate()?;

    let timings = service.update(dto.into()).await;
    Ok(Json(ApiResponse::success(
        Some(timings),
        Some("Namaz timings updated.".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use crate::features::masjid::{routes, MasjidService};
    use crate::shared::test_helpers::admin_session;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn timings(fajr: &str) -> Value {
        json!({
            "fajr": fajr, "zuhar": "13:15", "asar": "", "maghrib": "18:20",
            "isha": "20:30", "jumma": "13:45",
            "imam": "janab zulfiqar sahab", "moazin": "janab salman sahab", "khadim": ""
        })
    }

    #[tokio::test]
    async fn test_defaults_are_displayed() {
        let server = TestServer::new(routes::routes(Arc::new(MasjidService::new()))).unwrap();
        let body: Value = server.get("/api/masjid/timings").await.json();

        assert_eq!(body["data"]["timings"]["fajr"], "06:10");
        assert_eq!(body["data"]["prayers"][0]["time"], "06:10 AM");
        assert_eq!(body["data"]["prayers"][1]["time"], "01:30 PM");
        assert_eq!(body["data"]["staff"][2]["role"], "Khadim");
    }

    #[tokio::test]
    async fn test_admin_update_persists_in_memory() {
        let service = Arc::new(MasjidService::new());
        let server = TestServer::new(admin_session(routes::routes(Arc::clone(&service)))).unwrap();

        server
            .put("/api/masjid/timings")
            .json(&timings("05:45"))
            .await
            .assert_status_ok();

        let body: Value = server.get("/api/masjid/timings").await.json();
        assert_eq!(body["data"]["prayers"][0]["time"], "05:45 AM");
        assert_eq!(body["data"]["prayers"][2]["time"], "Not set");
    }

    #[tokio::test]
    async fn test_update_rejects_bad_time_and_anonymous() {
        let service = Arc::new(MasjidService::new());

        TestServer::new(routes::routes(Arc::clone(&service)))
            .unwrap()
            .put("/api/masjid/timings")
            .json(&timings("05:45"))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        let response = TestServer::new(admin_session(routes::routes(Arc::clone(&service))))
            .unwrap()
            .put("/api/masjid/timings")
            .json(&timings("5:45"))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["errors"], json!(["Time must be HH:MM."]));

        assert_eq!(service.get().await.timings.fajr, "06:10");
    }
}
