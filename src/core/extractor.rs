use axum::{
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, OptionalFromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;

/// Custom JSON extractor that provides consistent error responses
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppJsonRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match <Json<T> as FromRequest<S>>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(AppJsonRejection(rejection)),
        }
    }
}

/// Absent body (no JSON content type) extracts as `None`
impl<T, S> OptionalFromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppJsonRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Option<Self>, Self::Rejection> {
        match <Json<T> as OptionalFromRequest<S>>::from_request(req, state).await {
            Ok(value) => Ok(value.map(|v| Self(v.0))),
            Err(rejection) => Err(AppJsonRejection(rejection)),
        }
    }
}

pub struct AppJsonRejection(JsonRejection);

impl IntoResponse for AppJsonRejection {
    fn into_response(self) -> Response {
        let message = match self.0 {
            JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err),
            JsonRejection::JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err),
            JsonRejection::MissingJsonContentType(err) => {
                format!("Missing JSON content type: {}", err)
            }
            _ => "Failed to parse JSON body".to_string(),
        };

        AppError::BadRequest(message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Router};
    use axum_test::TestServer;
    use serde::Deserialize;
    use serde_json::{json, Value};

    #[derive(Deserialize)]
    struct Vote {
        vote: String,
    }

    async fn echo(AppJson(body): AppJson<Vote>) -> String {
        body.vote
    }

    async fn maybe_echo(body: Option<AppJson<Vote>>) -> String {
        body.map(|AppJson(v)| v.vote)
            .unwrap_or_else(|| "none".to_string())
    }

    #[tokio::test]
    async fn test_rejection_uses_envelope() {
        let server = TestServer::new(Router::new().route("/", post(echo))).unwrap();

        let ok = server.post("/").json(&json!({ "vote": "like" })).await;
        ok.assert_text("like");

        let bad = server.post("/").json(&json!({ "vote": 3 })).await;
        bad.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = bad.json();
        assert_eq!(body["success"], false);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid JSON data"));
    }

    #[tokio::test]
    async fn test_optional_body() {
        let server = TestServer::new(Router::new().route("/", post(maybe_echo))).unwrap();

        server.post("/").await.assert_text("none");
        server
            .post("/")
            .json(&json!({ "vote": "dislike" }))
            .await
            .assert_text("dislike");
    }
}
