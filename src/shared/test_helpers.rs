use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::{extract::Request, middleware::Next, Router};
use serde_json::{json, Value};

use crate::features::auth::models::{Role, Session};
use crate::modules::sheet::{check_envelope, SheetClient, SheetError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Fetch,
    Post,
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub kind: CallKind,
    pub action: String,
    pub fields: Vec<(String, String)>,
}

impl RecordedCall {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Scripted stand-in for the remote script endpoint. Responses are canned per
/// action and pass through the same envelope check as the real client; posts
/// without a canned response succeed, fetches without one fail.
#[derive(Default)]
pub struct MockSheetClient {
    responses: Mutex<HashMap<String, Result<Value, u16>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockSheetClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, action: &str, payload: Value) -> Self {
        self.set_response(action, payload);
        self
    }

    /// Makes `action` answer with a non-2xx status
    pub fn fail_http(self, action: &str, status: u16) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(action.to_string(), Err(status));
        self
    }

    pub fn set_response(&self, action: &str, payload: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(action.to_string(), Ok(payload));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, action: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.action == action)
            .collect()
    }

    fn answer(
        &self,
        kind: CallKind,
        action: &str,
        fields: Vec<(String, String)>,
    ) -> Result<Value, SheetError> {
        self.calls.lock().unwrap().push(RecordedCall {
            kind,
            action: action.to_string(),
            fields,
        });

        match self.responses.lock().unwrap().get(action).cloned() {
            Some(Ok(payload)) => check_envelope(payload),
            Some(Err(status)) => Err(SheetError::Http {
                status,
                body: "scripted failure".to_string(),
            }),
            None if kind == CallKind::Post => Ok(json!({ "success": true })),
            None => Err(SheetError::Script(format!("no canned response for {}", action))),
        }
    }
}

#[async_trait]
impl SheetClient for MockSheetClient {
    async fn fetch(&self, action: &str, params: &[(&str, String)]) -> Result<Value, SheetError> {
        let fields = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        self.answer(CallKind::Fetch, action, fields)
    }

    async fn post(&self, action: &str, fields: Vec<(String, String)>) -> Result<Value, SheetError> {
        self.answer(CallKind::Post, action, fields)
    }
}

/// Wraps `router` so every request carries a session with `roles`.
pub fn with_session(router: Router, roles: Vec<Role>) -> Router {
    let session = Session::new(roles);
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let session = session.clone();
            async move {
                request.extensions_mut().insert(session);
                next.run(request).await
            }
        },
    ))
}

pub fn admin_session(router: Router) -> Router {
    with_session(router, vec![Role::Admin])
}
