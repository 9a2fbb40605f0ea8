use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::core::config::SheetConfig;
use crate::shared::casing::normalize_keys;
use crate::shared::constants::UNKNOWN_SCRIPT_ERROR;

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("Failed to reach script endpoint: {0}")]
    Request(String),

    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    /// `success: false` reported by the script itself
    #[error("{0}")]
    Script(String),

    #[error("Invalid response from script: {0}")]
    Parse(String),
}

#[async_trait]
pub trait SheetClient: Send + Sync {
    /// `GET ?action=<action>&<params>`; returns the raw payload once the
    /// success envelope has been checked.
    async fn fetch(&self, action: &str, params: &[(&str, String)]) -> Result<Value, SheetError>;

    /// `POST ?action=<action>` with a form-encoded body.
    async fn post(&self, action: &str, fields: Vec<(String, String)>)
        -> Result<Value, SheetError>;
}

/// Typed helpers layered over any [`SheetClient`]
#[async_trait]
pub trait SheetClientExt: SheetClient {
    /// Fetch, normalize key casing, and deserialize into `T`.
    async fn fetch_as<T>(&self, action: &str, params: &[(&str, String)]) -> Result<T, SheetError>
    where
        T: DeserializeOwned + Send,
    {
        let payload = normalize_keys(self.fetch(action, params).await?);
        serde_json::from_value(payload).map_err(|e| {
            error!("Failed to decode {} payload: {}", action, e);
            SheetError::Parse(format!("{}: {}", action, e))
        })
    }

    /// Serialize `payload` into form fields and post it.
    async fn post_payload<P>(&self, action: &str, payload: &P) -> Result<Value, SheetError>
    where
        P: Serialize + Sync,
    {
        let value = serde_json::to_value(payload).map_err(|e| SheetError::Parse(e.to_string()))?;
        self.post(action, form_fields(&value)).await
    }
}

impl<C: SheetClient + ?Sized> SheetClientExt for C {}

/// Flattens a JSON object into form fields. Nulls are omitted, strings are sent
/// as-is, booleans and numbers use their textual form, nested values are sent
/// as JSON text.
pub fn form_fields(value: &Value) -> Vec<(String, String)> {
    let Some(map) = value.as_object() else {
        return Vec::new();
    };

    map.iter()
        .filter_map(|(key, value)| {
            let encoded = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                other => other.to_string(),
            };
            Some((key.clone(), encoded))
        })
        .collect()
}

/// Rejects payloads carrying `success: false`.
pub fn check_envelope(payload: Value) -> Result<Value, SheetError> {
    if payload.get("success").and_then(Value::as_bool) == Some(false) {
        let message = payload
            .get("error")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_SCRIPT_ERROR)
            .to_string();
        return Err(SheetError::Script(message));
    }
    Ok(payload)
}

/// reqwest-backed client for the deployed script
pub struct SheetHttpClient {
    client: Client,
    script_url: String,
}

impl SheetHttpClient {
    pub fn new(config: &SheetConfig) -> Result<Self, SheetError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SheetError::Request(format!("Failed to build http client: {}", e)))?;

        Ok(Self {
            client,
            script_url: config.script_url.clone(),
        })
    }

    async fn read_response(
        &self,
        action: &str,
        response: reqwest::Response,
    ) -> Result<Value, SheetError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Script {} failed: HTTP {} - {}", action, status, body);
            return Err(SheetError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response.json().await.map_err(|e| {
            error!("Script {} returned invalid JSON: {}", action, e);
            SheetError::Parse(e.to_string())
        })?;

        check_envelope(payload).inspect_err(|e| {
            error!("Script {} reported failure: {}", action, e);
        })
    }
}

#[async_trait]
impl SheetClient for SheetHttpClient {
    async fn fetch(&self, action: &str, params: &[(&str, String)]) -> Result<Value, SheetError> {
        debug!("Fetching {} from script", action);

        let response = self
            .client
            .get(&self.script_url)
            .query(&[("action", action)])
            .query(params)
            .send()
            .await
            .map_err(|e| {
                error!("Error fetching {}: {}", action, e);
                SheetError::Request(e.to_string())
            })?;

        self.read_response(action, response).await
    }

    async fn post(
        &self,
        action: &str,
        fields: Vec<(String, String)>,
    ) -> Result<Value, SheetError> {
        debug!("Posting {} to script ({} fields)", action, fields.len());

        let response = self
            .client
            .post(&self.script_url)
            .query(&[("action", action)])
            .form(&fields)
            .send()
            .await
            .map_err(|e| {
                error!("Error posting {}: {}", action, e);
                SheetError::Request(e.to_string())
            })?;

        self.read_response(action, response).await
    }
}
