//! HTTP plumbing shared by every endpoint module.
//!
//! [`ApiClient`] owns the [`reqwest::Client`], the base URL and the current
//! [`Session`]. Endpoint methods live next to their resource (`projects.rs`,
//! `customers.rs`, ...) as further `impl ApiClient` blocks.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use pidgen_core::lifecycle::IdPolicy;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::{Session, SessionStore};

/// Header carrying a per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client for the project-ID backend.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    id_policy: IdPolicy,
    store: Arc<dyn SessionStore>,
    current: RwLock<Option<Session>>,
}

impl ApiClient {
    /// Build a client from configuration, restoring any stored session.
    ///
    /// An unreadable session file is logged and treated as signed out.
    pub fn new(config: &ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::Invalid(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(
            http,
            config.api_url.clone(),
            config.id_policy,
            store,
        ))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        http: reqwest::Client,
        base_url: String,
        id_policy: IdPolicy,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        let restored = match store.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring stored session");
                None
            }
        };
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            id_policy,
            store,
            current: RwLock::new(restored),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn id_policy(&self) -> IdPolicy {
        self.id_policy
    }

    /// The signed-in session, if any.
    pub fn session(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Replace the session in memory and in the store.
    pub(crate) fn set_session(&self, session: Option<Session>) -> Result<(), ApiError> {
        match &session {
            Some(s) => self.store.save(s)?,
            None => self.store.clear()?,
        }
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = session;
        Ok(())
    }

    // ---- private helpers ----

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request_id = uuid::Uuid::new_v4();
        tracing::debug!(%method, path, %request_id, "Sending request");

        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");
        if let Some(session) = self.session() {
            builder = builder.bearer_auth(session.token());
        }
        builder
    }

    /// `GET` a collection. A body that is not a JSON array is logged and
    /// read as an empty list.
    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Vec<T>, ApiError> {
        let response = self
            .request(Method::GET, path)
            .send()
            .await
            .map_err(ApiError::transport)?;
        let response = Self::ensure_success(response).await?;
        let text = response.text().await.map_err(ApiError::transport)?;
        let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);

        match body {
            Value::Array(_) => {
                serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
            }
            other => {
                tracing::warn!(
                    path,
                    kind = json_kind(&other),
                    "Expected a JSON array; treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Send `body` and decode the JSON response.
    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .request(method, path)
            .json(body)
            .send()
            .await
            .map_err(ApiError::transport)?;
        Self::parse_response(response).await
    }

    /// Send an optional body and discard the response body.
    pub(crate) async fn send_unit<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut builder = self.request(method, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder.send().await.map_err(ApiError::transport)?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or the normalized [`ApiError`] on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ApiError::from_response(status, &body);
            tracing::warn!(status = status.as_u16(), error = %err, "Request failed");
            return Err(err);
        }
        Ok(response)
    }

    /// Check the status code and deserialize the JSON body.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        let text = response.text().await.map_err(ApiError::transport)?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
