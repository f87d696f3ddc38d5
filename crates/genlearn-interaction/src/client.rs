//! HTTP client wrapper for the GenLearn backend.
//!
//! Every request carries the static `X-API-Key` header and, once a token has
//! been stored, `Authorization: Bearer <token>`. A `401` from any endpoint
//! clears the stored token and navigates to the login route before the error
//! is returned. Each call is a single attempt.

use genlearn_core::auth::{Navigator, Route, TokenStore};
use genlearn_core::{GenlearnError, Result};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Query string pairs.
pub(crate) type Query<'a> = &'a [(&'a str, String)];

/// Shared HTTP client. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    api_key: String,
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client for `base_url` (which includes the `/api` prefix).
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenlearnError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            tokens,
            navigator,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Absolute URL for an API path or a backend-relative media path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, self.url(path))
            .header(API_KEY_HEADER, &self.api_key);

        match self.tokens.load() {
            Ok(Some(token)) => builder = builder.bearer_auth(token),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Could not read stored token; sending request without it"),
        }
        builder
    }

    async fn dispatch(&self, path: &str, builder: RequestBuilder) -> Result<Response> {
        debug!(endpoint = path, "Dispatching request");
        let response = builder
            .send()
            .await
            .map_err(|e| GenlearnError::Network(format!("{path}: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED {
            self.sign_out();
            return Err(GenlearnError::Unauthorized {
                message: error_detail(&body).unwrap_or_else(|| "Session expired".to_string()),
            });
        }
        Err(map_http_error(status, &body))
    }

    fn sign_out(&self) {
        warn!("Backend rejected the credentials; clearing token");
        if let Err(e) = self.tokens.clear() {
            warn!(error = %e, "Failed to clear stored token");
        }
        self.navigator.navigate(Route::Login);
    }

    async fn read_json<T: DeserializeOwned>(path: &str, response: Response) -> Result<T> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GenlearnError::Network(format!("{path}: {e}")))?;
        serde_json::from_slice(&bytes).map_err(|e| GenlearnError::Serialization {
            format: "JSON".to_string(),
            message: format!("{path}: {e}"),
        })
    }

    // ============================================================================
    // Verb helpers used by the endpoint modules
    // ============================================================================

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, query: Query<'_>) -> Result<T> {
        let builder = self.request(Method::GET, path).query(query);
        let response = self.dispatch(path, builder).await?;
        Self::read_json(path, response).await
    }

    /// Raw JSON for endpoints whose shape is decoded separately.
    pub(crate) async fn get_value(&self, path: &str, query: Query<'_>) -> Result<Value> {
        self.get(path, query).await
    }

    pub(crate) async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method, path).json(body);
        let response = self.dispatch(path, builder).await?;
        Self::read_json(path, response).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, path, body).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, path, body).await
    }

    /// Sends a request whose response body is not needed.
    pub(crate) async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let mut builder = self.request(method, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.dispatch(path, builder).await?;
        Ok(())
    }

    /// POSTs JSON and returns the raw response bytes (audio).
    pub(crate) async fn post_for_bytes<B>(&self, path: &str, body: &B) -> Result<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path).json(body);
        let response = self.dispatch(path, builder).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GenlearnError::Network(format!("{path}: {e}")))?;
        Ok(bytes.to_vec())
    }

    /// POSTs with query parameters and no body.
    pub(crate) async fn post_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Query<'_>,
    ) -> Result<T> {
        let builder = self.request(Method::POST, path).query(query);
        let response = self.dispatch(path, builder).await?;
        Self::read_json(path, response).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T> {
        let builder = self.request(Method::POST, path).multipart(form);
        let response = self.dispatch(path, builder).await?;
        Self::read_json(path, response).await
    }
}

/// The `detail` field FastAPI-style backends put in error bodies.
fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn map_http_error(status: StatusCode, body: &str) -> GenlearnError {
    let message = error_detail(body).unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        } else {
            trimmed.to_string()
        }
    });
    GenlearnError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_http_error_prefers_detail() {
        let err = map_http_error(StatusCode::NOT_FOUND, r#"{"detail": "Session not found"}"#);
        assert_eq!(
            err,
            GenlearnError::Api {
                status: 404,
                message: "Session not found".into()
            }
        );
    }

    #[test]
    fn test_map_http_error_falls_back_to_body_then_reason() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert!(matches!(
            err,
            GenlearnError::Api { status: 502, ref message } if message == "upstream down"
        ));

        let err = map_http_error(StatusCode::SERVICE_UNAVAILABLE, "");
        assert!(err.is_retryable());
        assert!(err.to_string().contains("Service Unavailable"));
    }

    #[test]
    fn test_validation_detail_list_is_kept_as_json() {
        let body = r#"{"detail": [{"loc": ["body", "topic"], "msg": "field required"}]}"#;
        let detail = error_detail(body);
        assert!(detail.unwrap().contains("field required"));
    }
}
