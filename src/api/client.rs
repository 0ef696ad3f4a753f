//! Request dispatcher for the backend REST API.
//!
//! ARCHITECTURE
//! ============
//! Every backend call goes through `ApiClient::request`, which attaches the
//! bearer token (when the client carries one) and folds transport errors,
//! non-2xx statuses and undecodable bodies into `RequestResult::Failure`.
//! Callers branch on the result, never on error types.
//!
//! A client is a plain value: the anonymous one lives in `AppState` and
//! per-session clients are derived with `with_token`. Nothing is registered
//! globally.

use std::time::Duration;

use axum::body::Bytes;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

/// Shown when the backend gives no usable `message`.
pub const FALLBACK_ERROR_MESSAGE: &str = "Unexpected error while contacting the server";

const API_PREFIX: &str = "/api";
const REQUEST_ID_HEADER: &str = "x-request-id";

// =============================================================================
// RESULT
// =============================================================================

/// Normalized outcome of a backend call.
#[derive(Debug)]
pub enum RequestResult<T> {
    Success {
        data: T,
        /// The response body's `message` field, when present.
        message: Option<String>,
        headers: HeaderMap,
    },
    Failure {
        message: String,
    },
}

impl<T> RequestResult<T> {
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { message, .. } => message.as_deref(),
            Self::Failure { message } => Some(message),
        }
    }

    /// Drop headers and message, keeping the data or the failure message.
    #[cfg(test)]
    pub fn into_data(self) -> Result<T, String> {
        match self {
            Self::Success { data, .. } => Ok(data),
            Self::Failure { message } => Err(message),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self::Failure { message: message.into() }
    }
}

// =============================================================================
// OPTIONS
// =============================================================================

#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(Value),
    /// Forwarded untouched with the given content type.
    Raw { content_type: String, bytes: Bytes },
}

#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    /// Options carrying a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` cannot be represented as JSON.
    pub fn json(body: &impl Serialize) -> Result<Self, serde_json::Error> {
        Ok(Self { body: Some(RequestBody::Json(serde_json::to_value(body)?)), ..Self::default() })
    }

    #[must_use]
    pub fn raw(content_type: impl Into<String>, bytes: Bytes) -> Self {
        Self { body: Some(RequestBody::Raw { content_type: content_type.into(), bytes }), ..Self::default() }
    }

    #[must_use]
    pub fn query(query: Vec<(String, String)>) -> Self {
        Self { query, ..Self::default() }
    }
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_root: String,
    token: Option<String>,
}

impl ApiClient {
    /// Build an anonymous client rooted at `<base_url>/api`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: &str, connect_timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()?;
        Ok(Self { http, api_root: format!("{}{API_PREFIX}", base_url.trim_end_matches('/')), token: None })
    }

    /// Same connection pool, different bearer token.
    #[must_use]
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self { http: self.http.clone(), api_root: self.api_root.clone(), token: Some(token.into()) }
    }

    #[cfg(test)]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: Vec<(String, String)>) -> RequestResult<T> {
        self.request(Method::GET, path, RequestOptions::query(query))
            .await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> RequestResult<T> {
        match RequestOptions::json(body) {
            Ok(opts) => self.request(Method::POST, path, opts).await,
            Err(e) => {
                tracing::error!(error = %e, path, "request body serialization failed");
                RequestResult::failure(FALLBACK_ERROR_MESSAGE)
            }
        }
    }

    /// Issue one call and normalize the outcome.
    pub async fn request<T: DeserializeOwned>(&self, method: Method, path: &str, opts: RequestOptions) -> RequestResult<T> {
        let request_id = Uuid::new_v4().to_string();
        let mut builder = self
            .http
            .request(method.clone(), self.url(path))
            .headers(opts.headers);
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            builder = builder.header(HeaderName::from_static(REQUEST_ID_HEADER), value);
        }
        if !opts.query.is_empty() {
            builder = builder.query(&opts.query);
        }
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder = match opts.body {
            Some(RequestBody::Json(value)) => builder.json(&value),
            Some(RequestBody::Raw { content_type, bytes }) => builder.header(CONTENT_TYPE, content_type).body(bytes),
            None => builder,
        };

        let response = match builder.send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, %method, path, %request_id, "backend unreachable");
                return RequestResult::failure(FALLBACK_ERROR_MESSAGE);
            }
        };

        let status = response.status();
        let headers = response.headers().clone();
        let body = match response.bytes().await {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(error = %e, %method, path, %request_id, "failed reading backend response");
                return RequestResult::failure(FALLBACK_ERROR_MESSAGE);
            }
        };
        tracing::debug!(%method, path, status = status.as_u16(), %request_id, "backend call");

        if !status.is_success() {
            let message = message_field(&body).unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_owned());
            tracing::warn!(%method, path, status = status.as_u16(), %request_id, %message, "backend call failed");
            return RequestResult::Failure { message };
        }

        decode_success(&body, headers)
    }
}

/// `message` from a JSON object body.
fn message_field(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    message_text(&value)
}

/// A string `message`, or the string entries of an array `message` joined
/// with `; ` (validation errors arrive that way).
fn message_text(value: &Value) -> Option<String> {
    match value.get("message")? {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}

fn decode_success<T: DeserializeOwned>(body: &[u8], headers: HeaderMap) -> RequestResult<T> {
    let value: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        match serde_json::from_slice(body) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "backend returned a non-JSON success body");
                return RequestResult::failure(FALLBACK_ERROR_MESSAGE);
            }
        }
    };
    let message = message_text(&value);
    match serde_json::from_value::<T>(value) {
        Ok(data) => RequestResult::Success { data, message, headers },
        Err(e) => {
            tracing::warn!(error = %e, "backend response did not match the expected shape");
            RequestResult::failure(FALLBACK_ERROR_MESSAGE)
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
