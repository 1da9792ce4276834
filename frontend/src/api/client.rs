use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::rc::Rc;

use crate::{
    api::types::ApiError,
    config,
    state::session::{Session, SESSION_STORAGE_KEY},
    utils::storage::{BrowserStorage, KeyValueStore},
};

/// Method, extra headers and JSON body for a single call.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self {
            method: Method::POST,
            ..Self::default()
        }
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::default()
        }
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::unknown(format!("Failed to encode request: {}", e)))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Successful body of an authenticated call.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    /// 204: the body was never read.
    NoContent,
}

impl ResponseBody {
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            ResponseBody::Json(value) => decode(value),
            ResponseBody::NoContent => Err(ApiError::invalid_response(
                "Expected a response body but the server sent none",
            )),
        }
    }
}

pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Statuses that mean the bearer token is missing, invalid or insufficient.
pub fn is_authorization_failure(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

pub const NETWORK_ERROR_MESSAGE: &str = "Unable to reach the server";

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    storage: Rc<dyn KeyValueStore>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            storage: Rc::new(BrowserStorage),
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::new()
        }
    }

    pub fn with_storage(mut self, storage: Rc<dyn KeyValueStore>) -> Self {
        self.storage = storage;
        self
    }

    pub fn storage(&self) -> Rc<dyn KeyValueStore> {
        Rc::clone(&self.storage)
    }

    async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    /// Request without credentials. Non-2xx responses become an `ApiError`
    /// carrying the server's `detail` message.
    pub async fn call_unauthenticated(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        let raw = self.send(path, options, None).await?;
        interpret_unauthenticated(raw)
    }

    /// Request with `Authorization: Bearer <access_token>`.
    ///
    /// On 401/403 the persisted session is removed, `on_unauthorized` runs and
    /// `Ok(None)` is returned: the caller should stop without showing an error.
    /// A 204 yields [`ResponseBody::NoContent`] without touching the body.
    pub async fn call_authenticated(
        &self,
        session: &Session,
        path: &str,
        options: RequestOptions,
        on_unauthorized: Option<&dyn Fn()>,
    ) -> Result<Option<ResponseBody>, ApiError> {
        let raw = self
            .send(path, options, Some(session.access_token.as_str()))
            .await?;
        if is_authorization_failure(raw.status) {
            log::warn!("{} rejected credentials ({}), clearing session", path, raw.status);
            self.clear_persisted_session();
            if let Some(callback) = on_unauthorized {
                callback();
            }
            return Ok(None);
        }
        interpret_authenticated(raw).map(Some)
    }

    fn clear_persisted_session(&self) {
        if let Err(err) = self.storage.remove_item(SESSION_STORAGE_KEY) {
            log::warn!("failed to clear persisted session: {}", err);
        }
    }

    async fn send(
        &self,
        path: &str,
        options: RequestOptions,
        bearer: Option<&str>,
    ) -> Result<RawResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = format!("{}{}", base_url, path);
        let headers = build_headers(bearer, &options.headers)?;
        let method = options.method.clone();

        let mut builder = self.client.request(method.clone(), &url).headers(headers);
        if let Some(body) = &options.body {
            let bytes = serde_json::to_vec(body)
                .map_err(|e| ApiError::unknown(format!("Failed to encode request: {}", e)))?;
            builder = builder.body(bytes);
        }
        let request = builder
            .build()
            .map_err(|e| ApiError::request_failed(format!("Invalid request: {}", e)))?;

        log::debug!("{} {}", method, path);

        #[cfg(all(test, not(target_arch = "wasm32")))]
        {
            if let Some(responder) = find_mock(&url) {
                let mock = responder.respond(&request)?;
                if let Some(delay_ms) = mock.delay_ms {
                    tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
                }
                return Ok(RawResponse {
                    status: StatusCode::from_u16(mock.status)
                        .map_err(|e| ApiError::unknown(e.to_string()))?,
                    body: mock.body.unwrap_or_default(),
                });
            }
        }

        let response = self.client.execute(request).await.map_err(|e| {
            log::warn!("{} {} failed: {}", method, path, e);
            ApiError {
                details: Some(Value::String(e.to_string())),
                ..ApiError::request_failed(NETWORK_ERROR_MESSAGE)
            }
        })?;
        let status = response.status();
        let body = if status == StatusCode::NO_CONTENT {
            String::new()
        } else {
            response.text().await.map_err(|e| {
                ApiError::request_failed(format!("Failed to read response: {}", e))
            })?
        };
        Ok(RawResponse { status, body })
    }
}

fn build_headers(bearer: Option<&str>, extra: &[(String, String)]) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(token) = bearer {
        headers.insert(
            AUTHORIZATION,
            format!("Bearer {}", token)
                .parse()
                .map_err(|_| ApiError::unknown("Invalid token format"))?,
        );
    }
    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ApiError::unknown(format!("Invalid header name: {}", name)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| ApiError::unknown(format!("Invalid header value for {}", name)))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

fn parse_body(raw: &str) -> Option<Value> {
    serde_json::from_str(raw).ok()
}

fn interpret_unauthenticated(raw: RawResponse) -> Result<Value, ApiError> {
    if !raw.status.is_success() {
        return Err(ApiError::http(raw.status.as_u16(), parse_body(&raw.body)));
    }
    serde_json::from_str(&raw.body)
        .map_err(|e| ApiError::invalid_response(format!("Failed to parse response: {}", e)))
}

fn interpret_authenticated(raw: RawResponse) -> Result<ResponseBody, ApiError> {
    if raw.status == StatusCode::NO_CONTENT {
        return Ok(ResponseBody::NoContent);
    }
    interpret_unauthenticated(raw).map(ResponseBody::Json)
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::invalid_response(format!("Failed to parse response: {}", e)))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
pub use mock_hooks::{register_mock, MockResponse, TestResponder};
#[cfg(all(test, not(target_arch = "wasm32")))]
use mock_hooks::find_mock;
