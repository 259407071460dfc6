//! Thin request wrapper used by every domain `api` module.
//!
//! Request side: bearer token, `X-Request-ID`, JSON content type, `_t`
//! cache buster on GET, per-endpoint timeouts. Response side: unwraps the
//! backend `{code, message, data}` envelope and maps failures to `ApiError`.

use super::error::ApiError;
use crate::shared::api_utils::{api_base, join_url};
use crate::shared::config::{SpecialTimeout, DEFAULT_TIMEOUT_MS, DOWNLOAD_TIMEOUT_MS};
use crate::shared::token_storage;
use gloo_net::http::{Method, RequestBuilder};
use leptos::logging::log;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::cell::Cell;
use std::rc::Rc;

/// Per-call knobs
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestOptions {
    /// Overrides the default timeout with a long-running profile
    pub special_timeout: Option<SpecialTimeout>,
    /// Explicit timeout in milliseconds; wins over `special_timeout`
    pub timeout_ms: Option<u32>,
    /// Skip the `_t` cache buster on GET
    pub allow_cache: bool,
}

impl RequestOptions {
    pub fn special(timeout: SpecialTimeout) -> Self {
        Self {
            special_timeout: Some(timeout),
            ..Default::default()
        }
    }

    pub fn download() -> Self {
        Self {
            timeout_ms: Some(DOWNLOAD_TIMEOUT_MS),
            ..Default::default()
        }
    }

    pub fn resolve_timeout(&self) -> u32 {
        self.timeout_ms
            .or_else(|| self.special_timeout.map(|t| t.millis()))
            .unwrap_or(DEFAULT_TIMEOUT_MS)
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    origin: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            origin: api_base(),
        }
    }

    pub fn with_origin(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        join_url(&self.origin, path)
    }

    pub async fn get<T, Q>(&self, path: &str, query: &Q, opts: RequestOptions) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize,
    {
        let query = serde_qs::to_string(query).map_err(|e| ApiError::Serialize(e.to_string()))?;
        let cache_buster = if opts.allow_cache {
            None
        } else {
            Some(js_sys::Date::now() as i64)
        };
        let url = with_query(&self.url(path), &query, cache_buster);
        self.send(Method::GET, &url, None, opts).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B, opts: RequestOptions) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialize(e.to_string()))?;
        self.send(Method::POST, &self.url(path), Some(body), opts).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B, opts: RequestOptions) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialize(e.to_string()))?;
        self.send(Method::PUT, &self.url(path), Some(body), opts).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B, opts: RequestOptions) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialize(e.to_string()))?;
        self.send(Method::PATCH, &self.url(path), Some(body), opts).await
    }

    pub async fn delete<T>(&self, path: &str, opts: RequestOptions) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.send(Method::DELETE, &self.url(path), None, opts).await
    }

    async fn send<T>(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
        opts: RequestOptions,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let request_id = generate_request_id(js_sys::Date::now() as i64, &uuid::Uuid::new_v4());
        log!("→ {:?} {} [{}]", method, url, request_id);

        let controller = web_sys::AbortController::new()
            .map_err(|e| ApiError::Network(format!("{:?}", e)))?;
        let signal = controller.signal();

        let mut builder = RequestBuilder::new(url)
            .method(method)
            .header("Content-Type", "application/json")
            .header("X-Requested-With", "XMLHttpRequest")
            .header("X-Request-ID", &request_id)
            .abort_signal(Some(&signal));
        if let Some(token) = token_storage::get_access_token() {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Serialize(e.to_string()))?;

        // Aborts the fetch once the timeout elapses; dropping the handle cancels it.
        let timed_out = Rc::new(Cell::new(false));
        let timed_out_flag = timed_out.clone();
        let _timeout = gloo_timers::callback::Timeout::new(opts.resolve_timeout(), move || {
            timed_out_flag.set(true);
            controller.abort();
        });

        let response = match request.send().await {
            Ok(response) => response,
            Err(_) if timed_out.get() => {
                log!("✗ {} timed out", url);
                return Err(ApiError::Timeout);
            }
            Err(e) => {
                log!("✗ {} network error: {}", url, e);
                return Err(ApiError::Network(e.to_string()));
            }
        };

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        log!("← {} {}", status, url);
        let json = decode_body(status, &text)?;

        if !(200..300).contains(&status) {
            let err = ApiError::from_status(status, &json);
            if err == ApiError::Unauthorized {
                token_storage::clear_access_token();
            }
            return Err(err);
        }

        serde_json::from_value(unwrap_envelope(json)).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

/// `req_<millis>_<9 chars>` used to correlate client and server logs.
pub fn generate_request_id(now_ms: i64, id: &uuid::Uuid) -> String {
    let simple = id.simple().to_string();
    format!("req_{}_{}", now_ms, &simple[..9])
}

/// Appends the serialized query and an optional `_t` cache buster.
pub fn with_query(url: &str, query: &str, cache_buster: Option<i64>) -> String {
    let mut parts: Vec<String> = Vec::new();
    if !query.is_empty() {
        parts.push(query.to_string());
    }
    if let Some(ts) = cache_buster {
        parts.push(format!("_t={}", ts));
    }
    if parts.is_empty() {
        return url.to_string();
    }
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, sep, parts.join("&"))
}

/// Parses a response body. Error statuses tolerate non-JSON bodies (proxy
/// error pages) and map them to `Null`; a 2xx body must be valid JSON.
pub fn decode_body(status: u16, text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    match serde_json::from_str(text) {
        Ok(json) => Ok(json),
        Err(_) if !(200..300).contains(&status) => Ok(Value::Null),
        Err(e) => Err(ApiError::Parse(e.to_string())),
    }
}

/// Strips the `{code, message, data}` envelope when the body has one.
pub fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("data") && map.contains_key("code") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}
