//! Shared HTTP client with default headers, timeout and error interception.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::error::{ApiError, Result};

use super::observer::{ErrorObserver, TracingObserver};
use super::types::ApiResponse;

/// HTTP client for the user-management API.
///
/// Cheap to clone; clones share the connection pool and the observer.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    timeout: std::time::Duration,
    observer: Arc<dyn ErrorObserver>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("observer", &self.observer)
            .finish()
    }
}

/// Headers attached to every request.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

impl ApiClient {
    /// Create a client that logs failures through `tracing`.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_observer(config, Arc::new(TracingObserver))
    }

    /// Create a client that reports failures to `observer`.
    pub fn with_observer(config: &Config, observer: Arc<dyn ErrorObserver>) -> Result<Self> {
        let base_url = validate_base_url(config.base_url())?;
        let timeout = config.timeout();

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(default_headers())
            .user_agent(format!("user-api-client/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Client)?;

        debug!(base_url = %base_url, timeout_ms = config.api_timeout_ms, "Created API client");

        Ok(Self {
            http,
            base_url,
            timeout,
            observer,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the request timeout.
    pub fn timeout(&self) -> std::time::Duration {
        self.timeout
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Issue a GET request.
    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.execute(Method::GET, path, None).await
    }

    /// Issue a POST request with a JSON body.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse> {
        let body = match serde_json::to_value(body) {
            Ok(body) => body,
            Err(e) => return self.intercept(&Method::POST, &self.url(path), Err(e.into())),
        };
        self.execute(Method::POST, path, Some(body)).await
    }

    /// Issue a DELETE request.
    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.execute(Method::DELETE, path, None).await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse> {
        let url = self.url(path);
        debug!(method = %method, url = %url, "Sending request");

        let mut request = self.http.request(method.clone(), &url);
        if let Some(body) = &body {
            request = request.json(body);
        }

        let outcome = dispatch(request).await;
        self.intercept(&method, &url, outcome)
    }

    /// Single interception point: failures are reported, then forwarded unchanged.
    fn intercept(
        &self,
        method: &Method,
        url: &str,
        outcome: Result<ApiResponse>,
    ) -> Result<ApiResponse> {
        if let Err(err) = &outcome {
            self.observer.on_error(method.as_str(), url, err);
        }
        outcome
    }
}

async fn dispatch(request: RequestBuilder) -> Result<ApiResponse> {
    let response = request.send().await.map_err(ApiError::Transport)?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.map_err(body_error)?;
        return Err(ApiError::from_status(status, body));
    }

    let bytes = response.bytes().await.map_err(body_error)?;
    let data = if bytes.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok(ApiResponse {
        status: status.as_u16(),
        data,
    })
}

/// A body that stalls past the client timeout is a transport failure, not a decode one.
fn body_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Transport(e)
    } else {
        ApiError::Decode(e)
    }
}

/// Check that `raw` is an absolute http(s) URL; returns it without a trailing slash.
fn validate_base_url(raw: &str) -> Result<String> {
    let parsed = Url::parse(raw).map_err(|e| ApiError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn client_uses_configured_base_url_and_timeout() {
        let client = ApiClient::new(&Config::default()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.timeout(), std::time::Duration::from_millis(10_000));
    }

    #[test]
    fn url_joins_paths_under_base() {
        let config = Config::default().with_api_url("http://example.test:8080/prefix/");
        let client = ApiClient::new(&config).unwrap();

        assert_eq!(client.url("/api/users"), "http://example.test:8080/prefix/api/users");
        assert_eq!(client.url("api/health"), "http://example.test:8080/prefix/api/health");
    }

    #[test]
    fn relative_base_url_is_rejected() {
        let config = Config::default().with_api_url("localhost:5000/api");
        let err = ApiClient::new(&config).unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let config = Config::default().with_api_url("ftp://files.example.test");
        let err = ApiClient::new(&config).unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn default_headers_declare_json() {
        let headers = default_headers();
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[ACCEPT], "application/json");
    }
}
