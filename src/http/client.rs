//! HTTP transport for the VK API
//!
//! Every VK method lives at `<base_url>/<method>` and answers with a JSON
//! envelope: `{"response": ...}` on success or `{"error": {...}}` on failure,
//! usually with HTTP 200 in both cases. The client:
//! - attaches the access token, API version and language to every call
//! - waits on the rate limiter before sending
//! - unwraps the envelope and maps VK errors to [`Error::Api`]
//!
//! There is no retry: a failed call is returned to the caller as is.

use super::params::Params;
use super::rate_limit::RateLimiter;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::JsonValue;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// A remote procedure interface onto the VK API
///
/// The wrappers and the search paginator only ever talk to this trait, so
/// tests can substitute scripted responses for the network.
#[async_trait]
pub trait VkApi: Send + Sync {
    /// Invoke `method` with `params` and return the unwrapped `response` value
    async fn call(&self, method: &str, params: Params) -> Result<JsonValue>;
}

#[async_trait]
impl<T: VkApi + ?Sized> VkApi for &T {
    async fn call(&self, method: &str, params: Params) -> Result<JsonValue> {
        (**self).call(method, params).await
    }
}

#[async_trait]
impl<T: VkApi + ?Sized> VkApi for std::sync::Arc<T> {
    async fn call(&self, method: &str, params: Params) -> Result<JsonValue> {
        (**self).call(method, params).await
    }
}

/// Envelope VK wraps every answer in
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    response: Option<JsonValue>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error_code: i64,
    #[serde(default)]
    error_msg: String,
}

/// HTTP client bound to one token, API version and language
pub struct HttpClient {
    client: Client,
    config: ClientConfig,
    base_url: Url,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        // A trailing slash makes `join` append the method instead of replacing the last segment
        let base_url = Url::parse(&format!("{}/", config.base_url.trim_end_matches('/')))?;
        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            base_url,
            rate_limiter,
        })
    }

    /// Get the configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Full endpoint URL for a method name
    pub fn method_url(&self, method: &str) -> Result<Url> {
        Ok(self.base_url.join(method.trim_start_matches('/'))?)
    }

    async fn send(&self, method: &str, params: &Params) -> Result<JsonValue> {
        let url = self.method_url(method)?;

        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let mut query: Vec<(&str, &str)> = params.iter().collect();
        query.push(("access_token", self.config.access_token.as_str()));
        query.push(("v", self.config.api_version.as_str()));
        if !params.contains("lang") {
            query.push(("lang", self.config.lang.as_str()));
        }

        debug!(method, params = params.len(), "calling VK API");
        let response = self
            .client
            .get(url)
            .query(&query)
            .send()
            .await
            .map_err(redact)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        let body = response.text().await.map_err(redact)?;
        unwrap_envelope(method, &body)
    }
}

/// Drop the request URL from a transport error; its query carries the access token
fn redact(error: reqwest::Error) -> Error {
    Error::Http(error.without_url())
}

#[async_trait]
impl VkApi for HttpClient {
    async fn call(&self, method: &str, params: Params) -> Result<JsonValue> {
        self.send(method, &params).await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Turn a raw response body into the `response` value or a typed error
fn unwrap_envelope(method: &str, body: &str) -> Result<JsonValue> {
    let envelope: Envelope = serde_json::from_str(body)?;

    if let Some(error) = envelope.error {
        return Err(Error::api(error.error_code, error.error_msg));
    }

    envelope.response.ok_or_else(|| Error::MissingResponse {
        method: method.to_string(),
    })
}
