//! Client configuration
//!
//! Everything the client needs to talk to VK: the access token, the API
//! version, the localization language, transport settings and search pacing.
//! Values come from code through the builder or from the environment.

use crate::error::{Error, Result};
use crate::http::RateLimiterConfig;
use crate::pagination::PacingConfig;
use crate::types::Lang;
use std::time::Duration;

/// Default API endpoint prefix
pub const DEFAULT_BASE_URL: &str = "https://api.vk.com/method";

/// API version the wrappers are written against
pub const DEFAULT_API_VERSION: &str = "5.131";

/// Environment variable holding the access token
pub const TOKEN_ENV: &str = "service_key";

/// Alternative, conventionally named token variable
pub const TOKEN_ENV_ALIAS: &str = "VK_SERVICE_KEY";

/// Configuration for [`crate::http::HttpClient`] and [`crate::api::VkClient`]
#[derive(Clone)]
pub struct ClientConfig {
    /// Access token (service key or user token)
    pub access_token: String,
    /// Value of the `v` parameter
    pub api_version: String,
    /// Value of the `lang` parameter
    pub lang: Lang,
    /// Endpoint prefix, `<base_url>/<method>`
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Token bucket in front of every call
    pub rate_limit: Option<RateLimiterConfig>,
    /// Delay and ceiling for newsfeed search pagination
    pub pacing: PacingConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
            lang: Lang::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("vk-harvest/{}", env!("CARGO_PKG_VERSION")),
            rate_limit: Some(RateLimiterConfig::default()),
            pacing: PacingConfig::default(),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("access_token", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("lang", &self.lang)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("rate_limit", &self.rate_limit)
            .field("pacing", &self.pacing)
            .finish()
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder(access_token: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self {
                access_token: access_token.into(),
                ..Self::default()
            },
        }
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    ///
    /// Recognized keys: `service_key` (or `VK_SERVICE_KEY`), `VK_API_VERSION`,
    /// `VK_LANG`, `VK_API_BASE_URL`, `VK_PAGE_DELAY_MS`, `VK_MAX_PAGES`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let access_token = get(TOKEN_ENV)
            .or_else(|| get(TOKEN_ENV_ALIAS))
            .ok_or_else(|| Error::missing_field(TOKEN_ENV))?;

        // Both variables hold an application service key, which VK allows 20 calls/s
        let mut config = Self {
            access_token,
            rate_limit: Some(RateLimiterConfig::service_key()),
            ..Self::default()
        };

        if let Some(version) = get("VK_API_VERSION") {
            config.api_version = version;
        }
        if let Some(lang) = get("VK_LANG") {
            config.lang = lang
                .parse()
                .map_err(|e: String| Error::invalid_value("VK_LANG", e))?;
        }
        if let Some(base_url) = get("VK_API_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(delay) = get("VK_PAGE_DELAY_MS") {
            let ms: u64 = delay
                .trim()
                .parse()
                .map_err(|_| Error::invalid_value("VK_PAGE_DELAY_MS", "expected milliseconds"))?;
            config.pacing.page_delay = Duration::from_millis(ms);
        }
        if let Some(max_pages) = get("VK_MAX_PAGES") {
            let pages: u32 = max_pages
                .trim()
                .parse()
                .map_err(|_| Error::invalid_value("VK_MAX_PAGES", "expected a page count"))?;
            config.pacing.max_pages = Some(pages);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the values that cannot be caught by the type system
    pub fn validate(&self) -> Result<()> {
        if self.access_token.trim().is_empty() {
            return Err(Error::missing_field(TOKEN_ENV));
        }
        if self.api_version.trim().is_empty() {
            return Err(Error::invalid_value("api_version", "must not be empty"));
        }
        url::Url::parse(&self.base_url)?;
        Ok(())
    }
}

/// Builder for [`ClientConfig`]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the API version
    #[must_use]
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.config.api_version = version.into();
        self
    }

    /// Set the localization language
    #[must_use]
    pub fn lang(mut self, lang: Lang) -> Self {
        self.config.lang = lang;
        self
    }

    /// Set the endpoint prefix
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set rate limiter
    #[must_use]
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    #[must_use]
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Set search pacing
    #[must_use]
    pub fn pacing(mut self, pacing: PacingConfig) -> Self {
        self.config.pacing = pacing;
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
