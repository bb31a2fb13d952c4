//! Error types for vk-harvest
//!
//! Transport failures, VK error envelopes and configuration problems all end
//! up in one [`Error`]; VK's numeric codes stay available through
//! [`Error::api_code`].

use thiserror::Error;

/// The main error type for vk-harvest
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // VK API Errors
    // ============================================================================
    #[error("VK API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("Response to '{method}' has neither 'response' nor 'error'")]
    MissingResponse { method: String },

    #[error("{kind} '{id}' not found")]
    NotFound { kind: String, id: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a VK API error
    pub fn api(code: i64, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
        }
    }

    /// Create a not-found error for a singular lookup
    pub fn not_found(kind: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            kind: kind.into(),
            id: id.to_string(),
        }
    }

    /// Check if this error came from the remote side rather than the transport
    pub fn is_api_error(&self) -> bool {
        matches!(self, Error::Api { .. } | Error::NotFound { .. })
    }

    /// VK error code, if VK answered with an error envelope
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Error::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Code 5: the access token was rejected
    pub fn is_auth_failure(&self) -> bool {
        self.api_code() == Some(5)
    }

    /// Code 6: more calls per second than the token allows
    pub fn is_too_many_requests(&self) -> bool {
        self.api_code() == Some(6)
    }

    /// Private profiles, closed communities and other permission refusals
    pub fn is_access_denied(&self) -> bool {
        matches!(self.api_code(), Some(15 | 18 | 30 | 203))
    }
}

/// Result type alias for vk-harvest
pub type Result<T> = std::result::Result<T, Error>;
