//! HTTP transport module
//!
//! Provides the VK API transport: an HTTP client that signs every call with
//! the access token, version and language, paces calls through a token
//! bucket, and unwraps VK's response envelope.
//!
//! # Features
//!
//! - **RPC-style calls**: `call("users.get", params)` → `response` value
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Pluggable**: everything above the transport depends on [`VkApi`]

mod client;
mod params;
mod rate_limit;

pub use client::{HttpClient, VkApi};
pub use params::Params;
pub use rate_limit::{RateLimiter, RateLimiterConfig};
