// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! # vk-harvest
//!
//! A small client for the VK API: typed wrappers over the calls used to
//! collect users, communities, walls, comments and likes, a
//! cursor-following paginator for newsfeed search, and media URL extraction
//! for post attachments.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vk_harvest::{ClientConfig, SearchQuery, VkClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = VkClient::from_config(ClientConfig::from_env()?)?;
//!
//!     let mut pages = client.iter_search(SearchQuery::new("POLARNET").count(20));
//!     while let Some(batch) = pages.next_batch().await? {
//!         for post in &batch.items {
//!             let media = post.media()?;
//!             println!("{} {:?}", post.id, media.photos);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  VkClient (api)                          │
//! │ users · groups · boards · walls · likes · newsfeed       │
//! └──────────────┬───────────────────────────┬───────────────┘
//!                │                           │
//! ┌──────────────┴────────────┐   ┌──────────┴───────────────┐
//! │ SearchPaginator           │   │ extract_media (media)    │
//! │ next_from → start_from    │   │ photo/video/audio/link/doc│
//! └──────────────┬────────────┘   └──────────────────────────┘
//!                │
//! ┌──────────────┴───────────────────────────────────────────┐
//! │ VkApi → HttpClient (http): token, version, lang,         │
//! │ rate limit, response envelope                            │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// HTTP transport with rate limiting
pub mod http;

/// Newsfeed search pagination
pub mod pagination;

/// Attachment classification
pub mod media;

/// Search result records
pub mod models;

/// VK API wrappers
pub mod api;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod test_support;

// ============================================================================
// Re-exports
// ============================================================================

pub use api::VkClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use models::{Post, PostRecord, SearchBatch};
pub use pagination::{PacingConfig, SearchPaginator, SearchQuery};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
