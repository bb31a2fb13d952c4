//! Pagination module
//!
//! Walks `newsfeed.search` by following the `next_from` continuation token.
//!
//! # Overview
//!
//! VK hands back an opaque `next_from` token with each page of search
//! results. [`SearchPaginator`] feeds that token into the next request as
//! `start_from`, keeps every other parameter fixed, waits a configurable
//! delay between requests and stops when a page is empty or the token runs
//! out. It also stops on a token it has already followed and, optionally,
//! after a fixed number of pages, so a misbehaving server cannot keep it
//! looping.

mod paginator;
mod types;

pub use paginator::{fetch_search_batch, SearchPaginator, SEARCH_METHOD};
pub use types::{PacingConfig, PaginationState, SearchQuery, StopReason};

#[cfg(test)]
mod tests;
