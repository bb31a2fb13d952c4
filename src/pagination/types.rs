//! Pagination types
//!
//! The search query, the pacing policy and the state the paginator carries
//! from one page to the next.

use crate::http::Params;
use crate::types::Lang;
use std::collections::HashSet;
use std::time::Duration;

/// Parameters of one `newsfeed.search` session
///
/// The query is never mutated while paginating; the live continuation
/// token is held in [`PaginationState`] and substituted for `start_from`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Search text
    pub query: String,
    /// Ask for `profiles` and `groups` side lists
    pub extended: bool,
    pub offset: Option<u32>,
    /// Page size, VK caps it at 200
    pub count: u32,
    /// Lower bound on the post id
    pub start_id: Option<i64>,
    /// Continuation token to start from
    pub start_from: Option<String>,
    /// Unix time window
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    /// Profile/group fields to return with `extended`
    pub fields: Vec<String>,
}

impl SearchQuery {
    /// Default page size
    pub const DEFAULT_COUNT: u32 = 200;

    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            extended: true,
            offset: None,
            count: Self::DEFAULT_COUNT,
            start_id: None,
            start_from: None,
            start_time: None,
            end_time: None,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn extended(mut self, extended: bool) -> Self {
        self.extended = extended;
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    #[must_use]
    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    #[must_use]
    pub fn start_id(mut self, start_id: i64) -> Self {
        self.start_id = Some(start_id);
        self
    }

    #[must_use]
    pub fn start_from(mut self, token: impl Into<String>) -> Self {
        self.start_from = Some(token.into());
        self
    }

    /// Restrict results to `[start, end]` (unix seconds)
    #[must_use]
    pub fn time_window(mut self, start: Option<i64>, end: Option<i64>) -> Self {
        self.start_time = start;
        self.end_time = end;
        self
    }

    #[must_use]
    pub fn fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Request parameters with `cursor` in place of `start_from`
    pub fn to_params(&self, cursor: Option<&str>, lang: Lang) -> Params {
        Params::new()
            .set("q", &self.query)
            .flag("extended", self.extended)
            .set_opt("offset", self.offset)
            .set("count", self.count)
            .set_opt("start_id", self.start_id)
            .set_opt("start_from", cursor)
            .set_opt("start_time", self.start_time)
            .set_opt("end_time", self.end_time)
            .list("fields", &self.fields)
            .set("lang", lang)
    }
}

/// How fast and how far the paginator walks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacingConfig {
    /// Pause before every request after the first
    pub page_delay: Duration,
    /// Stop after this many non-empty pages
    pub max_pages: Option<u32>,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            page_delay: Duration::from_millis(500),
            max_pages: None,
        }
    }
}

impl PacingConfig {
    /// No delay between pages
    pub fn immediate() -> Self {
        Self {
            page_delay: Duration::ZERO,
            max_pages: None,
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }
}

/// Why pagination ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A response carried no items
    EmptyPage,
    /// The last page had no continuation token
    NoToken,
    /// The server handed back a token that was already followed
    RepeatedToken,
    /// `max_pages` pages were yielded
    PageLimit,
    /// A call failed
    Error,
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Token for the next request
    pub cursor: Option<String>,
    /// Non-empty pages yielded so far
    pub pages: u32,
    /// Requests issued so far
    pub calls: u32,
    /// Items yielded so far
    pub total_fetched: u64,
    /// Set once the sequence has ended
    pub stop_reason: Option<StopReason>,
    seen_tokens: HashSet<String>,
}

impl PaginationState {
    /// Create a state starting at `cursor`
    pub fn new(cursor: Option<String>) -> Self {
        let mut state = Self::default();
        if let Some(token) = cursor.filter(|t| !t.is_empty()) {
            state.seen_tokens.insert(token.clone());
            state.cursor = Some(token);
        }
        state
    }

    pub fn is_done(&self) -> bool {
        self.stop_reason.is_some()
    }

    pub fn mark_done(&mut self, reason: StopReason) {
        self.stop_reason = Some(reason);
    }

    /// Count a yielded page
    pub fn add_page(&mut self, items: usize) {
        self.pages += 1;
        self.total_fetched += items as u64;
    }

    /// Adopt the next token; false if it was already followed
    pub fn advance(&mut self, token: &str) -> bool {
        if !self.seen_tokens.insert(token.to_string()) {
            return false;
        }
        self.cursor = Some(token.to_string());
        true
    }
}
