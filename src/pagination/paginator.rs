//! Cursor-following walk over `newsfeed.search`

use super::types::{PacingConfig, PaginationState, SearchQuery, StopReason};
use crate::error::{Error, Result};
use crate::http::VkApi;
use crate::models::SearchBatch;
use crate::types::Lang;
use futures::Stream;
use tracing::{debug, warn};

/// VK method behind the search
pub const SEARCH_METHOD: &str = "newsfeed.search";

/// Run one `newsfeed.search` call
///
/// A response without items comes back as `SearchBatch::default()`, so a
/// token sent along with an empty page is dropped.
pub async fn fetch_search_batch<A>(
    api: &A,
    query: &SearchQuery,
    cursor: Option<&str>,
    lang: Lang,
) -> Result<SearchBatch>
where
    A: VkApi + ?Sized,
{
    let value = api.call(SEARCH_METHOD, query.to_params(cursor, lang)).await?;
    let batch: SearchBatch = serde_json::from_value(value)?;

    if batch.is_empty() {
        return Ok(SearchBatch::default());
    }
    Ok(batch)
}

/// Lazy sequence of non-empty search pages for one query
///
/// Each call to [`next_batch`](Self::next_batch) issues at most one request.
/// The first request starts from the query's `start_from`; later requests
/// substitute the `next_from` token of the previous page and wait
/// `page_delay` first. The walk ends on an empty page, a missing token, a
/// token that was already followed, the page ceiling, or the first error.
pub struct SearchPaginator<A> {
    api: A,
    query: SearchQuery,
    lang: Lang,
    pacing: PacingConfig,
    state: PaginationState,
}

impl<A: VkApi> SearchPaginator<A> {
    pub fn new(api: A, query: SearchQuery, lang: Lang) -> Self {
        let state = PaginationState::new(query.start_from.clone());
        Self {
            api,
            query,
            lang,
            pacing: PacingConfig::default(),
            state,
        }
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    pub fn is_done(&self) -> bool {
        self.state.is_done()
    }

    /// Fetch the next non-empty page, or `None` once the walk is over
    pub async fn next_batch(&mut self) -> Result<Option<SearchBatch>> {
        if self.state.is_done() {
            return Ok(None);
        }

        if let Some(max_pages) = self.pacing.max_pages {
            if self.state.pages >= max_pages {
                debug!(max_pages, "search page limit reached");
                self.state.mark_done(StopReason::PageLimit);
                return Ok(None);
            }
        }

        if self.state.calls > 0 && !self.pacing.page_delay.is_zero() {
            tokio::time::sleep(self.pacing.page_delay).await;
        }

        self.state.calls += 1;
        let batch = match fetch_search_batch(
            &self.api,
            &self.query,
            self.state.cursor.as_deref(),
            self.lang,
        )
        .await
        {
            Ok(batch) => batch,
            Err(e) => {
                self.state.mark_done(StopReason::Error);
                return Err(e);
            }
        };

        if batch.is_empty() {
            debug!(calls = self.state.calls, "search returned no items");
            self.state.mark_done(StopReason::EmptyPage);
            return Ok(None);
        }

        self.state.add_page(batch.items.len());
        debug!(
            page = self.state.pages,
            items = batch.items.len(),
            next_from = batch.continuation().unwrap_or(""),
            "search page fetched"
        );

        match batch.continuation() {
            Some(token) => {
                if !self.state.advance(token) {
                    warn!(
                        token,
                        page = self.state.pages,
                        "search returned an already followed token, stopping"
                    );
                    self.state.mark_done(StopReason::RepeatedToken);
                }
            }
            None => self.state.mark_done(StopReason::NoToken),
        }

        Ok(Some(batch))
    }

    /// Drive the paginator as a stream; dropping it stops further requests
    pub fn into_stream(self) -> impl Stream<Item = Result<SearchBatch>> {
        futures::stream::try_unfold(self, |mut paginator| async move {
            let next = paginator.next_batch().await?;
            Ok::<_, Error>(next.map(|batch| (batch, paginator)))
        })
    }

    /// Collect every remaining page
    pub async fn collect_all(mut self) -> Result<Vec<SearchBatch>> {
        let mut batches = Vec::new();
        while let Some(batch) = self.next_batch().await? {
            batches.push(batch);
        }
        Ok(batches)
    }
}

impl<A> std::fmt::Debug for SearchPaginator<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchPaginator")
            .field("query", &self.query)
            .field("lang", &self.lang)
            .field("pacing", &self.pacing)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
