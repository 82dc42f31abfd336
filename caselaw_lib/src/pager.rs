//! Sequential, rate-limited traversal of every results page of one search.

use std::collections::VecDeque;
use std::time::Duration;

use caselaw_api::types::DecisionRecord;
use caselaw_api::{Fetch, QueryParams, SearchQuery, SEARCH_PATH};

use crate::config::require_delay;
use crate::scrape::{parse_results_page, ScrapeError};

/// Results per page. Fixed by the site.
pub const PAGE_SIZE: u64 = 20;

/// Number of pages needed to show `total` results.
pub fn page_count(total: u64) -> u64 {
    total.div_ceil(PAGE_SIZE)
}

/// Lazily yields every result of a search.
///
/// Page 0 is fetched on the first call to [`SearchPager::next`]. Each later
/// page is fetched only once the previous page's records have been handed
/// out, after sleeping the page delay. A non-200 page ends the run with
/// [`ScrapeError::Remote`]; after any error the pager yields nothing more.
pub struct SearchPager<'a, F: Fetch> {
    fetcher: &'a F,
    params: QueryParams,
    delay: Duration,
    next_page: u64,
    page_count: u64,
    total: Option<u64>,
    buffer: VecDeque<DecisionRecord>,
    done: bool,
}

impl<'a, F: Fetch> SearchPager<'a, F> {
    /// Builds the query parameters once. Fails on an out-of-range ordinal or
    /// a zero delay.
    pub fn new(fetcher: &'a F, query: &SearchQuery, delay: Duration) -> Result<Self, ScrapeError> {
        let delay = require_delay("page delay", delay)?;
        let params = query.build()?;
        Ok(Self {
            fetcher,
            params,
            delay,
            next_page: 0,
            page_count: 1,
            total: None,
            buffer: VecDeque::new(),
            done: false,
        })
    }

    /// Total matches, known once the first page has been parsed.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Next record, `Ok(None)` once the search is exhausted.
    pub async fn next(&mut self) -> Result<Option<DecisionRecord>, ScrapeError> {
        loop {
            if let Some(record) = self.buffer.pop_front() {
                return Ok(Some(record));
            }
            if self.done {
                return Ok(None);
            }
            if let Err(e) = self.fetch_next_page().await {
                self.done = true;
                return Err(e);
            }
        }
    }

    /// Drains the pager.
    pub async fn collect_all(mut self) -> Result<Vec<DecisionRecord>, ScrapeError> {
        let mut records = Vec::new();
        while let Some(record) = self.next().await? {
            records.push(record);
        }
        Ok(records)
    }

    async fn fetch_next_page(&mut self) -> Result<(), ScrapeError> {
        let page = self.next_page;
        if page > 0 {
            tokio::time::sleep(self.delay).await;
            self.params.set_page(page as u32);
        }
        tracing::info!("Fetching results page {} of {}", page + 1, self.page_count);
        let resp = self.fetcher.fetch(SEARCH_PATH, Some(&self.params)).await?;
        if !resp.is_ok() {
            tracing::error!("Results page {} returned status {}", page, resp.status);
            return Err(ScrapeError::Remote {
                status: resp.status,
            });
        }
        let parsed = parse_results_page(&resp.body)?;

        if page == 0 {
            self.total = Some(parsed.total);
            if parsed.total == 0 {
                tracing::warn!("Search returned no results");
                self.done = true;
                return Ok(());
            }
            self.page_count = page_count(parsed.total);
            tracing::info!(
                "{} results across {} pages",
                parsed.total,
                self.page_count
            );
        }

        self.buffer.extend(parsed.records);
        self.next_page += 1;
        if self.next_page >= self.page_count {
            self.done = true;
        }
        Ok(())
    }
}
