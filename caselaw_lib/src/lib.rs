//! Extraction layer for NSW CaseLaw: results page parsing, paced search
//! paging, and decision page scraping for both site layouts.
//!
//! Builds on the `caselaw_api` crate, which owns the HTTP client, the court
//! directory and the record types.

pub mod config;
pub mod courts;
pub mod decision;
pub mod error;
pub mod html;
pub mod pager;
pub mod scrape;
pub mod uris;
pub mod validation;

pub use caselaw_api;
pub use caselaw_api::types;
pub use caselaw_api::{Client, Fetch, FetchResponse, QueryParams, SearchQuery, TextField};

pub use config::CrawlConfig;
pub use courts::{parse_court_directory, refresh_court_directory, CourtDirectory, DirectoryEntry};
pub use decision::{
    scrape_decision, DecisionFetcher, ExtractError, Extractor, Layout, ScrapeContext, ScrapeReport,
    ScrapeWarning, COVERAGE_WARNING,
};
pub use error::CaseLawError;
pub use pager::{page_count, SearchPager, PAGE_SIZE};
pub use scrape::{parse_results_page, ResultsPage, RowSkip, ScrapeError};
