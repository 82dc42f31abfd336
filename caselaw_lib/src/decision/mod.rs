//! Scraping a decision's own page into [`DecisionDetails`].
//!
//! The site serves decisions in two layouts. [`Layout::detect`] picks one
//! from the document structure and the matching [`Extractor`] does the rest.

mod context;
mod fields;
mod new_layout;
mod old_layout;

use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

use scraper::{Html, Selector};
use serde::Serialize;

use caselaw_api::types::{DecisionDetails, DecisionRecord};
use caselaw_api::Fetch;

use crate::config::require_delay;
use crate::html::{inline_text, selector};
use crate::scrape::ScrapeError;

pub use context::{ScrapeContext, ScrapeWarning};
pub use fields::{split_catchwords, split_lines, LabelMap};
pub use new_layout::{Description, NewLayout};
pub use old_layout::OldLayout;

/// Shown alongside court listings: only Supreme Court decisions are known to
/// scrape cleanly.
pub const COVERAGE_WARNING: &str = "Warning: downloading full decisions has only been tested on the Supreme Court.
Results can be listed for any court or tribunal, but their full decisions
may not scrape correctly.";

static TERM: LazyLock<Selector> = LazyLock::new(|| selector("dt"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));

/// Hard failures of a single decision scrape. These are reported on the
/// [`ScrapeReport`] and never abort a bulk run.
#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    #[error("definition term '{0}' has no description")]
    MissingDescription(String),
    #[error("ordered list has invalid start attribute '{0}'")]
    InvalidListStart(String),
    #[error("decision has no uri")]
    MissingUri,
    #[error("decision page returned status {0}")]
    Remote(u16),
    #[error("decision fetch failed: {0}")]
    Request(#[from] caselaw_api::Error),
}

/// One decision layout's metadata and judgment readers.
pub trait Extractor {
    /// Labelled metadata. Title, uri and judgment are left empty.
    fn extract_metadata(
        &self,
        doc: &Html,
        ctx: &mut ScrapeContext,
    ) -> Result<DecisionDetails, ExtractError>;

    /// Judgment text as ordered paragraphs.
    fn extract_judgment(
        &self,
        doc: &Html,
        ctx: &mut ScrapeContext,
    ) -> Result<Vec<String>, ExtractError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Definition-list metadata.
    New,
    /// Table metadata.
    Old,
}

impl Layout {
    /// Any `<dt>` at all means the new layout.
    pub fn detect(doc: &Html) -> Self {
        if doc.select(&TERM).next().is_some() {
            Layout::New
        } else {
            Layout::Old
        }
    }

    pub fn detect_html(html: &str) -> Self {
        Self::detect(&Html::parse_document(html))
    }

    pub fn extractor(&self) -> &'static dyn Extractor {
        match self {
            Layout::New => &NewLayout,
            Layout::Old => &OldLayout,
        }
    }

    /// Full details: metadata, judgment, title and uri. `known_uri` wins over
    /// one deduced from the page.
    pub fn extract(
        &self,
        doc: &Html,
        known_uri: &str,
        ctx: &mut ScrapeContext,
    ) -> Result<DecisionDetails, ExtractError> {
        let extractor = self.extractor();
        let mut details = extractor.extract_metadata(doc, ctx)?;
        details.judgment = extractor.extract_judgment(doc, ctx)?;
        details.title = scrape_title(doc, ctx);
        details.uri = scrape_uri(doc, known_uri);
        Ok(details)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::New => write!(f, "new"),
            Layout::Old => write!(f, "old"),
        }
    }
}

/// Case title from `<title>`, without the trailing ` - <site>` suffix.
pub fn scrape_title(doc: &Html, ctx: &mut ScrapeContext) -> String {
    let Some(title) = doc.select(&TITLE).next() else {
        ctx.warn(ScrapeWarning::MissingTitle);
        return String::new();
    };
    let text = inline_text(title);
    let head = match text.rsplit_once(" - ") {
        Some((head, _)) => head,
        None => text.as_str(),
    };
    head.trim().to_string()
}

/// `known_uri` if set, otherwise the first `/decision` link cut down to
/// `/decision/<id>`.
pub fn scrape_uri(doc: &Html, known_uri: &str) -> String {
    if !known_uri.is_empty() {
        return known_uri.to_string();
    }
    doc.select(&ANCHOR)
        .filter_map(|a| a.value().attr("href"))
        .find(|href| href.starts_with("/decision"))
        .map(|href| href.split('/').take(3).collect::<Vec<_>>().join("/"))
        .unwrap_or_default()
}

/// Outcome of scraping one decision.
#[derive(Debug)]
pub struct ScrapeReport {
    /// The record, with details attached when the scrape succeeded and
    /// unchanged otherwise.
    pub record: DecisionRecord,
    pub layout: Option<Layout>,
    pub warnings: Vec<ScrapeWarning>,
    pub error: Option<ExtractError>,
    /// Page as fetched, when it was fetched.
    pub html: Option<String>,
}

impl ScrapeReport {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    fn failed(record: DecisionRecord, error: ExtractError) -> Self {
        ScrapeContext::for_record(&record).fail(&error);
        Self {
            record,
            layout: None,
            warnings: Vec::new(),
            error: Some(error),
            html: None,
        }
    }
}

/// Scrapes a decision page into `record`. Never fails outright: a hard
/// failure leaves the record as it was and is reported on the result.
pub fn scrape_decision(record: DecisionRecord, html: &str) -> ScrapeReport {
    let mut ctx = ScrapeContext::for_record(&record);
    let doc = Html::parse_document(html);
    let layout = Layout::detect(&doc);
    ctx.info(format_args!("Scraping with {} layout", layout));

    match layout.extract(&doc, record.uri(), &mut ctx) {
        Ok(details) => ScrapeReport {
            record: record.with_details(details),
            layout: Some(layout),
            warnings: ctx.into_warnings(),
            error: None,
            html: None,
        },
        Err(e) => {
            ctx.fail(&e);
            ScrapeReport {
                record,
                layout: Some(layout),
                warnings: ctx.into_warnings(),
                error: Some(e),
                html: None,
            }
        }
    }
}

/// Fetches and scrapes decision pages one at a time, pausing after each.
pub struct DecisionFetcher<'a, F: Fetch> {
    fetcher: &'a F,
    delay: Duration,
}

impl<'a, F: Fetch> DecisionFetcher<'a, F> {
    pub fn new(fetcher: &'a F, delay: Duration) -> Result<Self, ScrapeError> {
        Ok(Self {
            fetcher,
            delay: require_delay("decision delay", delay)?,
        })
    }

    /// Fetches the record's page and scrapes it. The delay is slept after
    /// every fetch attempt, successful or not.
    pub async fn fetch(&self, record: DecisionRecord) -> ScrapeReport {
        let uri = record.uri().to_string();
        if uri.is_empty() {
            return ScrapeReport::failed(record, ExtractError::MissingUri);
        }
        tracing::info!("Fetching decision {}", uri);
        let result = self.fetcher.fetch(&uri, None).await;
        let report = match result {
            Ok(resp) if resp.is_ok() => {
                let mut report = scrape_decision(record, &resp.body);
                report.html = Some(resp.body);
                report
            }
            Ok(resp) => ScrapeReport::failed(record, ExtractError::Remote(resp.status)),
            Err(e) => ScrapeReport::failed(record, e.into()),
        };
        tokio::time::sleep(self.delay).await;
        report
    }
}
