//! Search results page parsing.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use caselaw_api::types::{DecisionRecord, DecisionSummary};

use crate::html::{inline_text, next_sibling_tag, selector, stripped_strings, stripped_text};

#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    #[error("api error: {0}")]
    Api(#[from] caselaw_api::Error),
    #[error("unexpected status {status}")]
    Remote { status: u16 },
    #[error("unexpected page structure: {0}")]
    HtmlStructure(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

static DISPLAYING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Displaying\s+([\d,]+)\s*-\s*([\d,]+)\s+of\s+([\d,]+)")
        .expect("displaying pattern")
});

static HEADING: LazyLock<Selector> = LazyLock::new(|| selector("h1"));
static RESULT_ROW: LazyLock<Selector> = LazyLock::new(|| selector("div.result"));
static ROW_HEADING: LazyLock<Selector> = LazyLock::new(|| selector("h4"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a"));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| selector("p"));
static LIST_ITEM: LazyLock<Selector> = LazyLock::new(|| selector("li"));

/// One parsed page of search results.
#[derive(Debug)]
pub struct ResultsPage {
    /// Total matches across all pages, as stated by the page heading.
    pub total: u64,
    /// Summaries in document order. May be shorter than the number of rows.
    pub records: Vec<DecisionRecord>,
    pub skipped: Vec<RowSkip>,
}

/// A result row that could not be read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowSkip {
    /// 0-based position of the row on the page.
    pub index: usize,
    pub reason: String,
}

/// Parses a search results page.
///
/// The second line of the first `h1` must read `Displaying <start> - <end> of
/// <total>`; anything else is an [`ScrapeError::HtmlStructure`]. Rows are read
/// independently and an unreadable row is logged and left out.
pub fn parse_results_page(html: &str) -> Result<ResultsPage, ScrapeError> {
    let doc = Html::parse_document(html);
    let total = parse_total(&doc)?;
    if total == 0 {
        return Ok(ResultsPage {
            total,
            records: Vec::new(),
            skipped: Vec::new(),
        });
    }

    let mut records = Vec::new();
    let mut skipped = Vec::new();
    for (index, row) in doc.select(&RESULT_ROW).enumerate() {
        match parse_result_row(row) {
            Ok(summary) => records.push(DecisionRecord::from_summary(summary)),
            Err(reason) => {
                tracing::warn!("Skipping result row {}: {}", index, reason);
                skipped.push(RowSkip { index, reason });
            }
        }
    }
    tracing::debug!("Parsed {} of {} results", records.len(), total);
    Ok(ResultsPage {
        total,
        records,
        skipped,
    })
}

fn parse_total(doc: &Html) -> Result<u64, ScrapeError> {
    let heading = doc
        .select(&HEADING)
        .next()
        .ok_or_else(|| ScrapeError::HtmlStructure("results heading not found".to_string()))?;
    let lines = stripped_strings(heading);
    let line = lines.get(1).ok_or_else(|| {
        ScrapeError::HtmlStructure(format!(
            "results heading has {} line(s), expected at least 2",
            lines.len()
        ))
    })?;
    let caps = DISPLAYING_RE.captures(line).ok_or_else(|| {
        ScrapeError::HtmlStructure(format!("unrecognised results count '{}'", line))
    })?;
    parse_int(&caps[3]).ok_or_else(|| {
        ScrapeError::HtmlStructure(format!("unreadable results total '{}'", &caps[3]))
    })
}

fn parse_result_row(row: ElementRef<'_>) -> Result<DecisionSummary, String> {
    let heading = row
        .select(&ROW_HEADING)
        .next()
        .ok_or("no heading")?;
    let anchor = heading
        .select(&ANCHOR)
        .next()
        .ok_or("no link in heading")?;
    let uri = anchor
        .value()
        .attr("href")
        .ok_or("link has no href")?
        .to_string();

    // The first paragraph of the details block is not the snippet.
    let catchwords = next_sibling_tag(heading, "div")
        .and_then(|details| details.select(&PARAGRAPH).nth(1))
        .map(stripped_text)
        .unwrap_or_default();

    let items: Vec<ElementRef<'_>> = row.select(&LIST_ITEM).collect();
    let item_text = |n: usize| items.get(n).map(|li| inline_text(*li)).unwrap_or_default();

    Ok(DecisionSummary {
        uri,
        title: inline_text(anchor),
        before: item_text(1),
        decision_date: item_text(3),
        catchwords,
    })
}

fn parse_int(raw: &str) -> Option<u64> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}
