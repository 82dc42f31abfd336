//! Re-deriving the court and tribunal directory from the live search form.
//!
//! Searches always use the embedded table in `caselaw_api::types`; this is a
//! maintenance aid for spotting when that table has gone stale.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::Serialize;

use caselaw_api::types::{Court, CourtCategory, COURTS, TRIBUNALS};
use caselaw_api::{Fetch, SEARCH_PATH};

use crate::html::{selector, stripped_strings};
use crate::scrape::ScrapeError;

static COURT_INPUTS: LazyLock<Selector> = LazyLock::new(|| selector("input[name=\"courts\"]"));
static TRIBUNAL_INPUTS: LazyLock<Selector> =
    LazyLock::new(|| selector("input[name=\"tribunals\"]"));

/// One selectable court or tribunal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CourtDirectory {
    pub courts: Vec<DirectoryEntry>,
    pub tribunals: Vec<DirectoryEntry>,
}

impl CourtDirectory {
    /// The table compiled into the binary.
    pub fn embedded() -> Self {
        let entries = |table: &[Court]| -> Vec<DirectoryEntry> {
            table
                .iter()
                .map(|c| DirectoryEntry {
                    id: c.id.to_string(),
                    name: c.name.to_string(),
                })
                .collect()
        };
        Self {
            courts: entries(COURTS),
            tribunals: entries(TRIBUNALS),
        }
    }

    pub fn entries(&self, category: CourtCategory) -> &[DirectoryEntry] {
        match category {
            CourtCategory::Courts => &self.courts,
            CourtCategory::Tribunals => &self.tribunals,
        }
    }
}

/// Reads every `courts`/`tribunals` checkbox: its value is the id and the
/// first text of its parent element is the name.
pub fn parse_court_directory(html: &str) -> Result<CourtDirectory, ScrapeError> {
    let doc = Html::parse_document(html);
    let read = |inputs: &Selector| -> Vec<DirectoryEntry> {
        doc.select(inputs)
            .filter_map(|input| {
                let id = input.value().attr("value")?.trim().to_string();
                let name = input
                    .parent()
                    .and_then(scraper::ElementRef::wrap)
                    .and_then(|parent| stripped_strings(parent).first().map(|s| s.to_string()))
                    .unwrap_or_default();
                Some(DirectoryEntry { id, name })
            })
            .collect()
    };
    let directory = CourtDirectory {
        courts: read(&COURT_INPUTS),
        tribunals: read(&TRIBUNAL_INPUTS),
    };
    if directory.courts.is_empty() && directory.tribunals.is_empty() {
        return Err(ScrapeError::HtmlStructure(
            "no court or tribunal controls found on the search form".to_string(),
        ));
    }
    Ok(directory)
}

/// Fetches the advanced search form and parses its directory.
pub async fn refresh_court_directory<F: Fetch>(fetcher: &F) -> Result<CourtDirectory, ScrapeError> {
    let resp = fetcher.fetch(SEARCH_PATH, None).await?;
    if !resp.is_ok() {
        return Err(ScrapeError::Remote {
            status: resp.status,
        });
    }
    let directory = parse_court_directory(&resp.body)?;
    tracing::info!(
        "Search form lists {} courts and {} tribunals",
        directory.courts.len(),
        directory.tribunals.len()
    );
    Ok(directory)
}
