use std::fmt;

use caselaw_api::types::DecisionRecord;

/// A recoverable problem met while scraping one decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScrapeWarning {
    /// No label contained the searched substring. The field was left empty.
    FieldNotFound { label: String },
    /// Several labels contained the searched substring. The first was used.
    AmbiguousField { label: String, matches: Vec<String> },
    MissingTitle,
    MissingJudgmentBody,
}

impl fmt::Display for ScrapeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldNotFound { label } => write!(f, "{} not found", label),
            Self::AmbiguousField { label, matches } => {
                write!(f, "Multiple matches for {}: {}", label, matches.join(" | "))
            }
            Self::MissingTitle => write!(f, "No title tag"),
            Self::MissingJudgmentBody => write!(f, "Couldn't find <div> with judgment"),
        }
    }
}

/// Identifies the decision being scraped and collects its warnings.
///
/// Every message is logged prefixed with `[uri title]`.
#[derive(Debug, Default)]
pub struct ScrapeContext {
    uri: String,
    title: String,
    warnings: Vec<ScrapeWarning>,
}

impl ScrapeContext {
    pub fn new(uri: &str, title: &str) -> Self {
        Self {
            uri: uri.to_string(),
            title: title.to_string(),
            warnings: Vec::new(),
        }
    }

    pub fn for_record(record: &DecisionRecord) -> Self {
        Self::new(record.uri(), record.title())
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn warn(&mut self, warning: ScrapeWarning) {
        tracing::warn!("[{} {}] {}", self.uri, self.title, warning);
        self.warnings.push(warning);
    }

    /// Logs without recording a warning.
    pub fn info(&self, message: impl fmt::Display) {
        tracing::info!("[{} {}] {}", self.uri, self.title, message);
    }

    /// Logs a failure that ends the scrape.
    pub fn fail(&self, error: impl fmt::Display) {
        tracing::warn!("[{} {}] Scrape failed: {}", self.uri, self.title, error);
    }

    pub fn warnings(&self) -> &[ScrapeWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<ScrapeWarning> {
        self.warnings
    }
}
