//! Crawl configuration: site root and request pacing.

use std::time::Duration;

use caselaw_api::DEFAULT_BASE_URL;

use crate::scrape::ScrapeError;

pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(5);
pub const DEFAULT_DECISION_DELAY: Duration = Duration::from_secs(5);

pub const BASE_URL_VAR: &str = "CASELAW_BASE_URL";
pub const PAGE_DELAY_VAR: &str = "CASELAW_PAGE_DELAY_SECS";
pub const DECISION_DELAY_VAR: &str = "CASELAW_DECISION_DELAY_SECS";

#[derive(Clone, Debug, PartialEq)]
pub struct CrawlConfig {
    pub base_url: String,
    /// Pause before every results page after the first.
    pub page_delay: Duration,
    /// Pause after every decision page fetch.
    pub decision_delay: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_delay: DEFAULT_PAGE_DELAY,
            decision_delay: DEFAULT_DECISION_DELAY,
        }
    }
}

impl CrawlConfig {
    /// Defaults overridden by `CASELAW_*` environment variables.
    pub fn from_env() -> Result<Self, ScrapeError> {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(BASE_URL_VAR) {
            if !url.trim().is_empty() {
                config.base_url = url.trim().to_string();
            }
        }
        if let Ok(raw) = std::env::var(PAGE_DELAY_VAR) {
            config.page_delay = parse_delay(PAGE_DELAY_VAR, &raw)?;
        }
        if let Ok(raw) = std::env::var(DECISION_DELAY_VAR) {
            config.decision_delay = parse_delay(DECISION_DELAY_VAR, &raw)?;
        }
        tracing::debug!(?config, "crawl configuration");
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_page_delay_secs(mut self, secs: f64) -> Result<Self, ScrapeError> {
        self.page_delay = delay_from_secs("page delay", secs)?;
        Ok(self)
    }

    pub fn with_decision_delay_secs(mut self, secs: f64) -> Result<Self, ScrapeError> {
        self.decision_delay = delay_from_secs("decision delay", secs)?;
        Ok(self)
    }
}

/// Parses a delay given in (possibly fractional) seconds.
pub fn parse_delay(name: &str, raw: &str) -> Result<Duration, ScrapeError> {
    let secs: f64 = raw.trim().parse().map_err(|_| {
        ScrapeError::InvalidConfig(format!("{} must be a number of seconds, got '{}'", name, raw))
    })?;
    delay_from_secs(name, secs)
}

/// Converts seconds to a delay, rejecting zero, negative and non-finite values.
pub fn delay_from_secs(name: &str, secs: f64) -> Result<Duration, ScrapeError> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ScrapeError::InvalidConfig(format!(
            "{} must be greater than zero, got {}",
            name, secs
        )));
    }
    Ok(Duration::from_secs_f64(secs))
}

/// Rejects a zero delay handed in directly.
pub(crate) fn require_delay(name: &str, delay: Duration) -> Result<Duration, ScrapeError> {
    if delay.is_zero() {
        return Err(ScrapeError::InvalidConfig(format!(
            "{} must be greater than zero",
            name
        )));
    }
    Ok(delay)
}
