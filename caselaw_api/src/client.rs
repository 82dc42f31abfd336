//! HTTP client for the NSW CaseLaw website.

use std::future::Future;
use std::time::Duration;

use url::Url;

use crate::{query::QueryParams, user_agent::get_user_agent, Error};

/// Production site root.
pub const DEFAULT_BASE_URL: &str = "https://www.caselaw.nsw.gov.au";

/// Path of the advanced search form. Searches are GETs against this path.
pub const SEARCH_PATH: &str = "/search/advanced";

/// Status and body of a completed request. Deciding what a non-200 status
/// means is left to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Anything that can GET a site-relative path with query parameters.
///
/// [`Client`] is the real implementation; the scraping layer is generic over
/// this so it can be driven from recorded pages.
pub trait Fetch {
    fn fetch(
        &self,
        path: &str,
        params: Option<&QueryParams>,
    ) -> impl Future<Output = Result<FetchResponse, Error>> + Send;
}

/// HTTP client for the CaseLaw site.
///
/// Sends requests with browser-like headers and a randomized user agent,
/// with a 30-second timeout. The client never retries.
pub struct Client {
    /// Site root. Defaults to [`DEFAULT_BASE_URL`].
    base_url: String,
    http: reqwest::Client,
}

impl Client {
    /// Creates a new client pointing at the production site.
    pub fn new() -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_url(&self, path: &str, params: Option<&QueryParams>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        Ok(match params {
            Some(params) => params.add_to_url(&url),
            None => url,
        })
    }

    /// GETs a path and returns whatever status and body came back.
    pub async fn get(
        &self,
        path: &str,
        params: Option<&QueryParams>,
    ) -> Result<FetchResponse, Error> {
        let url = self.get_url(path, params)?;
        tracing::debug!("GET {}", url);
        let resp = self
            .http
            .get(url)
            .header("accept", "text/html,application/xhtml+xml")
            .header("accept-language", "en-AU,en;q=0.9")
            .header("upgrade-insecure-requests", "1")
            .header("cache-control", "no-cache")
            .header("pragma", "no-cache")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        Ok(FetchResponse { status, body })
    }
}

impl Fetch for Client {
    async fn fetch(
        &self,
        path: &str,
        params: Option<&QueryParams>,
    ) -> Result<FetchResponse, Error> {
        self.get(path, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_url_appends_params_only_when_given() {
        let client = Client::with_base_url("https://example.com/").unwrap();
        let url = client.get_url("/decision/abc", None).unwrap();
        assert_eq!(url.as_str(), "https://example.com/decision/abc");

        let params = QueryParams::from(vec![("page".to_string(), "2".to_string())]);
        let url = client.get_url(SEARCH_PATH, Some(&params)).unwrap();
        assert_eq!(url.as_str(), "https://example.com/search/advanced?page=2");
    }
}
