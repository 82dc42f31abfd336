//! Pager and decision fetcher behaviour against a recording fake and a mock
//! server.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use caselaw_lib::caselaw_api::{Error, FetchResponse};
use caselaw_lib::types::DecisionRecord;
use caselaw_lib::{
    refresh_court_directory, Client, DecisionFetcher, ExtractError, Fetch, QueryParams,
    ScrapeError, SearchPager, SearchQuery,
};
use tokio::time::Instant;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DELAY: Duration = Duration::from_secs(5);

/// Serves canned responses keyed by page parameter (or path when there are
/// no parameters) and records every call with the time it was made.
struct RecordingFetch {
    pages: HashMap<String, FetchResponse>,
    fallback: FetchResponse,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl RecordingFetch {
    fn new(fallback: FetchResponse) -> Self {
        Self {
            pages: HashMap::new(),
            fallback,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with_page(mut self, key: &str, resp: FetchResponse) -> Self {
        self.pages.insert(key.to_string(), resp);
        self
    }

    fn calls(&self) -> Vec<(String, Instant)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Fetch for RecordingFetch {
    async fn fetch(
        &self,
        path: &str,
        params: Option<&QueryParams>,
    ) -> Result<FetchResponse, Error> {
        let key = match params {
            Some(params) => params.page().to_string(),
            None => path.to_string(),
        };
        self.calls.lock().unwrap().push((key.clone(), Instant::now()));
        Ok(self.pages.get(&key).cloned().unwrap_or_else(|| self.fallback.clone()))
    }
}

fn ok(body: String) -> FetchResponse {
    FetchResponse { status: 200, body }
}

/// A results page with `rows` result rows whose uris are prefixed by `tag`.
fn results_page(total: u64, tag: &str, rows: usize) -> String {
    let mut html = format!(
        "<html><body><h1>Search results <small>Displaying 1 - 20 of {}</small></h1>",
        total
    );
    for i in 0..rows {
        html.push_str(&format!(
            "<div class=\"row result\"><h4><a href=\"/decision/{}{}\">Case {}</a></h4>\
             <ul><li>Court</li><li>Judge</li><li>Judgment</li><li>1 May 2020</li></ul></div>",
            tag, i, i
        ));
    }
    html.push_str("</body></html>");
    html
}

fn query() -> SearchQuery {
    SearchQuery::default().with_court(13)
}

// ============================================================================
// Paging
// ============================================================================

#[tokio::test(start_paused = true)]
async fn walks_every_page_with_delay_before_each() {
    let fetcher = RecordingFetch::new(ok(results_page(1284, "p", 20)));
    let mut pager = SearchPager::new(&fetcher, &query(), DELAY).unwrap();

    let mut count = 0;
    while let Some(_record) = pager.next().await.unwrap() {
        count += 1;
    }
    assert_eq!(pager.total(), Some(1284));
    assert_eq!(count, 65 * 20);

    let calls = fetcher.calls();
    assert_eq!(calls.len(), 65);
    assert_eq!(calls[0].0, "");
    for (i, window) in calls.windows(2).enumerate() {
        assert_eq!(window[1].0, (i + 1).to_string());
        assert!(window[1].1 - window[0].1 >= DELAY);
    }
}

#[tokio::test(start_paused = true)]
async fn first_page_is_yielded_before_the_delay() {
    let fetcher = RecordingFetch::new(ok(results_page(40, "p", 20)));
    let mut pager = SearchPager::new(&fetcher, &query(), DELAY).unwrap();

    let start = Instant::now();
    for _ in 0..20 {
        pager.next().await.unwrap().unwrap();
    }
    assert_eq!(fetcher.calls().len(), 1);
    assert!(Instant::now() - start < DELAY);

    pager.next().await.unwrap().unwrap();
    assert_eq!(fetcher.calls().len(), 2);
    assert!(Instant::now() - start >= DELAY);
}

#[tokio::test(start_paused = true)]
async fn zero_results_makes_one_request() {
    let fetcher = RecordingFetch::new(ok(results_page(0, "p", 0)));
    let mut pager = SearchPager::new(&fetcher, &query(), DELAY).unwrap();

    assert!(pager.next().await.unwrap().is_none());
    assert!(pager.next().await.unwrap().is_none());
    assert_eq!(pager.total(), Some(0));
    assert_eq!(fetcher.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn failing_page_ends_the_run() {
    let fetcher = RecordingFetch::new(ok(results_page(100, "p", 20))).with_page(
        "3",
        FetchResponse {
            status: 500,
            body: "Internal Server Error".to_string(),
        },
    );
    let mut pager = SearchPager::new(&fetcher, &query(), DELAY).unwrap();

    let mut records = Vec::new();
    let err = loop {
        match pager.next().await {
            Ok(Some(record)) => records.push(record),
            Ok(None) => panic!("pager finished without error"),
            Err(e) => break e,
        }
    };
    assert!(matches!(err, ScrapeError::Remote { status: 500 }));
    // Pages 0, 1 and 2 were yielded in full.
    assert_eq!(records.len(), 60);
    assert!(pager.next().await.unwrap().is_none());
    assert_eq!(fetcher.calls().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn first_page_failure_is_remote_error() {
    let fetcher = RecordingFetch::new(FetchResponse {
        status: 403,
        body: String::new(),
    });
    let mut pager = SearchPager::new(&fetcher, &query(), DELAY).unwrap();
    assert!(matches!(
        pager.next().await,
        Err(ScrapeError::Remote { status: 403 })
    ));
}

#[tokio::test(start_paused = true)]
async fn layout_change_is_structure_error() {
    let fetcher = RecordingFetch::new(ok("<html><body><h1>Search</h1></body></html>".to_string()));
    let pager = SearchPager::new(&fetcher, &query(), DELAY).unwrap();
    assert!(matches!(
        pager.collect_all().await,
        Err(ScrapeError::HtmlStructure(_))
    ));
}

#[test]
fn zero_delay_and_bad_ordinal_rejected() {
    let fetcher = RecordingFetch::new(ok(String::new()));
    assert!(matches!(
        SearchPager::new(&fetcher, &query(), Duration::ZERO),
        Err(ScrapeError::InvalidConfig(_))
    ));
    assert!(matches!(
        SearchPager::new(&fetcher, &SearchQuery::default().with_court(14), DELAY),
        Err(ScrapeError::Api(Error::OrdinalOutOfRange { .. }))
    ));
}

// ============================================================================
// Decision fetching
// ============================================================================

#[tokio::test(start_paused = true)]
async fn decision_fetch_sleeps_after_each_attempt() {
    let fetcher = RecordingFetch::new(FetchResponse {
        status: 404,
        body: String::new(),
    })
    .with_page(
        "/decision/good",
        ok(include_str!("fixtures/decision_new.html").to_string()),
    );
    let decisions = DecisionFetcher::new(&fetcher, DELAY).unwrap();

    let start = Instant::now();
    let good = decisions.fetch(DecisionRecord::from_uri("/decision/good")).await;
    assert!(good.succeeded());
    assert!(good.record.is_full());
    assert!(good.html.is_some());
    assert!(Instant::now() - start >= DELAY);

    let missing = decisions.fetch(DecisionRecord::from_uri("/decision/gone")).await;
    assert!(!missing.succeeded());
    assert!(matches!(missing.error, Some(ExtractError::Remote(404))));
    assert!(!missing.record.is_full());
    assert!(Instant::now() - start >= DELAY * 2);

    let no_uri = decisions.fetch(DecisionRecord::default()).await;
    assert!(matches!(no_uri.error, Some(ExtractError::MissingUri)));
    assert_eq!(fetcher.calls().len(), 2);
}

// ============================================================================
// End to end over HTTP
// ============================================================================

#[tokio::test]
async fn pager_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/advanced"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(25, "b", 5)))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search/advanced"))
        .and(query_param("page", ""))
        .and(query_param("courts", "54a634063004de94513d8281"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(25, "a", 20)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let pager = SearchPager::new(&client, &query(), Duration::from_millis(10)).unwrap();
    let records = pager.collect_all().await.unwrap();

    assert_eq!(records.len(), 25);
    assert_eq!(records[0].uri(), "/decision/a0");
    assert_eq!(records[20].uri(), "/decision/b0");
}

#[tokio::test]
async fn directory_refresh_surfaces_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/advanced"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    assert!(matches!(
        refresh_court_directory(&client).await,
        Err(ScrapeError::Remote { status: 500 })
    ));
}
