//! Harvesting decision uris from free text such as exported spreadsheet cells.

use std::sync::LazyLock;

use regex::Regex;

static DECISION_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://www\.caselaw\.nsw\.gov\.au(/decision/[a-f0-9]+)").expect("decision url pattern")
});

/// Site-relative uris of every decision link in `value`, in order.
pub fn decision_uris(value: &str) -> Vec<String> {
    DECISION_URL_RE
        .captures_iter(value)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Unique uris across many values, first occurrence wins.
pub fn collect_decision_uris<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        for uri in decision_uris(value) {
            if !out.contains(&uri) {
                out.push(uri);
            }
        }
    }
    out
}
