use serde::Serialize;

/// Column order of the flattened (CSV) export. The judgment text is never
/// part of the flattened form.
pub const CSV_FIELDS: [&str; 16] = [
    "title",
    "uri",
    "decisionDate",
    "mnc",
    "before",
    "catchwords",
    "hearingDates",
    "dateOfOrders",
    "jurisdiction",
    "decision",
    "legislationCited",
    "casesCited",
    "parties",
    "category",
    "fileNumber",
    "representation",
];

/// Fields available from a single row of a search results page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionSummary {
    /// Site-relative path, e.g. `/decision/54a63...`.
    pub uri: String,
    pub title: String,
    pub before: String,
    pub decision_date: String,
    /// Short free-text snippet shown under the result heading.
    pub catchwords: String,
}

/// Fields scraped from a decision's own page. Absent fields are empty,
/// never missing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionDetails {
    pub uri: String,
    pub title: String,
    pub mnc: String,
    pub hearing_dates: String,
    pub date_of_orders: String,
    pub decision_date: String,
    pub jurisdiction: String,
    pub before: String,
    pub decision: String,
    pub catchwords: Vec<String>,
    pub legislation_cited: Vec<String>,
    pub cases_cited: Vec<String>,
    pub parties: Vec<String>,
    pub category: String,
    pub file_number: String,
    pub representation: Vec<String>,
    pub judgment: Vec<String>,
}

/// A decision as known so far: always a results-page summary, plus the
/// scraped details once the decision page has been fetched.
///
/// Records are values. Moving from summary-only to full is an explicit
/// [`DecisionRecord::with_details`] call that consumes the old record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecisionRecord {
    summary: DecisionSummary,
    details: Option<DecisionDetails>,
}

impl DecisionRecord {
    pub fn from_summary(summary: DecisionSummary) -> Self {
        Self {
            summary,
            details: None,
        }
    }

    /// A record known only by its uri, e.g. one harvested from a link list.
    pub fn from_uri(uri: &str) -> Self {
        Self::from_summary(DecisionSummary {
            uri: uri.to_string(),
            ..Default::default()
        })
    }

    /// Returns the record with scraped details attached. Details replace the
    /// summary's title, before and decision date only where they are non-empty;
    /// the summary's uri wins over one deduced from the page.
    pub fn with_details(self, details: DecisionDetails) -> Self {
        Self {
            summary: self.summary,
            details: Some(details),
        }
    }

    pub fn summary(&self) -> &DecisionSummary {
        &self.summary
    }

    pub fn details(&self) -> Option<&DecisionDetails> {
        self.details.as_ref()
    }

    pub fn is_full(&self) -> bool {
        self.details.is_some()
    }

    pub fn uri(&self) -> &str {
        match &self.details {
            Some(d) if self.summary.uri.is_empty() => &d.uri,
            _ => &self.summary.uri,
        }
    }

    /// Last path segment of the uri, used as a file name downstream.
    pub fn id(&self) -> Option<&str> {
        let uri = self.uri().trim_end_matches('/');
        if uri.is_empty() {
            return None;
        }
        uri.rsplit('/').next().filter(|s| !s.is_empty())
    }

    pub fn title(&self) -> &str {
        self.prefer_details(&self.summary.title, |d| &d.title)
    }

    pub fn before(&self) -> &str {
        self.prefer_details(&self.summary.before, |d| &d.before)
    }

    pub fn decision_date(&self) -> &str {
        self.prefer_details(&self.summary.decision_date, |d| &d.decision_date)
    }

    fn prefer_details<'a>(
        &'a self,
        fallback: &'a str,
        pick: impl Fn(&'a DecisionDetails) -> &'a String,
    ) -> &'a str {
        match &self.details {
            Some(d) if !pick(d).is_empty() => pick(d).as_str(),
            _ => fallback,
        }
    }

    /// Flat, serialisable view of everything known about the decision.
    pub fn values(&self) -> DecisionValues {
        let catchwords = match &self.details {
            Some(d) => Catchwords::Phrases(d.catchwords.clone()),
            None => Catchwords::Snippet(self.summary.catchwords.clone()),
        };
        DecisionValues {
            title: self.title().to_string(),
            uri: self.uri().to_string(),
            before: self.before().to_string(),
            decision_date: self.decision_date().to_string(),
            catchwords,
            full: self.details.as_ref().map(|d| FullValues {
                mnc: d.mnc.clone(),
                hearing_dates: d.hearing_dates.clone(),
                date_of_orders: d.date_of_orders.clone(),
                jurisdiction: d.jurisdiction.clone(),
                decision: d.decision.clone(),
                legislation_cited: d.legislation_cited.clone(),
                cases_cited: d.cases_cited.clone(),
                parties: d.parties.clone(),
                category: d.category.clone(),
                file_number: d.file_number.clone(),
                representation: d.representation.clone(),
                judgment: d.judgment.clone(),
            }),
        }
    }

    /// One CSV row in [`CSV_FIELDS`] order. Lists are joined with `"; "` and
    /// newlines become single spaces.
    pub fn csv_fields(&self) -> Vec<String> {
        let d = self.details.as_ref();
        let scalar = |f: fn(&DecisionDetails) -> &String| -> String {
            d.map(|d| flatten_text(f(d))).unwrap_or_default()
        };
        let list = |f: fn(&DecisionDetails) -> &Vec<String>| -> String {
            d.map(|d| flatten_list(f(d))).unwrap_or_default()
        };
        let catchwords = match d {
            Some(d) => flatten_list(&d.catchwords),
            None => flatten_text(&self.summary.catchwords),
        };
        vec![
            flatten_text(self.title()),
            flatten_text(self.uri()),
            flatten_text(self.decision_date()),
            scalar(|d| &d.mnc),
            flatten_text(self.before()),
            catchwords,
            scalar(|d| &d.hearing_dates),
            scalar(|d| &d.date_of_orders),
            scalar(|d| &d.jurisdiction),
            scalar(|d| &d.decision),
            list(|d| &d.legislation_cited),
            list(|d| &d.cases_cited),
            list(|d| &d.parties),
            scalar(|d| &d.category),
            scalar(|d| &d.file_number),
            list(|d| &d.representation),
        ]
    }
}

/// Replaces every newline with a single space.
pub fn flatten_text(value: &str) -> String {
    value.replace("\r\n", " ").replace('\n', " ")
}

pub fn flatten_list(values: &[String]) -> String {
    flatten_text(&values.join("; "))
}

/// Catchwords are a snippet string until the decision page is scraped, then
/// a list of phrases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Catchwords {
    Snippet(String),
    Phrases(Vec<String>),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionValues {
    pub title: String,
    pub uri: String,
    pub before: String,
    pub decision_date: String,
    pub catchwords: Catchwords,
    #[serde(flatten)]
    pub full: Option<FullValues>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullValues {
    pub mnc: String,
    pub hearing_dates: String,
    pub date_of_orders: String,
    pub jurisdiction: String,
    pub decision: String,
    pub legislation_cited: Vec<String>,
    pub cases_cited: Vec<String>,
    pub parties: Vec<String>,
    pub category: String,
    pub file_number: String,
    pub representation: Vec<String>,
    pub judgment: Vec<String>,
}
