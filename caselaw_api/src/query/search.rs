//! Advanced search form parameters: [`SearchQuery`] and the [`QueryParams`] it builds.

use url::Url;

use crate::types::CourtCategory;
use crate::Error;

/// Name of the pagination parameter. It is always the first parameter and
/// is empty on the initial page.
pub const PAGE_PARAM: &str = "page";

/// The free-text criteria of the advanced search form, in the canonical
/// order they are emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextField {
    Body,
    Title,
    Before,
    Catchwords,
    Party,
    Citation,
    StartDate,
    EndDate,
    FileNumber,
    LegislationCited,
    CasesCited,
}

impl TextField {
    pub const ALL: [TextField; 11] = [
        TextField::Body,
        TextField::Title,
        TextField::Before,
        TextField::Catchwords,
        TextField::Party,
        TextField::Citation,
        TextField::StartDate,
        TextField::EndDate,
        TextField::FileNumber,
        TextField::LegislationCited,
        TextField::CasesCited,
    ];

    pub fn param_name(&self) -> &'static str {
        match self {
            TextField::Body => "body",
            TextField::Title => "title",
            TextField::Before => "before",
            TextField::Catchwords => "catchwords",
            TextField::Party => "party",
            TextField::Citation => "mnc",
            TextField::StartDate => "startDate",
            TextField::EndDate => "endDate",
            TextField::FileNumber => "fileNumber",
            TextField::LegislationCited => "legislationCited",
            TextField::CasesCited => "casesCited",
        }
    }
}

/// A search request: text criteria plus 1-based court and tribunal ordinals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub body: Option<String>,
    pub title: Option<String>,
    pub before: Option<String>,
    pub catchwords: Option<String>,
    pub party: Option<String>,
    pub citation: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub file_number: Option<String>,
    pub legislation_cited: Option<String>,
    pub cases_cited: Option<String>,
    pub courts: Vec<i64>,
    pub tribunals: Vec<i64>,
}

impl SearchQuery {
    /// Sets one text criterion.
    pub fn with_text(mut self, field: TextField, value: &str) -> Self {
        *self.text_slot(field) = Some(value.to_string());
        self
    }

    pub fn with_body(self, body: &str) -> Self {
        self.with_text(TextField::Body, body)
    }

    pub fn with_title(self, title: &str) -> Self {
        self.with_text(TextField::Title, title)
    }

    pub fn with_before(self, before: &str) -> Self {
        self.with_text(TextField::Before, before)
    }

    pub fn with_catchwords(self, catchwords: &str) -> Self {
        self.with_text(TextField::Catchwords, catchwords)
    }

    pub fn with_party(self, party: &str) -> Self {
        self.with_text(TextField::Party, party)
    }

    /// Medium neutral citation, square brackets included.
    pub fn with_citation(self, citation: &str) -> Self {
        self.with_text(TextField::Citation, citation)
    }

    pub fn with_start_date(self, date: &str) -> Self {
        self.with_text(TextField::StartDate, date)
    }

    pub fn with_end_date(self, date: &str) -> Self {
        self.with_text(TextField::EndDate, date)
    }

    pub fn with_file_number(self, file_number: &str) -> Self {
        self.with_text(TextField::FileNumber, file_number)
    }

    pub fn with_legislation_cited(self, legislation: &str) -> Self {
        self.with_text(TextField::LegislationCited, legislation)
    }

    pub fn with_cases_cited(self, cases: &str) -> Self {
        self.with_text(TextField::CasesCited, cases)
    }

    pub fn with_court(mut self, ordinal: i64) -> Self {
        self.courts.push(ordinal);
        self
    }
    pub fn with_courts(mut self, ordinals: &[i64]) -> Self {
        self.courts.extend_from_slice(ordinals);
        self
    }

    pub fn with_tribunal(mut self, ordinal: i64) -> Self {
        self.tribunals.push(ordinal);
        self
    }
    pub fn with_tribunals(mut self, ordinals: &[i64]) -> Self {
        self.tribunals.extend_from_slice(ordinals);
        self
    }

    pub fn text(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::Body => self.body.as_deref(),
            TextField::Title => self.title.as_deref(),
            TextField::Before => self.before.as_deref(),
            TextField::Catchwords => self.catchwords.as_deref(),
            TextField::Party => self.party.as_deref(),
            TextField::Citation => self.citation.as_deref(),
            TextField::StartDate => self.start_date.as_deref(),
            TextField::EndDate => self.end_date.as_deref(),
            TextField::FileNumber => self.file_number.as_deref(),
            TextField::LegislationCited => self.legislation_cited.as_deref(),
            TextField::CasesCited => self.cases_cited.as_deref(),
        }
    }

    fn text_slot(&mut self, field: TextField) -> &mut Option<String> {
        match field {
            TextField::Body => &mut self.body,
            TextField::Title => &mut self.title,
            TextField::Before => &mut self.before,
            TextField::Catchwords => &mut self.catchwords,
            TextField::Party => &mut self.party,
            TextField::Citation => &mut self.citation,
            TextField::StartDate => &mut self.start_date,
            TextField::EndDate => &mut self.end_date,
            TextField::FileNumber => &mut self.file_number,
            TextField::LegislationCited => &mut self.legislation_cited,
            TextField::CasesCited => &mut self.cases_cited,
        }
    }

    pub fn selected(&self, category: CourtCategory) -> &[i64] {
        match category {
            CourtCategory::Courts => &self.courts,
            CourtCategory::Tribunals => &self.tribunals,
        }
    }

    /// True when at least one court or tribunal is selected.
    pub fn has_selection(&self) -> bool {
        !self.courts.is_empty() || !self.tribunals.is_empty()
    }

    /// Translates the request into the form's parameter list.
    ///
    /// The list is: the page placeholder, every text field in
    /// [`TextField::ALL`] order (empty when unset), then for each category
    /// and each directory entry an optional `(category, id)` pair when the
    /// entry is selected followed by an unconditional `(_category, "on")`
    /// flag. The length therefore depends only on how many entries are
    /// selected, never on which.
    pub fn build(&self) -> Result<QueryParams, Error> {
        let mut pairs = Vec::with_capacity(QueryParams::base_len() + self.courts.len() + self.tribunals.len());
        pairs.push((PAGE_PARAM.to_string(), String::new()));
        for field in TextField::ALL {
            pairs.push((
                field.param_name().to_string(),
                self.text(field).unwrap_or_default().to_string(),
            ));
        }
        for category in CourtCategory::ALL {
            let selected = self.selected(category);
            for ordinal in selected {
                category.resolve(*ordinal)?;
            }
            for (i, court) in category.entries().iter().enumerate() {
                if selected.contains(&(i as i64 + 1)) {
                    pairs.push((category.param_name().to_string(), court.id.to_string()));
                }
                pairs.push((category.flag_name().to_string(), "on".to_string()));
            }
        }
        Ok(QueryParams { pairs })
    }
}

/// An ordered parameter list ready to send. Only the page value changes
/// between requests of one search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parameter count with nothing selected.
    pub fn base_len() -> usize {
        1 + TextField::ALL.len()
            + CourtCategory::ALL.iter().map(|c| c.len()).sum::<usize>()
    }

    /// Sets the page parameter (the first pair).
    pub fn set_page(&mut self, page: u32) {
        if let Some(first) = self.pairs.first_mut() {
            first.1 = page.to_string();
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.set_page(page);
        self
    }

    pub fn page(&self) -> &str {
        self.pairs.first().map(|p| p.1.as_str()).unwrap_or_default()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Appends the parameters to the given URL, returning the modified URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        {
            let mut query = url.query_pairs_mut();
            for (name, value) in &self.pairs {
                query.append_pair(name, value);
            }
        }
        url
    }
}

impl From<Vec<(String, String)>> for QueryParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }
}
