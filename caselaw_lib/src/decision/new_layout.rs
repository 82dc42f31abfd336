//! Decisions whose metadata is a `<dl>` of `<dt>`/`<dd>` pairs and whose
//! judgment sits in `div.body`.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use caselaw_api::types::DecisionDetails;

use super::context::{ScrapeContext, ScrapeWarning};
use super::fields::{split_catchwords, split_lines, LabelMap};
use super::{ExtractError, Extractor};
use crate::html::{child_elements, has_class, inline_text, next_sibling_tag, selector, stripped_text};

static TERM: LazyLock<Selector> = LazyLock::new(|| selector("dt"));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| selector("p"));
static BODY: LazyLock<Selector> = LazyLock::new(|| selector("div.body"));
static STARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\*+$").expect("stars pattern"));

const CATCHWORD_SEPARATORS: [char; 2] = ['\u{2014}', '-'];
const IGNORED_PARAGRAPH_CLASSES: [&str; 2] = ["disclaimer", "lastupdate"];

/// A `<dd>` either holds paragraphs or plain text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Description {
    Text(String),
    Paragraphs(Vec<String>),
}

impl Description {
    fn text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Paragraphs(paras) => paras.join("\n"),
        }
    }

    fn first_paragraph(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Paragraphs(paras) => paras.first().cloned().unwrap_or_default(),
        }
    }

    fn paragraphs(&self) -> Vec<String> {
        match self {
            Self::Text(text) => split_lines(text),
            Self::Paragraphs(paras) => paras.clone(),
        }
    }
}

pub struct NewLayout;

impl NewLayout {
    /// Pairs every `<dt>` with the first `<dd>` after it.
    pub fn label_map(doc: &Html) -> Result<LabelMap<Description>, ExtractError> {
        let mut map = LabelMap::new();
        for term in doc.select(&TERM) {
            let label = inline_text(term);
            let description = next_sibling_tag(term, "dd")
                .ok_or_else(|| ExtractError::MissingDescription(label.clone()))?;
            let paras: Vec<String> = description.select(&PARAGRAPH).map(stripped_text).collect();
            let value = if paras.is_empty() {
                Description::Text(stripped_text(description))
            } else {
                Description::Paragraphs(paras)
            };
            map.insert(label, value);
        }
        Ok(map)
    }
}

impl Extractor for NewLayout {
    fn extract_metadata(
        &self,
        doc: &Html,
        ctx: &mut ScrapeContext,
    ) -> Result<DecisionDetails, ExtractError> {
        let map = Self::label_map(doc)?;
        let mut text = |label: &str| map.find(label, ctx).map(Description::text).unwrap_or_default();

        let mnc = text("Medium Neutral Citation");
        let hearing_dates = text("Hearing dates");
        let date_of_orders = text("Date of orders");
        let decision_date = text("Decision date");
        let jurisdiction = text("Jurisdiction");
        let before = text("Before");
        let category = text("Category");
        let file_number = text("File Number");
        let parties = split_lines(&text("Parties"));
        let representation = split_lines(&text("Representation"));

        let decision = map
            .find("Decision:", ctx)
            .map(Description::first_paragraph)
            .unwrap_or_default();
        let catchwords = map
            .find("Catchwords", ctx)
            .map(|d| split_catchwords(&d.first_paragraph(), &CATCHWORD_SEPARATORS))
            .unwrap_or_default();
        let mut citations = |label: &str| -> Vec<String> {
            map.find(label, ctx)
                .map(Description::paragraphs)
                .unwrap_or_default()
                .into_iter()
                .map(|c| c.replace('\n', " "))
                .collect()
        };
        let legislation_cited = citations("Legislation Cited");
        let cases_cited = citations("Cases Cited");

        Ok(DecisionDetails {
            mnc,
            hearing_dates,
            date_of_orders,
            decision_date,
            jurisdiction,
            before,
            decision,
            catchwords,
            legislation_cited,
            cases_cited,
            parties,
            category,
            file_number,
            representation,
            ..Default::default()
        })
    }

    /// Walks the direct children of `div.body`: headings become `##` lines,
    /// ordered lists are numbered from their `start`, plain paragraphs are
    /// kept unless they are footers or asterisk rules.
    fn extract_judgment(
        &self,
        doc: &Html,
        ctx: &mut ScrapeContext,
    ) -> Result<Vec<String>, ExtractError> {
        let Some(body) = doc.select(&BODY).next() else {
            ctx.warn(ScrapeWarning::MissingJudgmentBody);
            return Ok(Vec::new());
        };
        let mut paragraphs = Vec::new();
        for child in child_elements(body) {
            match child.value().name() {
                "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                    paragraphs.push(format!("##{}", stripped_text(child)));
                }
                "ol" => {
                    let start = list_start(child)?;
                    let items = child_elements(child).filter(|e| e.value().name() == "li");
                    for (offset, item) in (0i64..).zip(items) {
                        let n = start.checked_add(offset).ok_or_else(|| {
                            ExtractError::InvalidListStart(start.to_string())
                        })?;
                        paragraphs.push(format!("{} {}", n, stripped_text(item)));
                    }
                }
                "p" => {
                    if is_ignored(child) {
                        continue;
                    }
                    let text = stripped_text(child);
                    if !text.is_empty() {
                        paragraphs.push(text);
                    }
                }
                _ => {}
            }
        }
        Ok(paragraphs)
    }
}

fn list_start(list: ElementRef<'_>) -> Result<i64, ExtractError> {
    match list.value().attr("start") {
        None => Ok(1),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ExtractError::InvalidListStart(raw.to_string())),
    }
}

fn is_ignored(paragraph: ElementRef<'_>) -> bool {
    if IGNORED_PARAGRAPH_CLASSES
        .iter()
        .any(|class| has_class(paragraph, class))
    {
        return true;
    }
    STARS.is_match(&stripped_text(paragraph))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn judgment(body: &str) -> (Result<Vec<String>, ExtractError>, Vec<ScrapeWarning>) {
        let doc = Html::parse_document(&format!("<html><body>{}</body></html>", body));
        let mut ctx = ScrapeContext::default();
        let result = NewLayout.extract_judgment(&doc, &mut ctx);
        (result, ctx.into_warnings())
    }

    #[test]
    fn list_numbering_follows_start() {
        let (paras, _) = judgment(
            "<div class=\"body\"><ol start=\"7\"><li>Seven</li><li>Eight <ol><li>nested</li></ol></li></ol></div>",
        );
        assert_eq!(paras.unwrap(), vec!["7 Seven", "8 Eight\nnested"]);
    }

    #[test]
    fn list_without_start_counts_from_one() {
        let (paras, _) = judgment("<div class=\"body\"><ol><li>One</li></ol></div>");
        assert_eq!(paras.unwrap(), vec!["1 One"]);
    }

    #[test]
    fn bad_start_is_an_error() {
        let (result, _) = judgment("<div class=\"body\"><ol start=\"x\"><li>One</li></ol></div>");
        assert!(matches!(result, Err(ExtractError::InvalidListStart(s)) if s == "x"));
    }

    #[test]
    fn huge_start_numbers_without_overflow() {
        let (result, _) = judgment(
            "<div class=\"body\"><ol start=\"9223372036854775807\"><li>only item</li></ol></div>",
        );
        assert_eq!(result.unwrap(), vec!["9223372036854775807 only item"]);

        let (result, _) = judgment(
            "<div class=\"body\"><ol start=\"9223372036854775807\"><li>a</li><li>b</li></ol></div>",
        );
        assert!(matches!(
            result,
            Err(ExtractError::InvalidListStart(s)) if s == "9223372036854775807"
        ));
    }

    #[test]
    fn footers_and_stars_dropped() {
        let (paras, _) = judgment(
            "<div class=\"body\"><p>Kept</p><p>**********</p><p class=\"disclaimer\">Disclaimer</p>\
             <p class=\"small lastupdate\">Updated</p><p> </p><p>* not a rule</p></div>",
        );
        assert_eq!(paras.unwrap(), vec!["Kept", "* not a rule"]);
    }

    #[test]
    fn missing_body_warns() {
        let (paras, warnings) = judgment("<div><p>Loose</p></div>");
        assert!(paras.unwrap().is_empty());
        assert_eq!(warnings, vec![ScrapeWarning::MissingJudgmentBody]);
    }

    #[test]
    fn term_without_description_is_an_error() {
        let doc = Html::parse_document("<dl><dt>Parties:</dt></dl>");
        let err = NewLayout.extract_metadata(&doc, &mut ScrapeContext::default()).unwrap_err();
        assert!(matches!(err, ExtractError::MissingDescription(l) if l == "Parties:"));
    }

    #[test]
    fn flat_catchwords_are_split() {
        let doc = Html::parse_document(
            "<dl><dt>Catchwords:</dt><dd>TORTS \u{2014} negligence - duty of care</dd></dl>",
        );
        let details = NewLayout
            .extract_metadata(&doc, &mut ScrapeContext::default())
            .unwrap();
        assert_eq!(details.catchwords, vec!["TORTS", "negligence", "duty of care"]);
    }
}
