//! Decisions laid out as tables: metadata in label/value rows, judgment
//! paragraphs as `<ul>` runs inside cells.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use caselaw_api::types::DecisionDetails;

use super::context::ScrapeContext;
use super::fields::{split_catchwords, split_lines, LabelMap};
use super::{ExtractError, Extractor};
use crate::html::{selector, stripped_text};

static ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static CELL: LazyLock<Selector> = LazyLock::new(|| selector("td"));
static LIST: LazyLock<Selector> = LazyLock::new(|| selector("ul"));

pub struct OldLayout;

impl OldLayout {
    /// Maps the second cell of every row with three or more cells to the third.
    pub fn label_map(doc: &Html) -> LabelMap<String> {
        let mut map = LabelMap::new();
        for row in doc.select(&ROW) {
            let cells: Vec<ElementRef<'_>> = row.select(&CELL).collect();
            if cells.len() >= 3 {
                map.insert(stripped_text(cells[1]), stripped_text(cells[2]));
            }
        }
        map
    }
}

impl Extractor for OldLayout {
    fn extract_metadata(
        &self,
        doc: &Html,
        ctx: &mut ScrapeContext,
    ) -> Result<DecisionDetails, ExtractError> {
        let map = Self::label_map(doc);
        let mut text = |label: &str| map.find(label, ctx).cloned().unwrap_or_default();

        let mnc = text("CITATION");
        let hearing_dates = text("HEARING DATE");
        let date_of_orders = text("DATE OF ORDERS");
        let decision_date = text("JUDGMENT DATE");
        let jurisdiction = text("JURISDICTION");
        let before = text("JUDGMENT OF");
        let decision = text("DECISION");
        let catchwords = split_catchwords(&text("CATCHWORDS"), &['-']);
        let legislation_cited = split_lines(&text("LEGISLATION CITED"));
        let cases_cited = split_lines(&text("CASES CITED"));
        let parties = split_lines(&text("PARTIES"));
        let category = text("CATEGORY");
        let file_number = text("FILE NUMBER");

        let mut representation = split_lines(&text("COUNSEL"));
        representation.extend(split_lines(&text("SOLICITORS")));

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

    /// Rebuilds paragraphs from list-bearing cells.
    ///
    /// Each `<ul>` child of such a cell closes the current paragraph (its own
    /// text, an indented passage, is appended to that paragraph first) and
    /// opens a new one. Other content, including whole cells without lists,
    /// is appended to the open paragraph. Content before the first `<ul>`
    /// has no paragraph to join and is dropped.
    fn extract_judgment(
        &self,
        doc: &Html,
        _ctx: &mut ScrapeContext,
    ) -> Result<Vec<String>, ExtractError> {
        let mut paragraphs: Vec<Vec<String>> = Vec::new();
        for cell in doc.select(&CELL) {
            if cell.select(&LIST).next().is_none() {
                let text = stripped_text(cell);
                if let Some(open) = paragraphs.last_mut() {
                    if !text.is_empty() {
                        open.push(text);
                    }
                }
                continue;
            }
            for child in cell.children() {
                match ElementRef::wrap(child) {
                    Some(element) if element.value().name() == "ul" => {
                        let passage = stripped_text(element);
                        if let Some(open) = paragraphs.last_mut() {
                            if !passage.is_empty() {
                                open.push(passage);
                            }
                        }
                        paragraphs.push(Vec::new());
                    }
                    Some(element) => {
                        let text: String = element.text().collect();
                        append_trimmed(&mut paragraphs, &text);
                    }
                    None => {
                        if let Some(text) = child.value().as_text() {
                            append_trimmed(&mut paragraphs, text);
                        }
                    }
                }
            }
        }
        Ok(paragraphs
            .into_iter()
            .map(|parts| parts.join(" "))
            .filter(|p| !p.trim().is_empty())
            .collect())
    }
}

fn append_trimmed(paragraphs: &mut [Vec<String>], text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if let Some(open) = paragraphs.last_mut() {
        open.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn judgment(html: &str) -> Vec<String> {
        let doc = Html::parse_document(html);
        OldLayout
            .extract_judgment(&doc, &mut ScrapeContext::default())
            .unwrap()
    }

    #[test]
    fn text_before_first_list_is_dropped() {
        let paras = judgment(
            "<table><tr><td>Preamble <ul></ul>First paragraph</td></tr></table>",
        );
        assert_eq!(paras, vec!["First paragraph"]);
    }

    #[test]
    fn indented_passage_joins_previous_paragraph() {
        let paras = judgment(
            "<table><tr><td><ul></ul>He said:<ul><li>quoted passage</li></ul>Next point.</td></tr></table>",
        );
        assert_eq!(paras, vec!["He said: quoted passage", "Next point."]);
    }

    #[test]
    fn cells_without_lists_extend_open_paragraph() {
        let paras = judgment(
            "<table><tr><td>ignored before</td></tr><tr><td><ul></ul>Orders</td></tr>\
             <tr><td>as made</td></tr></table>",
        );
        assert_eq!(paras, vec!["Orders as made"]);
    }

    #[test]
    fn empty_paragraphs_dropped() {
        let paras = judgment("<table><tr><td><ul></ul><ul></ul>  <ul></ul>End</td></tr></table>");
        assert_eq!(paras, vec!["End"]);
    }

    #[test]
    fn representation_is_counsel_then_solicitors() {
        let doc = Html::parse_document(
            "<table><tr><td></td><td>COUNSEL:</td><td>Mr A (Plaintiff)<br>Ms B (Defendant)</td></tr>\
             <tr><td></td><td>SOLICITORS:</td><td>Firm C (Plaintiff)</td></tr></table>",
        );
        let details = OldLayout
            .extract_metadata(&doc, &mut ScrapeContext::default())
            .unwrap();
        assert_eq!(
            details.representation,
            vec!["Mr A (Plaintiff)", "Ms B (Defendant)", "Firm C (Plaintiff)"]
        );
    }

    #[test]
    fn catchwords_split_on_hyphen_only() {
        let doc = Html::parse_document(
            "<table><tr><td></td><td>CATCHWORDS :</td>\
             <td>CRIMINAL LAW \u{2014} bail - show cause</td></tr></table>",
        );
        let details = OldLayout
            .extract_metadata(&doc, &mut ScrapeContext::default())
            .unwrap();
        assert_eq!(details.catchwords, vec!["CRIMINAL LAW \u{2014} bail", "show cause"]);
    }

    #[test]
    fn short_rows_ignored() {
        let doc = Html::parse_document(
            "<table><tr><td>x</td><td>CITATION:</td></tr><tr><td></td><td>CITATION:</td><td>[1999] NSWSC 1</td></tr></table>",
        );
        let map = OldLayout::label_map(&doc);
        assert_eq!(map.len(), 1);
    }
}
