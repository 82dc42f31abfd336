//! Label-to-value maps and substring field resolution shared by both layouts.

use super::context::{ScrapeContext, ScrapeWarning};

/// Labels scraped from a decision's metadata block, in document order.
///
/// Site labels carry inconsistent trailing punctuation, so lookups match on
/// substrings. A repeated label keeps its first position and takes the later
/// value.
#[derive(Debug)]
pub struct LabelMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for LabelMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> LabelMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: String, value: V) {
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((label, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    /// Value of the first label containing `substring` (case-sensitive).
    ///
    /// Warns with [`ScrapeWarning::FieldNotFound`] when nothing matches and
    /// [`ScrapeWarning::AmbiguousField`] when more than one label does.
    pub fn find(&self, substring: &str, ctx: &mut ScrapeContext) -> Option<&V> {
        let mut matches = self
            .entries
            .iter()
            .filter(|(label, _)| label.contains(substring));
        let Some((first_label, value)) = matches.next() else {
            ctx.warn(ScrapeWarning::FieldNotFound {
                label: substring.to_string(),
            });
            return None;
        };
        let others: Vec<String> = matches.map(|(l, _)| l.clone()).collect();
        if !others.is_empty() {
            let mut labels = vec![first_label.clone()];
            labels.extend(others);
            ctx.warn(ScrapeWarning::AmbiguousField {
                label: substring.to_string(),
                matches: labels,
            });
        }
        Some(value)
    }
}

/// Non-empty lines of a text block.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Splits a catchwords string on any of `separators`, trimming each part.
/// A blank string has no catchwords.
pub fn split_catchwords(text: &str, separators: &[char]) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.split(separators)
        .map(|s| s.trim().to_string())
        .collect()
}
