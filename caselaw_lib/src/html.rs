//! Small DOM helpers over `scraper` shared by the page parsers.

use scraper::{ElementRef, Selector};

/// Parses a selector literal. Only used for compile-time constants held in
/// `LazyLock` statics.
pub(crate) fn selector(css: &'static str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {:?}: {:?}", css, e))
}

/// Every descendant text node, trimmed, with empty ones dropped.
pub fn stripped_strings(element: ElementRef<'_>) -> Vec<&str> {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// The stripped strings joined with a newline.
pub fn stripped_text(element: ElementRef<'_>) -> String {
    stripped_strings(element).join("\n")
}

/// The stripped strings joined with a single space.
pub fn inline_text(element: ElementRef<'_>) -> String {
    stripped_strings(element).join(" ")
}

pub fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

pub fn is_tag(element: ElementRef<'_>, tag: &str) -> bool {
    element.value().name() == tag
}

/// Direct element children, in document order.
pub fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element.children().filter_map(ElementRef::wrap)
}

/// First following sibling element with the given tag.
pub fn next_sibling_tag<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|e| is_tag(*e, tag))
}
