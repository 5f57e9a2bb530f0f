use crate::dom::query::PathQuery;
use scraper::{ElementRef, Html};

/// Immutable parsed snapshot of one rendered page
#[derive(Debug, Clone)]
pub struct DocumentTree {
    html: Html,
}

impl DocumentTree {
    /// Parse a full document
    ///
    /// Never fails: malformed markup is repaired the way browsers do, and a
    /// missing node only shows up later as an empty query result.
    pub fn parse(markup: &str) -> Self {
        let tree = Self { html: Html::parse_document(markup) };
        if tree.parse_error_count() > 0 {
            log::debug!("Parsed document with {} recoverable markup errors", tree.parse_error_count());
        }
        tree
    }

    /// Parse a markup fragment (no implied `<html>`/`<body>` wrapping)
    pub fn parse_fragment(markup: &str) -> Self {
        Self { html: Html::parse_fragment(markup) }
    }

    /// Root element of the tree
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// All matches of `query` in the whole document, in document order
    pub fn query(&self, query: &PathQuery) -> Vec<ElementRef<'_>> {
        self.html.select(query.selector()).collect()
    }

    /// Matches of `query` among the descendants of `scope`, in document order
    pub fn query_within<'a>(&'a self, scope: ElementRef<'a>, query: &PathQuery) -> Vec<ElementRef<'a>> {
        scope.select(query.selector()).collect()
    }

    /// Number of markup errors the parser recovered from
    pub fn parse_error_count(&self) -> usize {
        self.html.errors.len()
    }
}

/// Text nodes that are direct children of `element`
pub fn own_text<'a>(element: ElementRef<'a>) -> Vec<&'a str> {
    element
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|text| &**text)
        .collect()
}

/// All descendant text of `element`, concatenated
pub fn deep_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
