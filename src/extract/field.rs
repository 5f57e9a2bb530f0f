use crate::dom::{DocumentTree, PathQuery, deep_text, own_text};
use crate::error::{Result, ScrapeError};
use crate::extract::record::Record;
use schemars::JsonSchema;
use scraper::ElementRef;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How many matches a field expects and how they are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// Take the first value; the scope fails if there is none
    #[default]
    First,

    /// Concatenate every value with no separator; empty is allowed
    All,
}

/// What is read from each matched element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    /// Direct child text nodes, one value per node
    #[default]
    Text,

    /// All descendant text, one value per element
    DeepText,

    /// Value of the named attribute, elements without it are skipped
    Attribute(String),
}

impl ValueSource {
    fn read(&self, element: ElementRef<'_>, out: &mut Vec<String>) {
        match self {
            ValueSource::Text => out.extend(own_text(element).into_iter().map(str::to_string)),
            ValueSource::DeepText => out.push(deep_text(element)),
            ValueSource::Attribute(name) => {
                if let Some(value) = element.value().attr(name) {
                    out.push(value.to_string());
                }
            }
        }
    }
}

/// Where a field query is evaluated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Under each root matched by the container scope
    #[default]
    Scope,

    /// Against the whole document, ignoring the scope
    Document,
}

/// A named field and the query that locates it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldSpec {
    pub name: String,

    /// Selector relative to the scope root
    #[schemars(with = "String")]
    pub path: PathQuery,

    #[serde(default)]
    pub cardinality: Cardinality,

    #[serde(default)]
    pub value: ValueSource,

    #[serde(default)]
    pub anchor: Anchor,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, path: &str, cardinality: Cardinality) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            path: PathQuery::parse(path)?,
            cardinality,
            value: ValueSource::default(),
            anchor: Anchor::default(),
        })
    }

    /// Field that must yield at least one value
    pub fn first(name: impl Into<String>, path: &str) -> Result<Self> {
        Self::new(name, path, Cardinality::First)
    }

    /// Field whose values are concatenated, possibly to an empty string
    pub fn all(name: impl Into<String>, path: &str) -> Result<Self> {
        Self::new(name, path, Cardinality::All)
    }

    pub fn with_value(mut self, value: ValueSource) -> Self {
        self.value = value;
        self
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn is_required(&self) -> bool {
        self.cardinality == Cardinality::First
    }

    /// Values of this field in document order, before cardinality is applied
    fn values<'a>(&self, tree: &'a DocumentTree, roots: &[ElementRef<'a>]) -> Vec<String> {
        let matches = match self.anchor {
            Anchor::Document => tree.query(&self.path),
            Anchor::Scope => {
                let mut seen = HashSet::new();
                roots
                    .iter()
                    .flat_map(|root| tree.query_within(*root, &self.path))
                    .filter(|element| seen.insert(element.id()))
                    .collect()
            }
        };

        let mut values = Vec::new();
        for element in matches {
            self.value.read(element, &mut values);
        }
        values
    }
}

/// A repeating region of the page that yields one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScopeSpec {
    pub name: String,

    #[schemars(with = "String")]
    pub path: PathQuery,
}

impl ScopeSpec {
    pub fn new(name: impl Into<String>, path: &str) -> Result<Self> {
        Ok(Self { name: name.into(), path: PathQuery::parse(path)? })
    }
}

/// Replace non-breaking spaces with ordinary spaces and trim
pub fn normalize(text: &str) -> String {
    text.replace('\u{a0}', " ").trim().to_string()
}

/// Extract every field of one scope
///
/// All-or-nothing: the first required field without a value fails the whole
/// scope with [`ScrapeError::FieldMissing`].
pub fn extract(tree: &DocumentTree, scope: &ScopeSpec, fields: &[FieldSpec]) -> Result<Record> {
    let roots = tree.query(&scope.path);
    if roots.is_empty() && fields.iter().any(|f| f.anchor == Anchor::Scope) {
        return Err(ScrapeError::ScopeNotFound { scope: scope.path.to_string() });
    }

    let mut record = Record::new(&scope.name);
    for field in fields {
        let values = field.values(tree, &roots);
        let value = match field.cardinality {
            Cardinality::First => match values.first() {
                Some(first) => normalize(first),
                None => {
                    return Err(ScrapeError::FieldMissing {
                        field: field.name.clone(),
                        scope: scope.path.to_string(),
                    });
                }
            },
            Cardinality::All => normalize(&values.concat()),
        };
        record.insert(field.name.clone(), value);
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = r#"
        <html><body>
          <h1 class="detailHeadline">Edmonton AI firm grows</h1>
          <h2 class="deck">A second office&nbsp;opens</h2>
          <div class="story">
            <span><p>First&nbsp;paragraph. </p><p>Second <a href="/x">link</a> paragraph.</p></span>
          </div>
          <a class="source" href="https://example.com/story">src</a>
        </body></html>
    "#;

    fn body() -> ScopeSpec {
        ScopeSpec::new("article", "body").unwrap()
    }

    #[test]
    fn test_first_match_normalized() {
        let tree = DocumentTree::parse(ARTICLE);
        let fields = vec![FieldSpec::first("subtitle", "h2.deck").unwrap()];
        let record = extract(&tree, &body(), &fields).unwrap();
        assert_eq!(record.get("subtitle"), Some("A second office opens"));
    }

    #[test]
    fn test_all_matches_joined_without_separator() {
        let tree = DocumentTree::parse(ARTICLE);
        let fields = vec![FieldSpec::all("body", "div.story > span > p").unwrap()];
        let record = extract(&tree, &body(), &fields).unwrap();
        // Only direct text nodes, the link text is not part of the paragraph's own text
        assert_eq!(record.get("body"), Some("First paragraph. Second  paragraph."));
    }

    #[test]
    fn test_all_matches_deep_text() {
        let tree = DocumentTree::parse(ARTICLE);
        let fields =
            vec![FieldSpec::all("body", "div.story p").unwrap().with_value(ValueSource::DeepText)];
        let record = extract(&tree, &body(), &fields).unwrap();
        assert_eq!(record.get("body"), Some("First paragraph. Second link paragraph."));
    }

    #[test]
    fn test_all_matches_empty_is_tolerated() {
        let tree = DocumentTree::parse(ARTICLE);
        let fields = vec![FieldSpec::all("captions", "figcaption").unwrap()];
        let record = extract(&tree, &body(), &fields).unwrap();
        assert_eq!(record.get("captions"), Some(""));
    }

    #[test]
    fn test_attribute_value() {
        let tree = DocumentTree::parse(ARTICLE);
        let fields = vec![
            FieldSpec::first("source", "a.source")
                .unwrap()
                .with_value(ValueSource::Attribute("href".to_string())),
        ];
        let record = extract(&tree, &body(), &fields).unwrap();
        assert_eq!(record.get("source"), Some("https://example.com/story"));
    }

    #[test]
    fn test_missing_required_field_fails_scope() {
        let tree = DocumentTree::parse(ARTICLE);
        let fields = vec![
            FieldSpec::first("title", "h1.detailHeadline").unwrap(),
            FieldSpec::first("byline", "span.byline").unwrap(),
        ];
        let err = extract(&tree, &body(), &fields).unwrap_err();
        match err {
            ScrapeError::FieldMissing { field, scope } => {
                assert_eq!(field, "byline");
                assert_eq!(scope, "body");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_blank_first_text_node_satisfies_required_field() {
        let fields = vec![FieldSpec::first("day", "span.day").unwrap()];
        let scope = ScopeSpec::new("sunday", "div.col").unwrap();

        for markup in [
            r#"<div class="col"><span class="day">&nbsp;</span></div>"#,
            "<div class=\"col\"><span class=\"day\">\n <b>Sun</b></span></div>",
        ] {
            let record = extract(&DocumentTree::parse(markup), &scope, &fields).unwrap();
            assert_eq!(record.get("day"), Some(""));
        }

        // No text node at all is still a missing field
        let empty = DocumentTree::parse(r#"<div class="col"><span class="day"></span></div>"#);
        let err = extract(&empty, &scope, &fields).unwrap_err();
        assert_eq!(err.missing_field(), Some("day"));
    }

    #[test]
    fn test_scope_not_found() {
        let tree = DocumentTree::parse(ARTICLE);
        let scope = ScopeSpec::new("aside", "aside.related").unwrap();
        let fields = vec![FieldSpec::all("links", "a").unwrap()];
        let err = extract(&tree, &scope, &fields).unwrap_err();
        assert!(matches!(err, ScrapeError::ScopeNotFound { ref scope } if scope == "aside.related"));
    }

    #[test]
    fn test_scope_limits_field_matches() {
        let tree = DocumentTree::parse(
            r#"<div class="d0"><span class="day">Sun</span></div>
               <div class="d1"><span class="day">Mon</span></div>"#,
        );
        let scope = ScopeSpec::new("monday", "div.d1").unwrap();
        let fields = vec![FieldSpec::first("day", "span.day").unwrap()];
        let record = extract(&tree, &scope, &fields).unwrap();
        assert_eq!(record.get("day"), Some("Mon"));
    }

    #[test]
    fn test_document_anchor_ignores_scope() {
        let tree = DocumentTree::parse(
            r#"<div class="d0"><span class="day">Sun</span></div>
               <div class="d1"><span class="day">Mon</span></div>"#,
        );
        let scope = ScopeSpec::new("monday", "div.d1").unwrap();
        let fields = vec![FieldSpec::first("day", "span.day").unwrap().with_anchor(Anchor::Document)];
        let record = extract(&tree, &scope, &fields).unwrap();
        assert_eq!(record.get("day"), Some("Sun"));

        // Document-anchored fields do not need the scope to exist
        let gone = ScopeSpec::new("friday", "div.d5").unwrap();
        assert!(extract(&tree, &gone, &fields).is_ok());
    }

    #[test]
    fn test_overlapping_scope_roots_do_not_duplicate() {
        let tree = DocumentTree::parse(r#"<div class="s"><div class="s"><p>x</p></div></div>"#);
        let scope = ScopeSpec::new("nested", "div.s").unwrap();
        let fields = vec![FieldSpec::all("text", "p").unwrap()];
        let record = extract(&tree, &scope, &fields).unwrap();
        assert_eq!(record.get("text"), Some("x"));
    }

    #[test]
    fn test_extract_is_deterministic() {
        let tree = DocumentTree::parse(ARTICLE);
        let fields = vec![
            FieldSpec::first("title", "h1.detailHeadline").unwrap(),
            FieldSpec::all("body", "div.story > span > p").unwrap(),
        ];
        let first = extract(&tree, &body(), &fields).unwrap();
        let second = extract(&tree, &body(), &fields).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["\u{a0} 12\u{a0}°C \u{a0}", "plain", "", "  a  b  "] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
        assert_eq!(normalize("\u{a0}12\u{a0}°C "), "12 °C");
    }

    #[test]
    fn test_field_spec_json_defaults() {
        let field: FieldSpec = serde_json::from_value(serde_json::json!({
            "name": "day",
            "path": "span[class='day']"
        }))
        .unwrap();
        assert!(field.is_required());
        assert_eq!(field.value, ValueSource::Text);
        assert_eq!(field.anchor, Anchor::Scope);

        let field: FieldSpec = serde_json::from_value(serde_json::json!({
            "name": "link",
            "path": "a",
            "cardinality": "all",
            "value": {"attribute": "href"},
            "anchor": "document"
        }))
        .unwrap();
        assert_eq!(field.cardinality, Cardinality::All);
        assert_eq!(field.value, ValueSource::Attribute("href".to_string()));
        assert_eq!(field.anchor, Anchor::Document);
    }
}
