use crate::error::{Result, ScrapeError};
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A compiled path expression
///
/// Wraps a CSS selector together with the text it was compiled from, so
/// configuration can round-trip through serde and error messages can name the
/// original expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PathQuery {
    source: String,
    selector: Selector,
}

impl PathQuery {
    /// Compile a selector, rejecting invalid syntax
    pub fn parse(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let selector = Selector::parse(source.trim()).map_err(|e| ScrapeError::InvalidSelector {
            selector: source.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { source, selector })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }
}

impl PartialEq for PathQuery {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for PathQuery {}

impl fmt::Display for PathQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for PathQuery {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PathQuery {
    type Error = ScrapeError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<PathQuery> for String {
    fn from(query: PathQuery) -> Self {
        query.source
    }
}
