use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Values extracted from one container scope, in field order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Name of the scope the record came from
    pub scope: String,

    /// Field name to extracted value
    pub fields: IndexMap<String, String>,
}

impl Record {
    pub fn new(scope: impl Into<String>) -> Self {
        Self { scope: scope.into(), fields: IndexMap::new() }
    }

    pub(crate) fn insert(&mut self, name: String, value: String) {
        self.fields.insert(name, value);
    }

    /// Value of a field by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Fields in extraction order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
