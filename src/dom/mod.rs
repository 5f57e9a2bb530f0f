//! Document parsing and path queries
//!
//! This module turns captured markup into something the extractor can query:
//! - PathQuery: a compiled selector with its source text
//! - DocumentTree: an immutable parsed document with scoped query evaluation

pub mod query;
pub mod tree;

pub use query::PathQuery;
pub use tree::{DocumentTree, deep_text, own_text};
