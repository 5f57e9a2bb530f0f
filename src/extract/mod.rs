//! Declarative field extraction
//!
//! - FieldSpec / ScopeSpec: what to read and where
//! - extract: one scope to one Record, all-or-nothing
//! - assemble_all: every scope in order, skip-and-continue

pub mod assemble;
pub mod field;
pub mod record;

pub use assemble::{Assembly, assemble_all};
pub use field::{Anchor, Cardinality, FieldSpec, ScopeSpec, ValueSource, extract, normalize};
pub use record::Record;
