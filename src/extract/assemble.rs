use crate::dom::DocumentTree;
use crate::error::{ExtractionError, Result, ScrapeError};
use crate::extract::field::{FieldSpec, ScopeSpec, extract};
use crate::extract::record::Record;

/// Outcome of extracting every configured scope
#[derive(Debug, Default)]
pub struct Assembly {
    /// Records of the scopes that succeeded, in scope order
    pub records: Vec<Record>,

    /// One diagnostic per skipped scope, in scope order
    pub failures: Vec<ExtractionError>,
}

impl Assembly {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run the extractor for each scope in order
///
/// A failing scope is logged and skipped. The call only fails when every
/// scope failed.
pub fn assemble_all(tree: &DocumentTree, scopes: &[ScopeSpec], fields: &[FieldSpec]) -> Result<Assembly> {
    let mut assembly = Assembly::default();

    for scope in scopes {
        match extract(tree, scope, fields) {
            Ok(record) => {
                log::debug!("Scope '{}': extracted {} fields", scope.name, record.len());
                assembly.records.push(record);
            }
            Err(e) => {
                log::warn!("Skipping scope '{}': {}", scope.name, e);
                assembly.failures.push(ExtractionError::new(&scope.name, e));
            }
        }
    }

    if assembly.records.is_empty() && !assembly.failures.is_empty() {
        return Err(ScrapeError::AllScopesFailed(assembly.failures));
    }

    Ok(assembly)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scopes() -> Vec<ScopeSpec> {
        vec![
            ScopeSpec::new("first", "section.one").unwrap(),
            ScopeSpec::new("second", "section.two").unwrap(),
            ScopeSpec::new("third", "section.three").unwrap(),
        ]
    }

    fn fields() -> Vec<FieldSpec> {
        vec![FieldSpec::first("heading", "h3").unwrap(), FieldSpec::all("notes", "li").unwrap()]
    }

    #[test]
    fn test_all_scopes_present() {
        let tree = DocumentTree::parse(
            r#"<section class="one"><h3>A</h3><li>x</li></section>
               <section class="two"><h3>B</h3></section>
               <section class="three"><h3>C</h3><li>y</li><li>z</li></section>"#,
        );
        let assembly = assemble_all(&tree, &scopes(), &fields()).unwrap();

        assert!(assembly.is_complete());
        let headings: Vec<&str> = assembly.records.iter().filter_map(|r| r.get("heading")).collect();
        assert_eq!(headings, vec!["A", "B", "C"]);
        assert_eq!(assembly.records[2].get("notes"), Some("yz"));
    }

    #[test]
    fn test_broken_scope_is_skipped() {
        let tree = DocumentTree::parse(
            r#"<section class="one"><h3>A</h3></section>
               <section class="two"><p>no heading</p></section>
               <section class="three"><h3>C</h3></section>"#,
        );
        let assembly = assemble_all(&tree, &scopes(), &fields()).unwrap();

        assert_eq!(assembly.records.len(), 2);
        assert_eq!(assembly.records[0].scope, "first");
        assert_eq!(assembly.records[1].scope, "third");
        assert_eq!(assembly.failures.len(), 1);
        assert_eq!(assembly.failures[0].scope, "second");
        assert_eq!(assembly.failures[0].field.as_deref(), Some("heading"));
    }

    #[test]
    fn test_every_scope_failing_is_an_error() {
        let tree = DocumentTree::parse("<p>nothing here</p>");
        let err = assemble_all(&tree, &scopes(), &fields()).unwrap_err();
        match err {
            ScrapeError::AllScopesFailed(failures) => {
                let names: Vec<&str> = failures.iter().map(|f| f.scope.as_str()).collect();
                assert_eq!(names, vec!["first", "second", "third"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_scopes_yields_empty_assembly() {
        let tree = DocumentTree::parse("<p>x</p>");
        let assembly = assemble_all(&tree, &[], &fields()).unwrap();
        assert!(assembly.records.is_empty());
        assert!(assembly.is_complete());
    }
}
