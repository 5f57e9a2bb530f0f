//! Error types for page extraction

use thiserror::Error;

/// Errors raised while driving the browser or extracting fields
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Browser process could not be started
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Page could not be loaded
    #[error("Navigation to {url} failed: {reason}")]
    NavigationFailed { url: String, reason: String },

    /// Interaction target was not resolvable within the wait budget
    #[error("Element {locator} not found: {reason}")]
    ElementNotFound { locator: String, reason: String },

    /// Element was found but the click/keystroke could not be delivered
    #[error("Interaction with {locator} failed: {reason}")]
    InteractionFailed { locator: String, reason: String },

    /// Rendered markup could not be read from the page
    #[error("Failed to capture page content: {0}")]
    CaptureFailed(String),

    /// Session teardown failed
    #[error("Failed to close browser session: {0}")]
    CloseFailed(String),

    /// Page operation attempted after the session was closed
    #[error("Browser session is already closed")]
    SessionClosed,

    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Container scope matched nothing in the document
    #[error("Scope '{scope}' matched no element")]
    ScopeNotFound { scope: String },

    /// A required field yielded no value within its scope
    #[error("Required field '{field}' missing in scope '{scope}'")]
    FieldMissing { field: String, scope: String },

    /// Every configured scope failed, nothing to return
    #[error("All {} scopes failed extraction", .0.len())]
    AllScopesFailed(Vec<ExtractionError>),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    /// Name of the missing field, if this is a field failure
    pub fn missing_field(&self) -> Option<&str> {
        match self {
            ScrapeError::FieldMissing { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Failure of one container scope, kept as a diagnostic by the assembler
#[derive(Debug, Error)]
#[error("Extraction failed for scope '{scope}': {source}")]
pub struct ExtractionError {
    /// Name of the scope that was skipped
    pub scope: String,

    /// Field that caused the failure, when one is known
    pub field: Option<String>,

    #[source]
    pub source: ScrapeError,
}

impl ExtractionError {
    pub fn new(scope: impl Into<String>, source: ScrapeError) -> Self {
        let field = source.missing_field().map(str::to_string);
        Self { scope: scope.into(), field, source }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_missing_message() {
        let err = ScrapeError::FieldMissing {
            field: "subtitle".to_string(),
            scope: "body".to_string(),
        };
        assert_eq!(err.to_string(), "Required field 'subtitle' missing in scope 'body'");
        assert_eq!(err.missing_field(), Some("subtitle"));
    }

    #[test]
    fn test_navigation_error_names_url() {
        let err = ScrapeError::NavigationFailed {
            url: "https://example.com".to_string(),
            reason: "dns".to_string(),
        };
        assert!(err.missing_field().is_none());
        assert!(err.to_string().contains("https://example.com"));
    }

    #[test]
    fn test_extraction_error_records_field() {
        let err = ExtractionError::new(
            "monday",
            ScrapeError::FieldMissing {
                field: "pop".to_string(),
                scope: "div.dotw_1".to_string(),
            },
        );
        assert_eq!(err.scope, "monday");
        assert_eq!(err.field.as_deref(), Some("pop"));
        assert!(err.to_string().starts_with("Extraction failed for scope 'monday'"));
    }

    #[test]
    fn test_all_scopes_failed_counts() {
        let failures = vec![
            ExtractionError::new("a", ScrapeError::ScopeNotFound { scope: "div.a".to_string() }),
            ExtractionError::new("b", ScrapeError::ScopeNotFound { scope: "div.b".to_string() }),
        ];
        let err = ScrapeError::AllScopesFailed(failures);
        assert_eq!(err.to_string(), "All 2 scopes failed extraction");
    }

    #[test]
    fn test_closed_session_is_not_a_close_failure() {
        let err = ScrapeError::SessionClosed;
        assert_eq!(err.to_string(), "Browser session is already closed");
        assert!(!matches!(err, ScrapeError::CloseFailed(_)));
    }
}
