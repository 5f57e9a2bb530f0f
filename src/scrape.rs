//! End-to-end scrape: browser → markup → tree → records

use crate::browser::{BrowserSession, InteractionStep, LaunchOptions, PageDriver, SessionGuard};
use crate::dom::DocumentTree;
use crate::error::{Result, ScrapeError};
use crate::extract::{Assembly, FieldSpec, ScopeSpec, assemble_all};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

fn default_headless() -> bool {
    true
}

fn default_implicit_wait_secs() -> u64 {
    10
}

/// Everything needed to scrape one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScrapeConfig {
    /// Page to load
    pub url: String,

    /// Run the browser without a window (default: true)
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Seconds each element lookup and page load may block (default: 10)
    #[serde(default = "default_implicit_wait_secs")]
    pub implicit_wait_secs: u64,

    /// Interactions performed after navigation, in order
    #[serde(default)]
    pub steps: Vec<InteractionStep>,

    /// Container scopes, one record each, in output order
    pub scopes: Vec<ScopeSpec>,

    /// Fields read from every scope
    pub fields: Vec<FieldSpec>,
}

impl ScrapeConfig {
    pub fn new(url: impl Into<String>, scopes: Vec<ScopeSpec>, fields: Vec<FieldSpec>) -> Self {
        Self {
            url: url.into(),
            headless: default_headless(),
            implicit_wait_secs: default_implicit_wait_secs(),
            steps: Vec::new(),
            scopes,
            fields,
        }
    }

    pub fn with_steps(mut self, steps: Vec<InteractionStep>) -> Self {
        self.steps = steps;
        self
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn implicit_wait_secs(mut self, secs: u64) -> Self {
        self.implicit_wait_secs = secs;
        self
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// JSON Schema of the config file format
    pub fn json_schema() -> serde_json::Value {
        serde_json::to_value(schemars::schema_for!(ScrapeConfig)).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(ScrapeError::InvalidConfig("url must not be empty".to_string()));
        }

        if self.fields.is_empty() {
            return Err(ScrapeError::InvalidConfig("at least one field is required".to_string()));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.fields.iter().map(|f| f.name.as_str()).find(|name| !seen.insert(*name)) {
            return Err(ScrapeError::InvalidConfig(format!("duplicate field name '{}'", dup)));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.scopes.iter().map(|s| s.name.as_str()).find(|name| !seen.insert(*name)) {
            return Err(ScrapeError::InvalidConfig(format!("duplicate scope name '{}'", dup)));
        }

        Ok(())
    }

    pub fn launch_options(&self) -> LaunchOptions {
        LaunchOptions::new()
            .headless(self.headless)
            .implicit_wait(Duration::from_secs(self.implicit_wait_secs))
    }
}

/// Parse captured markup and extract every scope
pub fn extract_markup(markup: &str, config: &ScrapeConfig) -> Result<Assembly> {
    let tree = DocumentTree::parse(markup);
    assemble_all(&tree, &config.scopes, &config.fields)
}

/// Scrape with a caller-supplied driver, which is closed before returning
pub fn scrape_with<D: PageDriver>(driver: D, config: &ScrapeConfig) -> Result<Assembly> {
    let session = SessionGuard::new(driver);
    config.validate()?;
    let markup = session.capture(&config.url, &config.steps)?;
    let assembly = extract_markup(&markup, config)?;
    log::info!(
        "Extracted {} of {} scopes from {}",
        assembly.records.len(),
        config.scopes.len(),
        config.url
    );
    Ok(assembly)
}

/// Launch a Chrome session for `config` and scrape it
pub fn scrape(config: &ScrapeConfig) -> Result<Assembly> {
    config.validate()?;
    let session = BrowserSession::launch(config.launch_options())?;
    scrape_with(session, config)
}
