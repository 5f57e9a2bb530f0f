//! # page-extract
//!
//! A Rust library for extracting structured fields from browser-rendered pages via
//! Chrome DevTools Protocol (CDP) and declarative path queries.
//!
//! ## Features
//!
//! - **Browser Session Management**: Launch Chrome/Chromium, navigate, run declarative
//!   click/type/submit steps and capture the rendered markup
//! - **Guaranteed Release**: The browser is closed exactly once on every exit path
//! - **Document Parsing**: Lenient HTML parsing into an immutable, query-able tree
//! - **Field Extraction**: Per-scope records from named selectors with
//!   first-match-required or join-all cardinality
//!
//! ## Usage
//!
//! ### Scraping a Page
//!
//! ```rust,no_run
//! use page_extract::presets;
//!
//! # fn main() -> page_extract::Result<()> {
//! let config = presets::weather_forecast("edmonton")?;
//! let assembly = page_extract::scrape(&config)?;
//!
//! for record in &assembly.records {
//!     println!("{}: {:?}", record.scope, record.get("forecast"));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Extracting From Captured Markup
//!
//! ```rust
//! use page_extract::{DocumentTree, FieldSpec, ScopeSpec, assemble_all};
//!
//! # fn main() -> page_extract::Result<()> {
//! let tree = DocumentTree::parse(r#"<div class="day"><span>Sun</span></div>"#);
//! let scopes = vec![ScopeSpec::new("sunday", "div.day")?];
//! let fields = vec![FieldSpec::first("name", "span")?];
//!
//! let assembly = assemble_all(&tree, &scopes, &fields)?;
//! assert_eq!(assembly.records[0].get("name"), Some("Sun"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: Browser session management, interaction steps and the driver seam
//! - [`dom`]: Document parsing and path queries
//! - [`extract`]: Field specs, per-scope extraction and record assembly
//! - [`scrape`]: Scrape configuration and the end-to-end pipeline
//! - [`presets`]: Weather forecast and news article configurations
//! - [`error`]: Error types and result aliases

pub mod browser;
pub mod dom;
pub mod error;
pub mod extract;
pub mod presets;
pub mod scrape;

pub use browser::{BrowserSession, InteractionStep, LaunchOptions, PageDriver, SessionGuard};
pub use dom::{DocumentTree, PathQuery};
pub use error::{ExtractionError, Result, ScrapeError};
pub use extract::{Anchor, Assembly, Cardinality, FieldSpec, Record, ScopeSpec, ValueSource, assemble_all, extract};
pub use scrape::{ScrapeConfig, extract_markup, scrape, scrape_with};
