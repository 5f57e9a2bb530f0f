//! Browser session management
//!
//! This module owns everything that talks to a live browser:
//! - LaunchOptions: how the Chrome process is started and how long lookups may wait
//! - InteractionStep: declarative click/type/submit steps
//! - PageDriver: the navigate/interact/capture/close capability
//! - BrowserSession: the headless_chrome implementation of PageDriver
//! - SessionGuard: closes a driver exactly once on every exit path

pub mod config;
pub mod driver;
pub mod session;
pub mod step;

pub use config::{DEFAULT_IMPLICIT_WAIT, LaunchOptions};
pub use driver::{PageDriver, SessionGuard, capture_rendered};
pub use session::BrowserSession;
pub use step::InteractionStep;
