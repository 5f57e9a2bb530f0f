use std::path::PathBuf;
use std::time::Duration;

/// Default time budget for resolving an interaction target
pub const DEFAULT_IMPLICIT_WAIT: Duration = Duration::from_secs(10);

/// Headroom on top of the implicit wait before an idle browser is shut down
const IDLE_HEADROOM: Duration = Duration::from_secs(120);

/// Options for launching a browser session
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Run without a visible window (default: true)
    pub headless: bool,

    /// How long every element lookup and page load may block
    pub implicit_wait: Duration,

    pub window_width: u32,
    pub window_height: u32,

    /// Chrome/Chromium binary, auto-detected when unset
    pub chrome_path: Option<PathBuf>,

    /// Persistent profile directory
    pub user_data_dir: Option<PathBuf>,

    /// Chrome sandbox (disable when running as root in containers)
    pub sandbox: bool,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            implicit_wait: DEFAULT_IMPLICIT_WAIT,
            window_width: 1280,
            window_height: 1024,
            chrome_path: None,
            user_data_dir: None,
            sandbox: true,
        }
    }
}

impl LaunchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn implicit_wait(mut self, wait: Duration) -> Self {
        self.implicit_wait = wait;
        self
    }

    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    pub fn chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    pub fn user_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.user_data_dir = Some(dir.into());
        self
    }

    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// How long the browser may sit idle: slow pages plus the full wait budget
    pub fn idle_timeout(&self) -> Duration {
        IDLE_HEADROOM.saturating_add(self.implicit_wait)
    }
}
