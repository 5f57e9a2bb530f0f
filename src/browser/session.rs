use crate::{browser::config::LaunchOptions,
            browser::driver::PageDriver,
            browser::step::InteractionStep,
            error::{Result, ScrapeError}};
use headless_chrome::{Browser, Element, Tab};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// Browser session that manages a Chrome/Chromium instance and one tab
pub struct BrowserSession {
    /// The underlying headless_chrome Browser, `None` once closed
    browser: Option<Browser>,

    /// Tab every navigation and interaction goes through
    tab: Arc<Tab>,

    options: LaunchOptions,

    /// Last URL passed to [`PageDriver::navigate`]
    current_url: Option<String>,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        launch_opts.idle_browser_timeout = options.idle_timeout();

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        launch_opts.sandbox = options.sandbox;

        if let Some(path) = &options.chrome_path {
            launch_opts.path = Some(path.clone());
        }

        if let Some(dir) = &options.user_data_dir {
            launch_opts.user_data_dir = Some(dir.clone());
        }

        log::info!(
            "Launching {} browser (implicit wait {:?})",
            if options.headless { "headless" } else { "headed" },
            options.implicit_wait
        );

        let browser = Browser::new(launch_opts).map_err(|e| ScrapeError::LaunchFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| ScrapeError::LaunchFailed(format!("Failed to create tab: {}", e)))?;
        tab.set_default_timeout(options.implicit_wait);

        Ok(Self { browser: Some(browser), tab, options, current_url: None })
    }

    /// Launch a browser with default options
    pub fn new() -> Result<Self> {
        Self::launch(LaunchOptions::default())
    }

    pub fn options(&self) -> &LaunchOptions {
        &self.options
    }

    pub fn is_headless(&self) -> bool {
        self.options.headless
    }

    pub fn implicit_wait(&self) -> Duration {
        self.options.implicit_wait
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.browser.is_none()
    }

    pub fn tab(&self) -> Result<&Arc<Tab>> {
        if self.is_closed() {
            return Err(ScrapeError::SessionClosed);
        }
        Ok(&self.tab)
    }

    /// Wait up to the implicit-wait budget for an element matching `css_selector`
    fn find_element(&self, css_selector: &str) -> Result<Element<'_>> {
        self.tab()?
            .wait_for_element_with_custom_timeout(css_selector, self.options.implicit_wait)
            .map_err(|e| ScrapeError::ElementNotFound {
                locator: css_selector.to_string(),
                reason: e.to_string(),
            })
    }

    fn click(&self, css_selector: &str) -> Result<()> {
        let element = self.find_element(css_selector)?;
        element.click().map_err(|e| ScrapeError::InteractionFailed {
            locator: css_selector.to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }

    fn type_into(&self, css_selector: &str, text: &str) -> Result<()> {
        let element = self.find_element(css_selector)?;
        element
            .click()
            .and_then(|el| el.type_into(text))
            .map_err(|e| ScrapeError::InteractionFailed {
                locator: css_selector.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    fn wait_for_navigation(&self) -> Result<()> {
        self.tab()?.wait_until_navigated().map_err(|e| ScrapeError::NavigationFailed {
            url: self.current_url.clone().unwrap_or_default(),
            reason: format!("Navigation timeout: {}", e),
        })?;
        Ok(())
    }
}

impl PageDriver for BrowserSession {
    fn navigate(&mut self, url: &str) -> Result<()> {
        self.current_url = Some(url.to_string());

        self.tab()?
            .navigate_to(url)
            .map_err(|e| ScrapeError::NavigationFailed { url: url.to_string(), reason: e.to_string() })?;

        self.wait_for_navigation()
    }

    fn perform(&mut self, step: &InteractionStep) -> Result<()> {
        match step {
            InteractionStep::ClickById { .. }
            | InteractionStep::ClickByClass { .. }
            | InteractionStep::ClickBySelector { .. } => {
                let locator = step.locator().unwrap_or_default();
                self.click(&locator)
            }
            InteractionStep::TypeIntoById { text, .. } => {
                let locator = step.locator().unwrap_or_default();
                self.type_into(&locator, text)
            }
            InteractionStep::Submit => {
                self.tab()?.press_key("Enter").map_err(|e| ScrapeError::InteractionFailed {
                    locator: "Enter".to_string(),
                    reason: e.to_string(),
                })?;
                Ok(())
            }
        }
    }

    fn capture_page(&mut self) -> Result<String> {
        self.tab()?.get_content().map_err(|e| ScrapeError::CaptureFailed(e.to_string()))
    }

    /// Close the tab and shut the browser process down
    fn close(&mut self) -> Result<()> {
        let Some(browser) = self.browser.take() else {
            return Ok(());
        };

        let closed = self.tab.close(false);

        // Dropping the Browser kills the Chrome process
        drop(browser);
        log::info!("Browser session closed");

        closed
            .map(|_| ())
            .map_err(|e| ScrapeError::CloseFailed(format!("Failed to close tab: {}", e)))
    }
}
