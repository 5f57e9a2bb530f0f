use crate::browser::step::InteractionStep;
use crate::error::Result;

/// Capability the extraction pipeline needs from a browser
///
/// [`BrowserSession`](crate::browser::BrowserSession) is the Chrome-backed
/// implementation; tests substitute in-memory drivers.
pub trait PageDriver {
    /// Load `url` and wait until navigation settles
    fn navigate(&mut self, url: &str) -> Result<()>;

    /// Execute one interaction step, blocking until its target resolves
    fn perform(&mut self, step: &InteractionStep) -> Result<()>;

    /// Serialized markup of the currently rendered page
    fn capture_page(&mut self) -> Result<String>;

    /// Release the browser session
    fn close(&mut self) -> Result<()>;

    /// Execute steps in strict sequence, stopping at the first failure
    fn interact(&mut self, steps: &[InteractionStep]) -> Result<()> {
        for (i, step) in steps.iter().enumerate() {
            log::debug!("Step {}/{}: {}", i + 1, steps.len(), step);
            self.perform(step)?;
        }
        Ok(())
    }
}

/// Lets a caller lend a driver to the pipeline and keep ownership of it
impl<D: PageDriver + ?Sized> PageDriver for &mut D {
    fn navigate(&mut self, url: &str) -> Result<()> {
        (**self).navigate(url)
    }

    fn perform(&mut self, step: &InteractionStep) -> Result<()> {
        (**self).perform(step)
    }

    fn capture_page(&mut self) -> Result<String> {
        (**self).capture_page()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// Owns a driver and closes it exactly once
///
/// Call [`release`](SessionGuard::release) to close explicitly and observe the
/// result; otherwise the driver is closed when the guard is dropped.
pub struct SessionGuard<D: PageDriver> {
    driver: D,
    closed: bool,
}

impl<D: PageDriver> SessionGuard<D> {
    pub fn new(driver: D) -> Self {
        Self { driver, closed: false }
    }

    /// Close the session now
    pub fn release(mut self) -> Result<()> {
        self.closed = true;
        self.driver.close()
    }

    /// Navigate, run the interaction steps and return the rendered markup,
    /// then close the session
    ///
    /// A close failure after a successful capture is logged and the markup is
    /// still returned.
    pub fn capture(mut self, url: &str, steps: &[InteractionStep]) -> Result<String> {
        let captured = load_and_capture(&mut self.driver, url, steps);
        let released = self.release();

        let markup = captured?;
        if let Err(e) = released {
            log::warn!("Session close failed after capture: {}", e);
        }
        Ok(markup)
    }
}

impl<D: PageDriver> Drop for SessionGuard<D> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.driver.close() {
            log::warn!("Failed to close browser session: {}", e);
        }
    }
}

/// Capture the rendered page through `driver`, releasing it on every path
pub fn capture_rendered<D: PageDriver>(driver: D, url: &str, steps: &[InteractionStep]) -> Result<String> {
    SessionGuard::new(driver).capture(url, steps)
}

fn load_and_capture<D: PageDriver>(driver: &mut D, url: &str, steps: &[InteractionStep]) -> Result<String> {
    log::info!("Navigating to {}", url);
    driver.navigate(url)?;
    driver.interact(steps)?;
    let markup = driver.capture_page()?;
    log::info!("Captured {} bytes of rendered markup", markup.len());
    Ok(markup)
}
