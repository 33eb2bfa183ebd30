pub mod chrome;
pub mod wait;

use tracing::{debug, warn};

use crate::error::ItdashError;

/// Trait for browser automation backends.
///
/// Elements are addressed by XPath. Every call is blocking; waiting for a
/// condition is layered on top with [`wait::poll_until`].
pub trait Driver {
    fn navigate(&self, url: &str) -> Result<(), ItdashError>;

    fn current_url(&self) -> Result<String, ItdashError>;

    /// Rendered text of every node matching `xpath`, in document order.
    fn texts(&self, xpath: &str) -> Result<Vec<String>, ItdashError>;

    /// For each node matching `container_xpath`, the texts of the nodes
    /// matching `child_xpath` relative to it.
    fn grouped_texts(
        &self,
        container_xpath: &str,
        child_xpath: &str,
    ) -> Result<Vec<Vec<String>>, ItdashError>;

    /// Click the `index`-th node matching `xpath`.
    fn click(&self, xpath: &str, index: usize) -> Result<(), ItdashError>;

    /// Whether the first node matching `xpath` exists and is rendered.
    fn is_visible(&self, xpath: &str) -> Result<bool, ItdashError>;

    /// Shut the browser down. [`Session`] calls this at most once.
    fn quit(&mut self) -> Result<(), ItdashError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Owns a driver for one automation run and quits it on every exit path.
pub struct Session<D: Driver> {
    driver: D,
    closed: bool,
}

impl<D: Driver> Session<D> {
    pub fn new(driver: D) -> Self {
        debug!(backend = driver.backend_name(), "browser session started");
        Session {
            driver,
            closed: false,
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Quit now and surface the error instead of logging it.
    pub fn close(mut self) -> Result<(), ItdashError> {
        self.closed = true;
        self.driver.quit()
    }
}

impl<D: Driver> Drop for Session<D> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        match self.driver.quit() {
            Ok(()) => debug!("browser session closed"),
            Err(e) => warn!("failed to close browser session: {e}"),
        }
    }
}
