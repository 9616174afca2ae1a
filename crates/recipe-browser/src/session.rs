//! A browser wired to a request coordinator.

use tracing::{debug, info};

use crate::browser::{Action, Browser, Reconciled};
use crate::coordinator::{RecipeSource, RequestCoordinator, Settled};
use crate::error::{FetchFailure, Result};

/// Drives a [`Browser`] against a [`RecipeSource`].
///
/// After every action the current descriptor is handed to the coordinator,
/// which issues a request only when the descriptor actually changed.
/// Completions are fed back through [`settle`](Self::settle).
#[derive(Debug)]
pub struct Session<S> {
    browser: Browser,
    coordinator: RequestCoordinator<S>,
}

impl<S: RecipeSource> Session<S> {
    /// Creates a session. Nothing is fetched until [`sync`](Self::sync) or
    /// [`dispatch`](Self::dispatch) is called.
    pub fn new(browser: Browser, source: S) -> Self {
        Self {
            browser,
            coordinator: RequestCoordinator::new(source),
        }
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    pub fn coordinator(&self) -> &RequestCoordinator<S> {
        &self.coordinator
    }

    /// Returns true while a request is outstanding.
    pub fn is_pending(&self) -> bool {
        self.coordinator.is_pending()
    }

    /// Submits the browser's current descriptor. Returns true if a request
    /// was issued.
    pub fn sync(&mut self) -> bool {
        let issued = self.coordinator.submit(self.browser.descriptor());
        if issued {
            self.browser.begin_loading();
        }
        issued
    }

    /// Applies an action and fetches whatever it changed.
    ///
    /// # Errors
    ///
    /// Returns the browser's error for input that cannot be applied. Nothing
    /// is fetched in that case.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        self.browser.dispatch(action)?;
        self.sync();
        Ok(())
    }

    /// Fetches the current descriptor again.
    pub fn refresh(&mut self) -> bool {
        let issued = if self.coordinator.current() == Some(&self.browser.descriptor()) {
            self.coordinator.refresh()
        } else {
            self.coordinator.submit(self.browser.descriptor())
        };
        if issued {
            self.browser.begin_loading();
        }
        issued
    }

    /// Waits for the outstanding request. See
    /// [`RequestCoordinator::next_settled`].
    pub async fn next_settled(&mut self) -> Option<Settled> {
        self.coordinator.next_settled().await
    }

    /// Reconciles a settled request into the browser.
    ///
    /// If the result showed that the requested page no longer exists, the
    /// clamped page is fetched and true is returned.
    pub fn settle(&mut self, settled: Settled) -> bool {
        match settled.outcome {
            Ok(page) => {
                info!(
                    total = page.total,
                    rows = page.data.len(),
                    page = settled.descriptor.page(),
                    "page loaded"
                );
                match self.browser.show_result(&settled.descriptor, page) {
                    Reconciled::Shown => false,
                    Reconciled::PageClamped => self.sync(),
                }
            }
            Err(err) => {
                debug!(error = %err, "request failed");
                self.browser.show_failure(FetchFailure::from(&err));
                false
            }
        }
    }

    /// Waits for and reconciles requests until nothing is outstanding,
    /// including any refetch caused by page clamping.
    pub async fn run_until_idle(&mut self) {
        while let Some(settled) = self.next_settled().await {
            self.settle(settled);
        }
    }
}
