//! The navigable-page abstraction the pipeline runs against.
//!
//! The core depends only on [`BrowserPage`]; [`WebDriverPage`] is the live
//! implementation over a WebDriver session. Tests drive the pipeline through
//! the in-memory `FixturePage` instead of a browser.

use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::{By, WebDriver};

use crate::error::PageError;

/// Poll interval used while waiting for an element to appear.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A single navigable browser page.
///
/// All methods may fail with a [`PageError`]; callers in the pipeline catch
/// every failure and degrade to an empty or partial result for the current
/// unit of work.
#[async_trait]
pub trait BrowserPage: Send + Sync {
    /// Navigate to `url`, bounded by `timeout`.
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), PageError>;

    async fn current_url(&self) -> Result<String, PageError>;

    async fn title(&self) -> Result<String, PageError>;

    /// Wait until an element matching `css` is present, up to `timeout`.
    /// Returns `false` (not an error) when the deadline passes without a
    /// match.
    async fn wait_for(&self, css: &str, timeout: Duration) -> Result<bool, PageError>;

    /// The rendered document's HTML source.
    async fn content(&self) -> Result<String, PageError>;
}

/// [`BrowserPage`] over a `thirtyfour` WebDriver session.
pub struct WebDriverPage {
    driver: WebDriver,
}

impl WebDriverPage {
    #[must_use]
    pub fn new(driver: WebDriver) -> Self {
        Self { driver }
    }

    /// End the underlying browser session.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Driver`] if the session cannot be closed cleanly.
    pub async fn quit(self) -> Result<(), PageError> {
        self.driver
            .quit()
            .await
            .map_err(|e| PageError::Driver(e.to_string()))
    }
}

#[async_trait]
impl BrowserPage for WebDriverPage {
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), PageError> {
        match tokio::time::timeout(timeout, self.driver.goto(url)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(PageError::Navigation {
                url: url.to_owned(),
                reason: e.to_string(),
            }),
            Err(_) => Err(PageError::Timeout {
                what: format!("navigation to {url}"),
                timeout_secs: timeout.as_secs(),
            }),
        }
    }

    async fn current_url(&self) -> Result<String, PageError> {
        self.driver
            .current_url()
            .await
            .map(|url| url.to_string())
            .map_err(|e| PageError::Driver(e.to_string()))
    }

    async fn title(&self) -> Result<String, PageError> {
        self.driver
            .title()
            .await
            .map_err(|e| PageError::Driver(e.to_string()))
    }

    async fn wait_for(&self, css: &str, timeout: Duration) -> Result<bool, PageError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let matches = self
                .driver
                .find_all(By::Css(css))
                .await
                .map_err(|e| PageError::Driver(e.to_string()))?;
            if !matches.is_empty() {
                return Ok(true);
            }
            if tokio::time::Instant::now() >= deadline {
                return Ok(false);
            }
            tokio::time::sleep(WAIT_POLL_INTERVAL).await;
        }
    }

    async fn content(&self) -> Result<String, PageError> {
        self.driver
            .source()
            .await
            .map_err(|e| PageError::Driver(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod fixture {
    //! An in-memory [`BrowserPage`] backed by captured HTML documents,
    //! keyed by URL. Navigating to an unregistered URL fails, which models
    //! navigation errors in tests.

    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use scraper::{Html, Selector};

    use super::BrowserPage;
    use crate::error::PageError;

    pub(crate) struct FixtureDoc {
        pub title: String,
        pub html: String,
    }

    #[derive(Default)]
    pub(crate) struct FixturePage {
        pages: HashMap<String, FixtureDoc>,
        current: Mutex<Option<String>>,
    }

    impl FixturePage {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn with_page(mut self, url: &str, title: &str, html: &str) -> Self {
            self.pages.insert(
                url.to_owned(),
                FixtureDoc {
                    title: title.to_owned(),
                    html: html.to_owned(),
                },
            );
            self
        }

        fn current_doc(&self) -> Result<&FixtureDoc, PageError> {
            let current = self.current.lock().unwrap();
            let url = current
                .as_ref()
                .ok_or_else(|| PageError::Driver("no page loaded".to_owned()))?;
            self.pages
                .get(url)
                .ok_or_else(|| PageError::Driver("no page loaded".to_owned()))
        }
    }

    #[async_trait]
    impl BrowserPage for FixturePage {
        async fn navigate(&self, url: &str, _timeout: Duration) -> Result<(), PageError> {
            if self.pages.contains_key(url) {
                *self.current.lock().unwrap() = Some(url.to_owned());
                Ok(())
            } else {
                Err(PageError::Navigation {
                    url: url.to_owned(),
                    reason: "no fixture registered for url".to_owned(),
                })
            }
        }

        async fn current_url(&self) -> Result<String, PageError> {
            self.current
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| PageError::Driver("no page loaded".to_owned()))
        }

        async fn title(&self) -> Result<String, PageError> {
            Ok(self.current_doc()?.title.clone())
        }

        async fn wait_for(&self, css: &str, _timeout: Duration) -> Result<bool, PageError> {
            let doc = Html::parse_document(&self.current_doc()?.html);
            let Ok(selector) = Selector::parse(css) else {
                return Ok(false);
            };
            Ok(doc.select(&selector).next().is_some())
        }

        async fn content(&self) -> Result<String, PageError> {
            Ok(self.current_doc()?.html.clone())
        }
    }
}
