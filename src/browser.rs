//! Browser automation layer: the shared browser process and the navigation
//! capability page objects compose.
//!
//! One headless browser process serves an entire run. It is launched lazily
//! when the first UI scenario asks for a page and shared read-only after
//! that; every scenario drives its own page, so no DOM state crosses
//! scenario boundaries. Page objects do not touch CDP directly; they hold a
//! [`Navigator`] that owns the page handle, the base URL, and the bounded
//! element waits.

use std::time::{Duration, Instant};

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::sync::OnceCell;

use crate::config::UiConfig;
use crate::error::{Error, Result};

pub mod race_results;
pub mod search;

pub use race_results::{DriverResult, RaceResultsPage};
pub use search::SearchPage;

static BROWSER: OnceCell<Browser> = OnceCell::const_new();

/// Interval between element-condition polls.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// The run-wide browser instance, launched on first use.
///
/// # Errors
///
/// Returns [`Error::BrowserLaunch`] when the browser cannot be configured or
/// spawned.
pub async fn shared() -> Result<&'static Browser> {
    BROWSER
        .get_or_try_init(|| async {
            let config = BrowserConfig::builder()
                .arg("--headless")
                .arg("--disable-gpu")
                .arg("--no-sandbox")
                .build()
                .map_err(Error::BrowserLaunch)?;
            let (browser, mut handler) = Browser::launch(config)
                .await
                .map_err(|e| Error::BrowserLaunch(e.to_string()))?;
            tokio::spawn(async move { while handler.next().await.is_some() {} });
            tracing::info!("browser launched for UI scenarios");
            Ok(browser)
        })
        .await
}

/// Open a fresh page on the shared browser.
///
/// # Errors
///
/// Propagates launch failures and CDP errors opening the page.
pub async fn new_page() -> Result<Page> {
    let page = shared().await?.new_page("about:blank").await?;
    Ok(page)
}

/// Navigation and wait capability shared by every page object.
pub struct Navigator {
    page: Page,
    base_url: String,
    timeout: Duration,
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Navigator {
    /// Pair a live page handle with the configured base URL and wait bound.
    #[must_use]
    pub fn new(page: Page, config: &UiConfig) -> Self {
        Self {
            page,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            timeout: config.element_timeout,
        }
    }

    /// Navigate to `path` under the base URL and await the load signal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Browser`] when navigation fails or the load signal
    /// never fires.
    pub async fn navigate(&self, path: &str) -> Result<()> {
        let url = if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        };
        self.page.goto(url).await?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    /// Wait until `selector` matches an element, bounded by the configured
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] naming the selector when the bound elapses.
    pub async fn wait_for(&self, selector: &str) -> Result<Element> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Ok(element) = self.page.find_element(selector).await {
                return Ok(element);
            }
            if Instant::now() >= deadline {
                return Err(Error::Timeout(format!("element `{selector}`")));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Click the first clickable element whose trimmed text equals `text`,
    /// polling until the element appears.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] naming the text when nothing matches within
    /// the bound.
    pub async fn click_text(&self, text: &str) -> Result<()> {
        // Serialise the needle as a JSON string so it arrives as a JS literal.
        let needle = serde_json::to_string(text)?;
        let script = format!(
            "(() => {{ const el = [...document.querySelectorAll('a, button')]\
             .find((e) => e.textContent.trim() === {needle}); \
             if (el) {{ el.click(); return true; }} return false; }})()"
        );
        let deadline = Instant::now() + self.timeout;
        loop {
            let clicked: bool = self.page.evaluate(script.as_str()).await?.into_value()?;
            if clicked {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(Error::Timeout(format!("element with text `{text}`")));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Text contents of every element matching `selector`.
    ///
    /// Zero matches yield an empty vector, never an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Browser`] only when reading a found element fails.
    pub async fn texts(&self, selector: &str) -> Result<Vec<String>> {
        let elements = self.page.find_elements(selector).await.unwrap_or_default();
        let mut texts = Vec::with_capacity(elements.len());
        for element in elements {
            texts.push(element.inner_text().await?.unwrap_or_default());
        }
        Ok(texts)
    }

    /// Number of elements matching `selector`; zero matches is zero.
    pub async fn count(&self, selector: &str) -> usize {
        self.page
            .find_elements(selector)
            .await
            .map_or(0, |elements| elements.len())
    }

    /// The current page handle, for operations the capability does not cover.
    #[must_use]
    pub fn page(&self) -> &Page { &self.page }

    /// Consume the navigator and close its page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Browser`] when the page is already gone.
    pub async fn close(self) -> Result<()> {
        self.page.close().await?;
        Ok(())
    }
}
