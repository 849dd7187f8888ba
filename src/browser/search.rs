//! Page object for the sports site search flow.

use chromiumoxide::page::Page;

use crate::config::UiConfig;
use crate::error::Result;

use super::Navigator;

/// Opens the search interface from the sport landing page.
const SEARCH_LINK: &str = r#"a[aria-label="Search BBC"]"#;
/// The search form's text input.
const SEARCH_INPUT: &str = "#searchInput";
/// One search result promo.
const RESULT: &str = r#"[data-testid="default-promo"]"#;

/// Search page: navigation, query entry, and result queries.
#[derive(Debug)]
pub struct SearchPage {
    nav: Navigator,
}

impl SearchPage {
    /// Wrap a live page handle.
    #[must_use]
    pub fn new(page: Page, config: &UiConfig) -> Self {
        Self {
            nav: Navigator::new(page, config),
        }
    }

    /// Navigate to the landing page and open the search interface.
    ///
    /// # Errors
    ///
    /// Fails with a timeout when the search entry point never appears.
    pub async fn open_search(&self) -> Result<()> {
        self.nav.navigate("").await?;
        self.nav.wait_for(SEARCH_LINK).await?.click().await?;
        self.nav.wait_for(SEARCH_INPUT).await?;
        Ok(())
    }

    /// Type `term` into the search input.
    ///
    /// # Errors
    ///
    /// Fails with a timeout when the input never appears.
    pub async fn enter_term(&self, term: &str) -> Result<()> {
        let input = self.nav.wait_for(SEARCH_INPUT).await?;
        input.click().await?;
        input.type_str(term).await?;
        Ok(())
    }

    /// Submit the query and wait for the results to render.
    ///
    /// Waits on the first result promo instead of a fixed pause, bounded by
    /// the configured element timeout.
    ///
    /// # Errors
    ///
    /// Fails with a timeout when no result renders within the bound.
    pub async fn submit(&self) -> Result<()> {
        self.nav
            .wait_for(SEARCH_INPUT)
            .await?
            .press_key("Enter")
            .await?;
        self.nav.wait_for(RESULT).await?;
        Ok(())
    }

    /// Number of result promos currently rendered.
    pub async fn results_count(&self) -> usize { self.nav.count(RESULT).await }

    /// Text content of every rendered result promo; empty when there are
    /// none.
    ///
    /// # Errors
    ///
    /// Propagates CDP failures reading a found promo.
    pub async fn results_text(&self) -> Result<Vec<String>> { self.nav.texts(RESULT).await }

    /// Release the underlying page.
    ///
    /// # Errors
    ///
    /// Propagates CDP failures closing the page.
    pub async fn close(self) -> Result<()> { self.nav.close().await }
}
