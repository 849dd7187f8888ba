//! Page object for Formula 1 season and race results.

use chromiumoxide::page::Page;

use crate::config::UiConfig;
use crate::error::Result;

use super::Navigator;

const RESULTS_TABLE: &str = ".race-results-table";
const DRIVER_POSITION: &str = ".driver-position";
const DRIVER_NAME: &str = ".driver-name";
const DRIVER_TEAM: &str = ".driver-team";
const RACE_TITLE: &str = ".race-title";

/// One classified driver in a race result table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverResult {
    /// Finishing position as rendered, e.g. `1`.
    pub position: String,
    /// Driver name as rendered.
    pub name: String,
    /// Constructor name as rendered.
    pub team: String,
}

/// Formula 1 results page: season navigation and result extraction.
#[derive(Debug)]
pub struct RaceResultsPage {
    nav: Navigator,
}

impl RaceResultsPage {
    /// Wrap a live page handle.
    #[must_use]
    pub fn new(page: Page, config: &UiConfig) -> Self {
        Self {
            nav: Navigator::new(page, config),
        }
    }

    /// Open the results page for `year` and wait for the results table.
    ///
    /// # Errors
    ///
    /// Fails with a timeout when the table never renders.
    pub async fn goto_season(&self, year: &str) -> Result<()> {
        self.nav
            .navigate(&format!("formula1/{year}/results"))
            .await?;
        self.nav.wait_for(RESULTS_TABLE).await?;
        Ok(())
    }

    /// Select the Grand Prix named `race` and wait for its results.
    ///
    /// # Errors
    ///
    /// Fails with a timeout when no element carries that name or the results
    /// table never renders afterwards.
    pub async fn select_race(&self, race: &str) -> Result<()> {
        self.nav.click_text(race).await?;
        self.nav.wait_for(RESULTS_TABLE).await?;
        Ok(())
    }

    /// Title of the currently displayed race.
    ///
    /// # Errors
    ///
    /// Fails with a timeout when no title is rendered.
    pub async fn race_title(&self) -> Result<String> {
        let title = self.nav.wait_for(RACE_TITLE).await?;
        Ok(title.inner_text().await?.unwrap_or_default())
    }

    /// The classified drivers in display order; empty when the page shows no
    /// results.
    ///
    /// # Errors
    ///
    /// Propagates CDP failures reading found cells.
    pub async fn race_results(&self) -> Result<Vec<DriverResult>> {
        let positions = self.nav.texts(DRIVER_POSITION).await?;
        let names = self.nav.texts(DRIVER_NAME).await?;
        let teams = self.nav.texts(DRIVER_TEAM).await?;
        Ok(positions
            .into_iter()
            .zip(names)
            .zip(teams)
            .map(|((position, name), team)| DriverResult {
                position,
                name,
                team,
            })
            .collect())
    }

    /// The first `n` classified drivers.
    ///
    /// # Errors
    ///
    /// Propagates CDP failures reading found cells.
    pub async fn top_finishers(&self, n: usize) -> Result<Vec<DriverResult>> {
        let mut results = self.race_results().await?;
        results.truncate(n);
        Ok(results)
    }

    /// Whether `driver` is classified at `position`.
    ///
    /// # Errors
    ///
    /// Propagates CDP failures reading found cells.
    pub async fn driver_finished(&self, driver: &str, position: &str) -> Result<bool> {
        Ok(self
            .race_results()
            .await?
            .iter()
            .any(|result| result.name == driver && result.position == position))
    }

    /// Release the underlying page.
    ///
    /// # Errors
    ///
    /// Propagates CDP failures closing the page.
    pub async fn close(self) -> Result<()> { self.nav.close().await }
}
