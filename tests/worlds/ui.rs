//! World state for the browser-driven UI scenarios.
//!
//! Pages are created on the shared run-wide browser and closed by the
//! runner's after-hook, so a scenario never sees another scenario's DOM.

use cucumber::World;
use pitwall::browser::{self, DriverResult, RaceResultsPage, SearchPage};
use pitwall::error::{Error, Result};
use pitwall::{ScenarioContext, UiConfig};

/// Shared state for one UI scenario.
#[derive(Debug, Default, World)]
pub struct UiWorld {
    pub ctx: ScenarioContext,
    ui: UiConfig,
    search: Option<SearchPage>,
    race: Option<RaceResultsPage>,
}

impl UiWorld {
    fn search(&self) -> Result<&SearchPage> {
        self.search
            .as_ref()
            .ok_or_else(|| Error::precondition("search_page"))
    }

    fn race(&self) -> Result<&RaceResultsPage> {
        self.race
            .as_ref()
            .ok_or_else(|| Error::precondition("race_results_page"))
    }

    /// Open a page on the shared browser and bring up the search interface.
    pub async fn open_search_page(&mut self) -> Result<()> {
        let page = browser::new_page().await?;
        let search = SearchPage::new(page, &self.ui);
        search.open_search().await?;
        self.search = Some(search);
        Ok(())
    }

    /// Type `term` into the search input.
    pub async fn enter_search_term(&mut self, term: &str) -> Result<()> {
        self.search()?.enter_term(term).await
    }

    /// Submit the query and wait for results to render.
    pub async fn submit_search(&mut self) -> Result<()> { self.search()?.submit().await }

    /// Assert at least `minimum` results are rendered.
    pub async fn assert_result_count(&self, minimum: usize) -> Result<()> {
        let count = self.search()?.results_count().await;
        self.ctx.log(format!("search returned {count} result(s)"));
        if count >= minimum {
            Ok(())
        } else {
            Err(Error::assertion(
                "search result count",
                format!(">= {minimum}"),
                count,
            ))
        }
    }

    /// Assert every rendered result contains every whitespace-separated term.
    pub async fn assert_results_relevant(&self, term: &str) -> Result<()> {
        let needles: Vec<String> = term
            .to_lowercase()
            .split_whitespace()
            .map(str::to_owned)
            .collect();
        let texts = self.search()?.results_text().await?;
        let irrelevant: Vec<&String> = texts
            .iter()
            .filter(|text| {
                let text = text.to_lowercase();
                !needles.iter().all(|needle| text.contains(needle))
            })
            .collect();
        if irrelevant.is_empty() {
            Ok(())
        } else {
            let sample: String = irrelevant[0].chars().take(100).collect();
            Err(Error::assertion(
                format!("results relevant to \"{term}\""),
                "every result to contain all search terms",
                format!("{} result(s) without them, e.g. \"{sample}\"", irrelevant.len()),
            ))
        }
    }

    /// Open a page on the shared browser at the given season's results.
    pub async fn open_season(&mut self, year: &str) -> Result<()> {
        let page = browser::new_page().await?;
        let race = RaceResultsPage::new(page, &self.ui);
        race.goto_season(year).await?;
        self.race = Some(race);
        Ok(())
    }

    /// Select the named Grand Prix.
    pub async fn view_race(&mut self, race: &str) -> Result<()> {
        self.race()?.select_race(race).await
    }

    /// Compare the page's classification against the expected rows.
    ///
    /// Only as many rows as both sides provide are compared, and an empty
    /// results table is itself a failure.
    pub async fn assert_race_results(&self, expected: &[DriverResult]) -> Result<()> {
        let actual = self.race()?.race_results().await?;
        if actual.is_empty() {
            return Err(Error::assertion(
                "race results",
                "at least one classified driver",
                "an empty results table",
            ));
        }
        for (want, got) in expected.iter().zip(&actual) {
            if want != got {
                return Err(Error::assertion(
                    format!("classification at position {}", want.position),
                    format!("{} ({})", want.name, want.team),
                    format!("{} {} ({})", got.position, got.name, got.team),
                ));
            }
        }
        Ok(())
    }

    /// Close any pages this scenario opened.
    pub async fn teardown(&mut self) {
        if let Some(search) = self.search.take() {
            if let Err(error) = search.close().await {
                tracing::warn!("failed to close search page: {error}");
            }
        }
        if let Some(race) = self.race.take() {
            if let Err(error) = race.close().await {
                tracing::warn!("failed to close race results page: {error}");
            }
        }
    }
}
