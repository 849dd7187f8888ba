//! Public API for the `pitwall` acceptance suite.
//!
//! This crate provides the building blocks behind a behaviour-driven
//! end-to-end suite: a typed per-scenario context, page objects over a shared
//! headless browser, an HTTP client for the countries API with schema
//! validation, and the report pipeline that turns the runner's envelope event
//! log into a normalised results file and an HTML report. The Gherkin
//! features, worlds, and step definitions live in the crate's acceptance
//! test target; the `pitwall` binary orchestrates a full run.

pub mod api;
pub mod browser;
pub mod config;
pub mod context;
pub mod countries;
pub mod error;
pub mod report;
pub mod runner;
pub mod schema;

pub use api::{ApiResponse, CountriesApi};
pub use browser::{Navigator, RaceResultsPage, SearchPage};
pub use config::{ApiConfig, UiConfig};
pub use context::ScenarioContext;
pub use error::{Error, Result};
pub use report::{Envelope, LogFormat, ResultRecord, Status};
