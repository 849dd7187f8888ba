//! Per-scenario execution context.
//!
//! `ScenarioContext` is the typed bag of state shared between the steps of a
//! single scenario: the immutable API configuration, the endpoint chosen by
//! the availability step, the last captured response and its parsed body, the
//! loaded schema, and the derived values assertion steps cache for the
//! reporting steps. One instance exists per scenario and is dropped with it;
//! contexts are never shared or aliased across scenarios.
//!
//! Every optional field is tracked through an `Option` and read through an
//! accessor that converts an unset field into [`Error::Precondition`] naming
//! the field, so a step running out of order fails with a precondition
//! message rather than a panic.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::api::ApiResponse;
use crate::config::{self, ApiConfig};
use crate::countries::CountrySummary;
use crate::error::{Error, Result};

/// Mutable state owned by exactly one running scenario.
#[derive(Debug)]
pub struct ScenarioContext {
    /// Immutable API defaults available to every step.
    pub api: ApiConfig,
    verbose: bool,
    endpoint: Option<String>,
    response: Option<ApiResponse>,
    response_data: Option<Value>,
    schema: Option<Value>,
    summary: Option<CountrySummary>,
    languages: Option<BTreeMap<String, String>>,
    found_languages: Vec<&'static str>,
    has_sasl: Option<bool>,
}

impl ScenarioContext {
    /// Create a fresh context with default configuration.
    ///
    /// Verbosity is read from the environment once, at construction.
    #[must_use]
    pub fn new() -> Self {
        Self {
            api: ApiConfig::default(),
            verbose: config::verbose_logging(),
            endpoint: None,
            response: None,
            response_data: None,
            schema: None,
            summary: None,
            languages: None,
            found_languages: Vec::new(),
            has_sasl: None,
        }
    }

    /// Log a scenario message, suppressed unless verbose logging is enabled.
    pub fn log(&self, message: impl AsRef<str>) {
        if self.verbose {
            tracing::info!("{}", message.as_ref());
        }
    }

    /// Log a scenario message regardless of the verbosity setting.
    pub fn log_always(&self, message: impl AsRef<str>) { tracing::info!("{}", message.as_ref()); }

    /// Log an error message; never suppressed.
    pub fn log_error(&self, message: impl AsRef<str>) { tracing::error!("{}", message.as_ref()); }

    /// Record the endpoint chosen by the availability step.
    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) {
        self.endpoint = Some(endpoint.into());
    }

    /// The endpoint a prior step selected.
    ///
    /// # Errors
    ///
    /// Returns a precondition error when no availability step has run.
    pub fn endpoint(&self) -> Result<&str> {
        self.endpoint
            .as_deref()
            .ok_or_else(|| Error::precondition("endpoint"))
    }

    /// Record the most recent HTTP exchange, replacing any earlier one.
    pub fn set_response(&mut self, response: ApiResponse) { self.response = Some(response); }

    /// The most recent HTTP exchange.
    ///
    /// # Errors
    ///
    /// Returns a precondition error when no request step has run.
    pub fn response(&self) -> Result<&ApiResponse> {
        self.response
            .as_ref()
            .ok_or_else(|| Error::precondition("response"))
    }

    /// Parse the captured response body as JSON and cache the result.
    ///
    /// # Errors
    ///
    /// Propagates the precondition error when no response was captured, or
    /// [`Error::InvalidJson`] when the body does not parse.
    pub fn parse_response(&mut self) -> Result<&Value> {
        let data = self.response()?.json()?;
        Ok(self.response_data.insert(data))
    }

    /// The parsed response body.
    ///
    /// # Errors
    ///
    /// Returns a precondition error when no step has parsed the response yet.
    pub fn response_data(&self) -> Result<&Value> {
        self.response_data
            .as_ref()
            .ok_or_else(|| Error::precondition("response_data"))
    }

    /// Record the loaded schema document.
    pub fn set_schema(&mut self, schema: Value) { self.schema = Some(schema); }

    /// The loaded schema document.
    ///
    /// # Errors
    ///
    /// Returns a precondition error when no schema-loading step has run.
    pub fn schema(&self) -> Result<&Value> {
        self.schema
            .as_ref()
            .ok_or_else(|| Error::precondition("schema"))
    }

    /// Cache the country counts derived by the count-validation step.
    pub fn set_summary(&mut self, summary: CountrySummary) { self.summary = Some(summary); }

    /// The cached country counts.
    ///
    /// # Errors
    ///
    /// Returns a precondition error when the count-validation step has not
    /// run.
    pub fn summary(&self) -> Result<CountrySummary> {
        self.summary.ok_or_else(|| Error::precondition("summary"))
    }

    /// Cache the language map and which expected codes were found.
    pub fn set_languages(
        &mut self,
        languages: BTreeMap<String, String>,
        found: Vec<&'static str>,
    ) {
        self.languages = Some(languages);
        self.found_languages = found;
    }

    /// The cached language map.
    ///
    /// # Errors
    ///
    /// Returns a precondition error when the language-validation step has not
    /// run.
    pub fn languages(&self) -> Result<&BTreeMap<String, String>> {
        self.languages
            .as_ref()
            .ok_or_else(|| Error::precondition("languages"))
    }

    /// Expected language codes the validation step found, in table order.
    #[must_use]
    pub fn found_languages(&self) -> &[&'static str] { &self.found_languages }

    /// Cache the SASL verdict.
    pub fn set_has_sasl(&mut self, has_sasl: bool) { self.has_sasl = Some(has_sasl); }

    /// The cached SASL verdict.
    ///
    /// # Errors
    ///
    /// Returns a precondition error when the SASL step has not run.
    pub fn has_sasl(&self) -> Result<bool> {
        self.has_sasl.ok_or_else(|| Error::precondition("has_sasl"))
    }
}

impl Default for ScenarioContext {
    fn default() -> Self { Self::new() }
}
