//! Suite configuration types.
//!
//! This module defines the immutable defaults every scenario starts from and
//! the environment overrides the suite honours. Configuration is constructed
//! per scenario and never shared mutably between scenarios.

use std::{path::PathBuf, time::Duration};

/// Default countries API endpoint.
pub const COUNTRIES_ENDPOINT: &str = "https://restcountries.com/v3.1/all/";

/// Default base URL of the sports site under test.
pub const UI_BASE_URL: &str = "https://www.bbc.com/sport";

/// Default location of the runner's envelope event log.
pub const MESSAGE_LOG_PATH: &str = "reports/messages.ndjson";

/// Expected country counts used by the count-validation scenario.
///
/// The official count of UN-recognised sovereign states (193) plus the two
/// observer states (Vatican City and Palestine) gives 195. The API reports
/// slightly fewer UN members than 193, so the minimum thresholds allow for
/// data-currency differences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountryCounts {
    /// Widely recognised sovereign states.
    pub sovereign_states: usize,
    /// Minimum acceptable number of UN members in the payload.
    pub min_un_members: usize,
    /// Minimum acceptable number of independent countries in the payload.
    pub min_independent: usize,
}

impl Default for CountryCounts {
    fn default() -> Self {
        Self {
            sovereign_states: 195,
            min_un_members: 190,
            min_independent: 190,
        }
    }
}

/// Immutable API configuration consumed by the HTTP steps.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Base endpoint returning every country record.
    pub endpoint: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Thresholds for the count-validation scenario.
    pub expected_counts: CountryCounts,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: COUNTRIES_ENDPOINT.to_owned(),
            timeout: Duration::from_millis(5000),
            expected_counts: CountryCounts::default(),
        }
    }
}

/// Configuration for the browser-driven UI scenarios.
#[derive(Clone, Debug)]
pub struct UiConfig {
    /// Base URL every page object navigates under. Overridable via `BASE_URL`.
    pub base_url: String,
    /// Bound on element-condition waits.
    pub element_timeout: Duration,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("BASE_URL").unwrap_or_else(|_| UI_BASE_URL.to_owned()),
            element_timeout: Duration::from_secs(10),
        }
    }
}

/// Whether verbose scenario logging is enabled.
///
/// Defaults to enabled; set `VERBOSE_LOGGING=false` to silence non-forced
/// scenario logs.
#[must_use]
pub fn verbose_logging() -> bool {
    std::env::var("VERBOSE_LOGGING").map_or(true, |value| value != "false")
}

/// Path of the envelope event log.
///
/// The orchestrator fixes this for the runner via `PITWALL_MESSAGES`; without
/// the override the fixed relative default is used.
#[must_use]
pub fn message_log_path() -> PathBuf {
    std::env::var_os("PITWALL_MESSAGES")
        .map_or_else(|| PathBuf::from(MESSAGE_LOG_PATH), PathBuf::from)
}
