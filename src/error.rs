//! Canonical error and result types for the crate.
//!
//! This module defines the single public `Error` surface shared by the HTTP
//! steps, the browser layer, and the report pipeline. The taxonomy separates
//! precondition failures (a step read context state no prior step produced)
//! from network, validation, and report-file failures, because their
//! user-visible handling differs: step-level errors fail one scenario, while
//! report-file errors abort report generation entirely.

use std::path::PathBuf;

/// Top-level error type exposed by `pitwall`.
#[derive(Debug)]
pub enum Error {
    /// A step read a context field that no prior step has set.
    Precondition {
        /// Name of the missing context field.
        field: &'static str,
    },
    /// The HTTP client could not be constructed.
    Client(reqwest::Error),
    /// A request failed at the transport level.
    Http {
        /// URL the request was sent to.
        url: String,
        /// Underlying transport failure.
        source: reqwest::Error,
    },
    /// A request completed with a non-success status code.
    UnexpectedStatus {
        /// URL the request was sent to.
        url: String,
        /// The status code the server returned.
        status: u16,
    },
    /// A response body could not be parsed as JSON.
    InvalidJson {
        /// URL the body was fetched from.
        url: String,
        /// Underlying parse failure.
        source: serde_json::Error,
    },
    /// A bounded wait elapsed before its condition held.
    Timeout(String),
    /// The browser automation layer reported a protocol failure.
    Browser(chromiumoxide::error::CdpError),
    /// The browser process could not be configured or launched.
    BrowserLaunch(String),
    /// The schema document could not be read.
    SchemaFile {
        /// Path of the schema document.
        path: PathBuf,
        /// Underlying read failure.
        source: std::io::Error,
    },
    /// The schema document is not valid JSON.
    SchemaParse {
        /// Path of the schema document.
        path: PathBuf,
        /// Underlying parse failure.
        source: serde_json::Error,
    },
    /// The response payload violated the published schema.
    SchemaValidation {
        /// One message per validator finding.
        errors: Vec<String>,
    },
    /// An expectation over fetched data did not hold.
    Assertion {
        /// What was being checked.
        check: String,
        /// The expected value or bound.
        expected: String,
        /// The value actually observed.
        actual: String,
    },
    /// The runner's event log could not be read.
    ReportLog {
        /// Path of the event log.
        path: PathBuf,
        /// Underlying read failure.
        source: std::io::Error,
    },
    /// A filesystem operation outside the event log failed.
    Io(std::io::Error),
    /// A JSON document outside a response body failed to parse or serialise.
    Json(serde_json::Error),
}

impl Error {
    /// Build a `Precondition` error naming the missing context field.
    #[must_use]
    pub fn precondition(field: &'static str) -> Self { Self::Precondition { field } }

    /// Build an `Assertion` error with expected and actual rendered via `Display`.
    pub fn assertion(
        check: impl Into<String>,
        expected: impl std::fmt::Display,
        actual: impl std::fmt::Display,
    ) -> Self {
        Self::Assertion {
            check: check.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Precondition { field } => write!(
                f,
                "precondition not met: `{field}` has not been set; check that previous steps \
                 completed successfully"
            ),
            Self::Client(error) => write!(f, "failed to construct HTTP client: {error}"),
            Self::Http { url, source } => write!(f, "request to {url} failed: {source}"),
            Self::UnexpectedStatus { url, status } => {
                write!(f, "{url} returned status {status}")
            }
            Self::InvalidJson { url, source } => {
                write!(f, "response from {url} is not valid JSON: {source}")
            }
            Self::Timeout(what) => write!(f, "timed out waiting for {what}"),
            Self::Browser(error) => write!(f, "browser automation error: {error}"),
            Self::BrowserLaunch(detail) => write!(f, "failed to launch browser: {detail}"),
            Self::SchemaFile { path, source } => {
                write!(f, "cannot read schema file {}: {source}", path.display())
            }
            Self::SchemaParse { path, source } => {
                write!(f, "schema file {} is not valid JSON: {source}", path.display())
            }
            Self::SchemaValidation { errors } => {
                write!(f, "schema validation failed: {}", errors.join("; "))
            }
            Self::Assertion {
                check,
                expected,
                actual,
            } => write!(f, "{check}: expected {expected}, got {actual}"),
            Self::ReportLog { path, source } => write!(
                f,
                "cannot read event log {}: {source}; run the acceptance suite first to \
                 regenerate it",
                path.display()
            ),
            Self::Io(error) => write!(f, "I/O error: {error}"),
            Self::Json(error) => write!(f, "JSON error: {error}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Client(error) | Self::Http { source: error, .. } => Some(error),
            Self::InvalidJson { source, .. } | Self::SchemaParse { source, .. } => Some(source),
            Self::Browser(error) => Some(error),
            Self::SchemaFile { source, .. } | Self::ReportLog { source, .. } => Some(source),
            Self::Io(error) => Some(error),
            Self::Json(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self { Self::Io(error) }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self { Self::Json(error) }
}

impl From<chromiumoxide::error::CdpError> for Error {
    fn from(error: chromiumoxide::error::CdpError) -> Self { Self::Browser(error) }
}

/// Canonical result alias used by `pitwall` public APIs.
pub type Result<T> = std::result::Result<T, Error>;
