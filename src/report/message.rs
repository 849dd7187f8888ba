//! Envelope model and event-log parsing.
//!
//! The runner has emitted its event log in two representations over time: a
//! single top-level JSON array of envelopes, and one JSON-encoded envelope
//! per line. Both remain first-class inputs; [`sniff`] selects the parse
//! strategy per file and neither form is treated as deprecated.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One event emitted by the runner.
///
/// Exactly one of the payload fields is set per envelope; kinds the pipeline
/// does not consume deserialise with every field `None` and are ignored
/// downstream.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Envelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_run_started: Option<TestRunStarted>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_case: Option<TestCase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_case_started: Option<TestCaseStarted>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_case_finished: Option<TestCaseFinished>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_run_finished: Option<TestRunFinished>,
}

impl Envelope {
    /// Wrap a `testCase` payload.
    #[must_use]
    pub fn test_case(test_case: TestCase) -> Self {
        Self {
            test_case: Some(test_case),
            ..Self::default()
        }
    }

    /// Wrap a `testCaseStarted` payload.
    #[must_use]
    pub fn test_case_started(started: TestCaseStarted) -> Self {
        Self {
            test_case_started: Some(started),
            ..Self::default()
        }
    }

    /// Wrap a `testCaseFinished` payload.
    #[must_use]
    pub fn test_case_finished(finished: TestCaseFinished) -> Self {
        Self {
            test_case_finished: Some(finished),
            ..Self::default()
        }
    }

    /// Wrap a `testRunStarted` marker.
    #[must_use]
    pub fn test_run_started(timestamp: Timestamp) -> Self {
        Self {
            test_run_started: Some(TestRunStarted {
                timestamp: Some(timestamp),
            }),
            ..Self::default()
        }
    }

    /// Wrap a `testRunFinished` marker.
    #[must_use]
    pub fn test_run_finished(success: bool, timestamp: Timestamp) -> Self {
        Self {
            test_run_finished: Some(TestRunFinished {
                success,
                timestamp: Some(timestamp),
            }),
            ..Self::default()
        }
    }
}

/// Wall-clock instant attached to run and case events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub seconds: u64,
    pub nanos: u32,
}

impl Timestamp {
    /// The current wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        let elapsed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();
        Self {
            seconds: elapsed.as_secs(),
            nanos: elapsed.subsec_nanos(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestRunStarted {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestRunFinished {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
}

/// A scenario as announced before execution.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestCase {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub location: Location,
    pub tags: Vec<Tag>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestCaseStarted {
    pub id: String,
    pub test_case_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestCaseFinished {
    pub test_case_started_id: String,
    pub will_be_retried: bool,
    pub test_result: TestResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
}

/// Outcome embedded in a `testCaseFinished` envelope.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestResult {
    /// Runner status label; `PASSED` is the only success value.
    pub status: String,
}

/// The two supported event-log representations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// One top-level JSON array of envelopes.
    EnvelopeArray,
    /// One JSON-encoded envelope per line.
    MessageLines,
}

/// Decide which representation `raw` uses.
///
/// A payload whose first non-whitespace byte opens an array is the envelope
/// array; everything else is treated as line-delimited.
#[must_use]
pub fn sniff(raw: &str) -> LogFormat {
    if raw.trim_start().starts_with('[') {
        LogFormat::EnvelopeArray
    } else {
        LogFormat::MessageLines
    }
}

/// Parse an event log in whichever representation it uses.
///
/// In the line-delimited form a malformed line is logged and skipped so one
/// bad event cannot abort reporting.
///
/// # Errors
///
/// Returns [`Error::Json`] when the payload is the array form and does not
/// parse as a whole: the log is unusable, which is fatal to reporting.
pub fn parse_log(raw: &str) -> Result<Vec<Envelope>> {
    match sniff(raw) {
        LogFormat::EnvelopeArray => serde_json::from_str(raw).map_err(Error::Json),
        LogFormat::MessageLines => {
            let mut envelopes = Vec::new();
            for (index, line) in raw.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str(line) {
                    Ok(envelope) => envelopes.push(envelope),
                    Err(error) => {
                        tracing::warn!("skipping malformed event on line {}: {error}", index + 1);
                    }
                }
            }
            Ok(envelopes)
        }
    }
}

/// Read and parse the event log at `path`.
///
/// # Errors
///
/// Returns [`Error::ReportLog`] when the file cannot be read (the message
/// directs the user to rerun the suite) and propagates [`parse_log`]
/// failures.
pub fn read_log(path: impl AsRef<Path>) -> Result<Vec<Envelope>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| Error::ReportLog {
        path: path.to_path_buf(),
        source,
    })?;
    parse_log(&raw)
}
