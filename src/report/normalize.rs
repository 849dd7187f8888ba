//! Resolution of envelope triples into renderer-ready result records.
//!
//! Each `testCaseFinished` envelope is resolved backwards in two hops:
//! its `testCaseStartedId` to the matching `testCaseStarted`, then that
//! envelope's `testCaseId` to the originating `testCase`. A failed hop drops
//! the event with a warning; one orphaned event must not abort reporting.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::message::{Envelope, Tag, TestCase, TestCaseStarted};

/// Fixed relative path of the normalised results file.
pub const RESULTS_PATH: &str = "reports/results.json";

/// Final outcome of one scenario.
///
/// The three values are exhaustive and mutually exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Passed,
    Failed,
    Pending,
}

/// Renderer-ready record of one scenario's outcome.
///
/// Constructed once during normalisation, persisted to the results file, and
/// consumed read-only by the renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub line: u64,
    pub keyword: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub tags: Vec<Tag>,
    /// Kept empty: the renderer tolerates records without step detail.
    pub steps: Vec<serde_json::Value>,
    pub status: Status,
}

fn find_started<'a>(envelopes: &'a [Envelope], id: &str) -> Option<&'a TestCaseStarted> {
    envelopes
        .iter()
        .filter_map(|e| e.test_case_started.as_ref())
        .find(|started| started.id == id)
}

fn find_test_case<'a>(envelopes: &'a [Envelope], id: &str) -> Option<&'a TestCase> {
    envelopes
        .iter()
        .filter_map(|e| e.test_case.as_ref())
        .find(|case| case.id == id)
}

/// Resolve every `testCaseFinished` envelope into a [`ResultRecord`].
///
/// Records keep the order the finish events appear in the log.
#[must_use]
pub fn normalize(envelopes: &[Envelope]) -> Vec<ResultRecord> {
    let mut records = Vec::new();
    for envelope in envelopes {
        let Some(finished) = envelope.test_case_finished.as_ref() else {
            continue;
        };
        let Some(started) = find_started(envelopes, &finished.test_case_started_id) else {
            tracing::warn!(
                "skipping testCaseFinished without a matching testCaseStarted `{}`",
                finished.test_case_started_id
            );
            continue;
        };
        let Some(test_case) = find_test_case(envelopes, &started.test_case_id) else {
            tracing::warn!(
                "skipping testCaseStarted `{}` without a matching testCase `{}`",
                started.id,
                started.test_case_id
            );
            continue;
        };
        let status = if finished.will_be_retried {
            Status::Pending
        } else if finished.test_result.status == "PASSED" {
            Status::Passed
        } else {
            Status::Failed
        };
        records.push(ResultRecord {
            id: test_case.id.clone(),
            uri: test_case.uri.clone(),
            name: test_case.name.clone(),
            line: test_case.location.line,
            keyword: "Scenario".to_owned(),
            description: String::new(),
            kind: "scenario".to_owned(),
            tags: test_case.tags.clone(),
            steps: Vec::new(),
            status,
        });
    }
    records
}

/// Persist `records` as a JSON array at `path`, creating parent directories.
///
/// # Errors
///
/// Returns [`Error::Io`] on filesystem failure and [`Error::Json`] when the
/// records cannot be serialised.
pub fn write_records(records: &[ResultRecord], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let rendered = serde_json::to_string_pretty(records).map_err(Error::Json)?;
    std::fs::write(path, rendered)?;
    Ok(())
}
