//! Report pipeline: envelope log parsing, result normalisation, and HTML
//! rendering.
//!
//! The runner appends one envelope per event to a JSON log. This module turns
//! that log into the renderer-ready array of per-scenario result records and
//! finally into a self-contained HTML report:
//!
//! ```text
//! messages.ndjson --parse--> [Envelope] --resolve--> [ResultRecord]
//!                 --persist--> results.json --render--> report.html
//! ```
//!
//! A malformed individual line is logged and skipped; an unreadable log file
//! aborts report generation.

pub mod html;
pub mod message;
pub mod normalize;

pub use html::{REPORT_PATH, ReportMetadata, write_report};
pub use message::{
    Envelope, Location, LogFormat, Tag, TestCase, TestCaseFinished, TestCaseStarted, TestResult,
    TestRunFinished, TestRunStarted, Timestamp, parse_log, read_log, sniff,
};
pub use normalize::{RESULTS_PATH, ResultRecord, Status, normalize, write_records};
