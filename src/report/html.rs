//! HTML rendering of normalised results.
//!
//! The report is a single self-contained file: a metadata block, a summary
//! row, and one table row per scenario. Markup is assembled directly; the
//! layout carries no interactivity.

use std::path::{Path, PathBuf};

use super::normalize::{ResultRecord, Status};
use crate::error::Result;

/// Fixed relative path of the rendered report.
pub const REPORT_PATH: &str = "reports/report.html";

/// Labels shown in the report's metadata block.
#[derive(Clone, Debug)]
pub struct ReportMetadata {
    pub project: String,
    pub release: String,
    pub environment: String,
    /// Execution date, `YYYY-MM-DD`.
    pub executed: String,
}

impl Default for ReportMetadata {
    fn default() -> Self {
        Self {
            project: "REST Countries API Testing".to_owned(),
            release: "1.0.0".to_owned(),
            environment: "Test".to_owned(),
            executed: chrono::Local::now().format("%Y-%m-%d").to_string(),
        }
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn status_label(status: Status) -> &'static str {
    match status {
        Status::Passed => "passed",
        Status::Failed => "failed",
        Status::Pending => "pending",
    }
}

/// Render `records` and `metadata` into a complete HTML document.
#[must_use]
pub fn render(records: &[ResultRecord], metadata: &ReportMetadata) -> String {
    let passed = records.iter().filter(|r| r.status == Status::Passed).count();
    let failed = records.iter().filter(|r| r.status == Status::Failed).count();
    let pending = records.iter().filter(|r| r.status == Status::Pending).count();

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{} Report</title>\n", escape(&metadata.project)));
    html.push_str(
        "<style>\n\
         body { font-family: sans-serif; margin: 2rem; }\n\
         table { border-collapse: collapse; width: 100%; }\n\
         th, td { border: 1px solid #ccc; padding: 0.4rem 0.8rem; text-align: left; }\n\
         .passed { color: #1a7f37; }\n\
         .failed { color: #cf222e; }\n\
         .pending { color: #9a6700; }\n\
         </style>\n</head>\n<body>\n",
    );
    html.push_str(&format!("<h1>{}</h1>\n", escape(&metadata.project)));
    html.push_str("<table>\n");
    for (label, value) in [
        ("Release", &metadata.release),
        ("Environment", &metadata.environment),
        ("Execution Date", &metadata.executed),
    ] {
        html.push_str(&format!(
            "<tr><th>{label}</th><td>{}</td></tr>\n",
            escape(value)
        ));
    }
    html.push_str("</table>\n");
    html.push_str(&format!(
        "<p><span class=\"passed\">{passed} passed</span>, \
         <span class=\"failed\">{failed} failed</span>, \
         <span class=\"pending\">{pending} pending</span> \
         of {} scenario(s)</p>\n",
        records.len()
    ));
    html.push_str(
        "<table>\n<tr><th>Scenario</th><th>Feature</th><th>Line</th>\
         <th>Tags</th><th>Status</th></tr>\n",
    );
    for record in records {
        let tags = record
            .tags
            .iter()
            .map(|tag| tag.name.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td class=\"{status}\">{status}</td></tr>\n",
            escape(&record.name),
            escape(&record.uri),
            record.line,
            escape(&tags),
            status = status_label(record.status),
        ));
    }
    html.push_str("</table>\n</body>\n</html>\n");
    html
}

/// Render the report and write it to `path`, creating parent directories.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] on filesystem failure.
pub fn write_report(
    records: &[ResultRecord],
    metadata: &ReportMetadata,
    path: impl AsRef<Path>,
) -> Result<PathBuf> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render(records, metadata))?;
    Ok(path.to_path_buf())
}
