//! Run orchestration.
//!
//! Wraps one invocation of the acceptance runner: spawns it with the message
//! log path fixed, waits for it to finish, then generates the report from the
//! log it produced. The report is generated even when scenarios failed (a
//! failing run is exactly when the report matters) and the runner's exit
//! code is what the caller ultimately propagates.

use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::config;
use crate::error::Result;
use crate::report::{REPORT_PATH, RESULTS_PATH, ReportMetadata};
use crate::report::{normalize, read_log, write_records, write_report};

/// Spawn the acceptance runner, forwarding `runner_args`, and report on its
/// output.
///
/// Returns the exit code the process should finish with: the runner's own
/// code, or `1` when the runner passed but report generation failed.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] when the runner cannot be spawned at all.
pub async fn run_suite(runner_args: &[String], no_open: bool) -> Result<i32> {
    let log_path = config::message_log_path();
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    // A stale log would silently report the previous run.
    if log_path.exists() {
        std::fs::remove_file(&log_path)?;
    }

    tracing::info!("running acceptance suite with args: {runner_args:?}");
    let status = Command::new("cargo")
        .args(["test", "--test", "acceptance", "--features", "e2e", "--"])
        .args(runner_args)
        .env("PITWALL_MESSAGES", &log_path)
        .status()
        .await?;
    let code = status.code().unwrap_or(1);

    // Generate the report regardless of run success or failure.
    match generate_report(no_open) {
        Ok(_) => Ok(code),
        Err(error) => {
            tracing::error!("report generation failed: {error}");
            Ok(if code == 0 { 1 } else { code })
        }
    }
}

/// Convert the current event log into the results file and HTML report.
///
/// # Errors
///
/// Returns [`crate::Error::ReportLog`] when the event log is missing or
/// unreadable, plus filesystem failures writing the outputs.
pub fn generate_report(no_open: bool) -> Result<PathBuf> {
    let envelopes = read_log(config::message_log_path())?;
    let records = normalize(&envelopes);
    write_records(&records, RESULTS_PATH)?;
    let report = write_report(&records, &ReportMetadata::default(), REPORT_PATH)?;
    tracing::info!(
        "report written: {} scenario(s) -> {}",
        records.len(),
        report.display()
    );
    if no_open {
        tracing::info!("skipping report open (--no-open)");
    } else {
        open_report(&report);
    }
    Ok(report)
}

/// Open `path` with the platform opener; failure to open is not fatal.
fn open_report(path: &Path) {
    #[cfg(target_os = "macos")]
    const OPENER: &str = "open";
    #[cfg(not(target_os = "macos"))]
    const OPENER: &str = "xdg-open";

    match std::process::Command::new(OPENER).arg(path).spawn() {
        Ok(_) => tracing::info!("opening report: {}", path.display()),
        Err(error) => tracing::warn!("could not open report with {OPENER}: {error}"),
    }
}
