//! Command line interface for the `pitwall` binary.

use clap::{Parser, Subcommand};

/// Command line arguments for the `pitwall` binary.
#[derive(Debug, Parser)]
#[command(
    name = "pitwall",
    version,
    about = "Acceptance suite runner and report generator"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the acceptance suite, then generate and open the HTML report.
    Run {
        /// Do not open the rendered report in a browser.
        #[arg(long)]
        no_open: bool,
        /// Arguments forwarded to the underlying runner.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        runner_args: Vec<String>,
    },
    /// Regenerate the report from an existing event log.
    Report {
        /// Do not open the rendered report in a browser.
        #[arg(long)]
        no_open: bool,
    },
}
