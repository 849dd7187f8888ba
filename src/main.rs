//! Binary entry point: run the suite or regenerate the report.

mod cli;

use clap::Parser;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let code = match cli.command {
        Command::Run {
            no_open,
            runner_args,
        } => match pitwall::runner::run_suite(&runner_args, no_open).await {
            Ok(code) => code,
            Err(error) => {
                tracing::error!("failed to run the acceptance suite: {error}");
                1
            }
        },
        Command::Report { no_open } => match pitwall::runner::generate_report(no_open) {
            Ok(_) => 0,
            Err(error) => {
                tracing::error!("{error}");
                1
            }
        },
    };
    std::process::exit(code);
}
