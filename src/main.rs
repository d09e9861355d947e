mod cli;
mod cmd;
mod command;
mod config;
mod error;
mod logger;
mod plan;
mod shell;
mod vcs;

use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    // A missing log file must not stop the plan from being printed
    let _ = logger::init();
    info!(args = ?std::env::args().collect::<Vec<_>>(), "rebase-plan start");

    match cli::run() {
        Ok(()) => {
            info!("rebase-plan finished successfully");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = ?err, "rebase-plan failed");
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
