use std::process::ExitCode;

use metalink_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() -> ExitCode {
    // Initialize logging as early as possible; fall back to stderr if the state dir is unwritable.
    if let Err(e) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("log file unavailable, logging to stderr: {:#}", e);
    }

    match CliCommand::run_from_args() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("mlk error: {:#}", err);
            ExitCode::from(1)
        }
    }
}
