//! Coupon CLI
//!
//! Lists catalogs, selects the best coupon for a request and explains every verdict.

use std::{io, process::ExitCode};

use crate::{config::CliConfig, error::CliError};

mod commands;
mod config;
mod error;
mod logging;
#[cfg(test)]
mod test_helpers;

fn main() -> ExitCode {
    // Load configuration from .env and CLI arguments
    let config = CliConfig::load().unwrap_or_else(|error| error.exit());

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(run_error) => {
            report(&run_error);

            ExitCode::FAILURE
        }
    }
}

#[expect(
    clippy::print_stderr,
    reason = "logging may not be initialised when the run fails"
)]
fn report(run_error: &CliError) {
    eprintln!("Error: {run_error}");
}

fn run(config: &CliConfig) -> Result<(), CliError> {
    logging::init(&config.logging)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    commands::run(&config.command, &mut handle)
}
