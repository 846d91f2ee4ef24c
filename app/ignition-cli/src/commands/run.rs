//! Full pipeline run command.

use ignition_core::{pipeline, Config};
use std::process::ExitCode;
use tracing::error;

/// Executes the full pipeline and reports the outcome.
pub fn execute(config: &Config) -> ExitCode {
    match pipeline::run(config) {
        Ok(outcome) => {
            eprintln!("ignition: {outcome}");
            super::outcome_exit(&outcome)
        }
        Err(err) => {
            error!("{err}");
            super::error_exit(&err)
        }
    }
}
