//! Bootable image build command.

use ignition_core::{build, Config};
use std::process::ExitCode;
use tracing::error;

/// Runs the external build alone.
pub fn execute(config: &Config) -> ExitCode {
    match build::build_bootable_image(config) {
        Ok(path) => {
            println!("built {}", path.display());
            ExitCode::from(super::EXIT_SUCCESS)
        }
        Err(err) => {
            error!("{err}");
            super::error_exit(&err)
        }
    }
}
