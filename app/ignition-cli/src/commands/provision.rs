//! Storage provisioning command.

use ignition_core::{provision, Config, Provisioned};
use std::process::ExitCode;
use tracing::error;

/// Ensures the persistent disk image exists.
pub fn execute(config: &Config) -> ExitCode {
    match provision::ensure_disk_image(config) {
        Ok(Provisioned::Created) => {
            println!(
                "created {} ({} MiB, raw)",
                config.disk_path().display(),
                config.disk.size_mib
            );
            ExitCode::from(super::EXIT_SUCCESS)
        }
        Ok(Provisioned::AlreadyPresent) => {
            println!("{} already present", config.disk_path().display());
            ExitCode::from(super::EXIT_SUCCESS)
        }
        Err(err) => {
            error!("{err}");
            super::error_exit(&err)
        }
    }
}
