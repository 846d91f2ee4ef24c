//! Bootable image build invocation.
//!
//! The build is entirely external: `cargo bootimage` run from the project
//! root with inherited standard streams, so build diagnostics reach the
//! operator live. The harness trusts the builder's conventional output
//! path and never inspects the artifact.

use crate::config::Config;
use crate::error::{HarnessError, Result};
use std::path::PathBuf;
use std::process::Command;
use tracing::info;

/// Runs the external build and returns the conventional artifact path.
///
/// # Errors
///
/// Returns [`HarnessError::Build`] if the build tool cannot be started or
/// exits non-zero. A broken build must never reach the emulation stage.
pub fn build_bootable_image(config: &Config) -> Result<PathBuf> {
    info!(root = %config.project_root.display(), "building bootable image");

    let status = Command::new(&config.programs.cargo)
        .arg("bootimage")
        .current_dir(&config.project_root)
        .status()
        .map_err(|e| {
            HarnessError::build(format!(
                "failed to run {} bootimage: {e}",
                config.programs.cargo.display()
            ))
        })?;

    if !status.success() {
        return Err(HarnessError::build(format!(
            "`cargo bootimage` exited with {status}"
        )));
    }

    Ok(config.boot_image_path())
}
