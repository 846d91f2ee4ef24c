//! Pipeline driver.
//!
//! Provision → Build → Launch → Interpret, strictly sequential and
//! fail-fast: a stage error ends the run before the next stage starts.

use crate::config::Config;
use crate::error::Result;
use crate::outcome::{self, RunOutcome};
use crate::{build, provision, qemu};
use tracing::info;

/// Runs the whole pipeline once.
///
/// # Errors
///
/// Propagates the first failing stage's [`crate::HarnessError`]. A
/// subject-reported failure is not an error; it comes back as
/// [`RunOutcome::Failure`].
pub fn run(config: &Config) -> Result<RunOutcome> {
    provision::ensure_disk_image(config)?;
    let boot_image = build::build_bootable_image(config)?;
    let status = qemu::launch(&boot_image, &config.disk_path(), config)?;

    let outcome = outcome::interpret(status);
    info!(%outcome, "run finished");
    Ok(outcome)
}
