//! CLI command implementations.
//!
//! Commands map onto the pipeline stages:
//!
//! - `run` — the full Provision → Build → Launch → Interpret pipeline
//! - `provision` — the storage stage alone
//! - `build` — the build stage alone
//!
//! The process exit code encodes the terminal state, one code per state,
//! so automation can tell a subject-reported failure from a harness
//! failure:
//!
//! | code | state                |
//! |------|----------------------|
//! | 0    | Success              |
//! | 1    | Failure              |
//! | 2    | AbnormalTermination  |
//! | 3    | ProvisioningError    |
//! | 4    | BuildError           |
//! | 5    | LaunchError          |
//! | 64   | configuration error  |

use anyhow::Context;
use clap::{Parser, Subcommand};
use ignition_core::{Config, HarnessError, RunOutcome};
use std::path::PathBuf;
use std::process::ExitCode;

pub mod build;
pub mod provision;
pub mod run;

/// Exit code for a subject-reported success.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit code for a subject-reported failure.
pub const EXIT_FAILURE: u8 = 1;
/// Exit code for an abnormal termination (crash, kill, emulator fault).
pub const EXIT_ABNORMAL: u8 = 2;
/// Exit code for a provisioning error.
pub const EXIT_PROVISION: u8 = 3;
/// Exit code for a build error.
pub const EXIT_BUILD: u8 = 4;
/// Exit code for an emulator launch error.
pub const EXIT_LAUNCH: u8 = 5;
/// Exit code for a configuration error (EX_USAGE).
pub const EXIT_CONFIG: u8 = 64;

/// Ignition - boot-test harness for bare-metal kernel images
#[derive(Parser)]
#[command(name = "ignition")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (default: ignition.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Repository root the run is pinned to
    #[arg(long, global = true)]
    pub project_root: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Provision, build, boot the image under QEMU and report the outcome
    Run,

    /// Ensure the persistent disk image exists
    Provision,

    /// Build the bootable image
    Build,
}

/// Loads the configuration, applying CLI overrides.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or parsed.
pub fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::load().context("loading configuration")?,
    };

    if let Some(root) = &cli.project_root {
        config.project_root = root.clone();
    }

    Ok(config)
}

/// Maps a run outcome to the process exit code.
#[must_use]
pub fn outcome_exit(outcome: &RunOutcome) -> ExitCode {
    match outcome {
        RunOutcome::Success => ExitCode::from(EXIT_SUCCESS),
        RunOutcome::Failure(_) => ExitCode::from(EXIT_FAILURE),
        RunOutcome::AbnormalTermination(_) => ExitCode::from(EXIT_ABNORMAL),
    }
}

/// Maps a failed stage to the process exit code.
#[must_use]
pub fn error_exit(err: &HarnessError) -> ExitCode {
    match err {
        HarnessError::Provision(_) => ExitCode::from(EXIT_PROVISION),
        HarnessError::Build(_) => ExitCode::from(EXIT_BUILD),
        HarnessError::Launch(_) => ExitCode::from(EXIT_LAUNCH),
    }
}
