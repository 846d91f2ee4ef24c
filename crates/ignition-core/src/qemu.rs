//! Emulator topology assembly and launch.
//!
//! The machine topology is fixed before the emulator starts and never
//! reconfigured: a raw boot drive, the isa-debug-exit device, a serial
//! console on the harness's own standard streams, and the persistent disk
//! as a secondary raw drive on its own slot. The assembled argument list
//! is the wire-level contract with the emulator and must be identical
//! across launches with identical inputs.

use crate::config::Config;
use crate::error::{HarnessError, Result};
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, ExitStatus};
use tracing::{debug, info};

/// Assembles the emulator argument list for the given images.
///
/// Deterministic: identical inputs produce a byte-identical vector.
#[must_use]
pub fn topology_args(boot_image: &Path, disk_image: &Path, config: &Config) -> Vec<OsString> {
    let mut args = Vec::with_capacity(8);

    // Primary boot drive, raw format.
    args.push(OsString::from("-drive"));
    let mut boot = OsString::from("format=raw,file=");
    boot.push(boot_image);
    args.push(boot);

    // Debug-exit device: the subject's only way to report a result.
    args.push(OsString::from("-device"));
    args.push(OsString::from(format!(
        "isa-debug-exit,iobase={:#04x},iosize={:#04x}",
        config.debug_exit.iobase, config.debug_exit.iosize
    )));

    // Serial console on the harness's stdio.
    args.push(OsString::from("-serial"));
    args.push(OsString::from("stdio"));

    // Secondary data drive on a slot distinct from the boot drive.
    args.push(OsString::from("-drive"));
    let mut data = OsString::from("file=");
    data.push(disk_image);
    data.push(format!(
        ",format=raw,if={},index={}",
        config.secondary_drive.interface, config.secondary_drive.index
    ));
    args.push(data);

    args
}

/// Launches the emulator with the assembled topology and blocks until it
/// terminates.
///
/// The child inherits the harness's standard streams, so the subject's
/// serial output is live and interactive input is forwarded. The returned
/// status is the raw termination status; interpreting it is the outcome
/// stage's job — a non-zero emulator exit is not an error here.
///
/// # Errors
///
/// Returns [`HarnessError::Launch`] if the emulator process cannot be
/// started at all. That is a configuration failure, distinct from any
/// result the subject reports.
pub fn launch(boot_image: &Path, disk_image: &Path, config: &Config) -> Result<ExitStatus> {
    let args = topology_args(boot_image, disk_image, config);
    debug!(?args, "assembled emulator topology");
    info!(
        emulator = %config.programs.qemu_system.display(),
        boot = %boot_image.display(),
        "launching emulator"
    );

    Command::new(&config.programs.qemu_system)
        .args(&args)
        .status()
        .map_err(|e| {
            HarnessError::launch(format!(
                "failed to start {}: {e}",
                config.programs.qemu_system.display()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_topology_matches_wire_contract() {
        let config = Config::default();
        let args = topology_args(
            Path::new("target/x86_64-kernel/debug/bootimage-kernel.bin"),
            Path::new("disk.img"),
            &config,
        );
        let expected: Vec<OsString> = [
            "-drive",
            "format=raw,file=target/x86_64-kernel/debug/bootimage-kernel.bin",
            "-device",
            "isa-debug-exit,iobase=0xf4,iosize=0x04",
            "-serial",
            "stdio",
            "-drive",
            "file=disk.img,format=raw,if=ide,index=1",
        ]
        .iter()
        .map(OsString::from)
        .collect();
        assert_eq!(args, expected);
    }

    #[test]
    fn test_topology_is_deterministic() {
        let config = Config::default();
        let boot = PathBuf::from("/tmp/bootimage-kernel.bin");
        let disk = PathBuf::from("/tmp/disk.img");
        assert_eq!(
            topology_args(&boot, &disk, &config),
            topology_args(&boot, &disk, &config)
        );
    }

    #[test]
    fn test_missing_emulator_is_a_launch_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.programs.qemu_system = dir.path().join("no-such-qemu");

        let err = launch(Path::new("boot.bin"), Path::new("disk.img"), &config).unwrap_err();
        assert!(matches!(err, HarnessError::Launch(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_emulator_exit_status_is_passed_through() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();

        let fake = dir.path().join("fake-qemu");
        std::fs::write(&fake, "#!/bin/sh\nexit 3\n").unwrap();
        std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();
        config.programs.qemu_system = fake;

        let status = launch(Path::new("boot.bin"), Path::new("disk.img"), &config).unwrap();
        assert_eq!(status.code(), Some(3));
    }
}
