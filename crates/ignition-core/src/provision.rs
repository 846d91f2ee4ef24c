//! Storage provisioning.
//!
//! Ensures the persistent raw disk image exists before the run. The check
//! is existence only: an image left behind by an earlier run is reused
//! as-is, whatever its size or contents, and is never truncated or
//! recreated. Creation is delegated to the disk utility (`qemu-img`).

use crate::config::Config;
use crate::error::{HarnessError, Result};
use std::process::Command;
use tracing::{debug, info};

/// What the provisioner did for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    /// The image was created fresh.
    Created,
    /// An image already existed at the path; nothing was done.
    AlreadyPresent,
}

/// Ensures the disk image exists, creating it if absent.
///
/// # Errors
///
/// Returns [`HarnessError::Provision`] if the disk utility cannot be
/// started or exits non-zero. This is fatal; the run must not continue.
pub fn ensure_disk_image(config: &Config) -> Result<Provisioned> {
    let path = config.disk_path();
    if path.exists() {
        debug!(path = %path.display(), "disk image present, leaving untouched");
        return Ok(Provisioned::AlreadyPresent);
    }

    info!(
        path = %path.display(),
        size_mib = config.disk.size_mib,
        "creating disk image"
    );

    let status = Command::new(&config.programs.qemu_img)
        .arg("create")
        .arg("-f")
        .arg("raw")
        .arg(&path)
        .arg(format!("{}M", config.disk.size_mib))
        .status()
        .map_err(|e| {
            HarnessError::provision(format!(
                "failed to run {}: {e}",
                config.programs.qemu_img.display()
            ))
        })?;

    if !status.success() {
        return Err(HarnessError::provision(format!(
            "{} exited with {status}",
            config.programs.qemu_img.display()
        )));
    }

    Ok(Provisioned::Created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn test_config(root: &Path) -> Config {
        let mut config = Config::default();
        config.project_root = root.to_path_buf();
        // A program that cannot exist; any invocation fails the test.
        config.programs.qemu_img = root.join("no-such-qemu-img");
        config
    }

    #[test]
    fn test_existing_image_is_left_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let path = config.disk_path();
        std::fs::write(&path, b"pre-existing contents").unwrap();

        assert_eq!(
            ensure_disk_image(&config).unwrap(),
            Provisioned::AlreadyPresent
        );
        assert_eq!(
            ensure_disk_image(&config).unwrap(),
            Provisioned::AlreadyPresent
        );
        assert_eq!(
            std::fs::read(&path).unwrap(),
            b"pre-existing contents".to_vec()
        );
    }

    #[test]
    fn test_missing_utility_is_a_provision_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());

        let err = ensure_disk_image(&config).unwrap_err();
        assert!(matches!(err, HarnessError::Provision(_)));
        assert!(!config.disk_path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_creates_image_via_utility() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());

        // Stand-in utility: `create -f raw <path> <size>M` writes <path>.
        let fake = dir.path().join("fake-qemu-img");
        std::fs::write(&fake, "#!/bin/sh\n: > \"$4\"\n").unwrap();
        std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();
        config.programs.qemu_img = fake;

        assert_eq!(ensure_disk_image(&config).unwrap(), Provisioned::Created);
        assert!(config.disk_path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_utility_is_a_provision_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());

        let fake = dir.path().join("fake-qemu-img");
        std::fs::write(&fake, "#!/bin/sh\nexit 1\n").unwrap();
        std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();
        config.programs.qemu_img = fake;

        let err = ensure_disk_image(&config).unwrap_err();
        assert!(matches!(err, HarnessError::Provision(_)));
    }
}
