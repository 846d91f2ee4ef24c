//! Harness configuration.
//!
//! Every knob the pipeline depends on lives in one explicit structure,
//! constructed once at startup and passed to each stage. Configuration is
//! loaded from multiple sources with the following priority:
//!
//! 1. Environment variables (IGNITION_*, nested keys joined with `__`)
//! 2. Configuration file (`ignition.toml` in the working directory)
//! 3. Default values
//!
//! ## Example Configuration File
//!
//! ```toml
//! project_root = "."
//!
//! [disk]
//! path = "disk.img"
//! size_mib = 16
//!
//! [build]
//! target = "x86_64-kernel"
//! profile = "debug"
//! artifact = "kernel"
//!
//! [debug_exit]
//! iobase = 244   # 0xf4
//! iosize = 4
//!
//! [secondary_drive]
//! interface = "ide"
//! index = 1
//!
//! [programs]
//! qemu_system = "qemu-system-x86_64"
//! ```

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Harness configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository root the run is pinned to. Relative paths resolve
    /// against it and the build runs with it as working directory.
    pub project_root: PathBuf,
    /// Persistent disk image settings.
    pub disk: DiskConfig,
    /// Bootable image build settings.
    pub build: BuildConfig,
    /// Debug-exit device settings.
    pub debug_exit: DebugExitConfig,
    /// Secondary data drive settings.
    pub secondary_drive: SecondaryDriveConfig,
    /// External program names.
    pub programs: Programs,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            disk: DiskConfig::default(),
            build: BuildConfig::default(),
            debug_exit: DebugExitConfig::default(),
            secondary_drive: SecondaryDriveConfig::default(),
            programs: Programs::default(),
        }
    }
}

impl Config {
    /// Loads configuration from files and environment.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. Environment variables (IGNITION_*)
    /// 2. `ignition.toml` in the working directory
    /// 3. Default values
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file("ignition.toml"))
            .merge(Env::prefixed("IGNITION_").split("__"))
            .extract()
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("IGNITION_").split("__"))
            .extract()
    }

    /// Resolves a path against the project root.
    ///
    /// Absolute paths are returned unchanged.
    #[must_use]
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    /// Returns the resolved path of the persistent disk image.
    #[must_use]
    pub fn disk_path(&self) -> PathBuf {
        self.resolve(&self.disk.path)
    }

    /// Returns the conventional path of the build artifact:
    /// `target/<target>/<profile>/bootimage-<artifact>.bin`.
    ///
    /// The path is derived, never validated; the builder's output
    /// convention is trusted.
    #[must_use]
    pub fn boot_image_path(&self) -> PathBuf {
        self.project_root
            .join("target")
            .join(&self.build.target)
            .join(&self.build.profile)
            .join(format!("bootimage-{}.bin", self.build.artifact))
    }
}

/// Persistent disk image settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskConfig {
    /// Image path, resolved against the project root.
    pub path: PathBuf,
    /// Image capacity in MiB. Only used at creation time; an existing
    /// image is never resized.
    pub size_mib: u64,
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("disk.img"),
            size_mib: 16,
        }
    }
}

/// Bootable image build settings.
///
/// These name the builder's target and profile; together they determine
/// the conventional artifact path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Target triple / custom target name.
    pub target: String,
    /// Build profile directory (`debug` or `release`).
    pub profile: String,
    /// Artifact base name; the builder emits `bootimage-<artifact>.bin`.
    pub artifact: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            target: "x86_64-kernel".to_string(),
            profile: "debug".to_string(),
            artifact: "kernel".to_string(),
        }
    }
}

/// Debug-exit device settings.
///
/// The device is the only channel from the subject back to the harness:
/// writing a code to the port makes the emulator exit with
/// `(code << 1) | 1`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugExitConfig {
    /// I/O port the device is mapped at.
    pub iobase: u16,
    /// Port width in bytes.
    pub iosize: u8,
}

impl Default for DebugExitConfig {
    fn default() -> Self {
        Self {
            iobase: 0xf4,
            iosize: 0x04,
        }
    }
}

/// Secondary data drive settings.
///
/// The drive carries the persistent disk image on a slot distinct from
/// the boot drive, so the subject can exercise storage paths separately
/// from boot media.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecondaryDriveConfig {
    /// Controller interface (`ide` puts it on the ATA bus the subject's
    /// driver expects).
    pub interface: String,
    /// Slot index on the interface; 1 is the primary-bus slave.
    pub index: u8,
}

impl Default for SecondaryDriveConfig {
    fn default() -> Self {
        Self {
            interface: "ide".to_string(),
            index: 1,
        }
    }
}

/// External program names.
///
/// Overridable for nonstandard hosts and for tests, which substitute
/// scripted stand-ins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Programs {
    /// Disk image utility.
    pub qemu_img: PathBuf,
    /// Build tool front end; invoked as `<cargo> bootimage`.
    pub cargo: PathBuf,
    /// Emulator binary.
    pub qemu_system: PathBuf,
}

impl Default for Programs {
    fn default() -> Self {
        Self {
            qemu_img: PathBuf::from("qemu-img"),
            cargo: PathBuf::from("cargo"),
            qemu_system: PathBuf::from("qemu-system-x86_64"),
        }
    }
}
