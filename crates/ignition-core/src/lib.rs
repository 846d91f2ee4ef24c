//! Core pipeline for the ignition boot-test harness.
//!
//! Ignition boots a bare-metal kernel image under QEMU and turns the
//! emulator's exit status into a machine-readable test outcome. The
//! pipeline has four stages, run strictly in order:
//!
//! 1. [`provision`] — ensure the persistent raw disk image exists.
//! 2. [`build`] — invoke the external build that produces the bootable
//!    image.
//! 3. [`qemu`] — assemble the machine topology and run the emulator as a
//!    foreground child process.
//! 4. [`outcome`] — map the emulator's exit status to a [`RunOutcome`]
//!    via the isa-debug-exit encoding.
//!
//! Any stage failure aborts the run; there are no retries. The kernel
//! under test, `cargo bootimage`, `qemu-img` and `qemu-system-x86_64` are
//! external collaborators reached only through their command lines.

pub mod build;
pub mod config;
pub mod error;
pub mod outcome;
pub mod pipeline;
pub mod provision;
pub mod qemu;

pub use config::Config;
pub use error::{HarnessError, Result};
pub use outcome::RunOutcome;
pub use provision::Provisioned;
