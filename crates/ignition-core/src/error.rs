//! Error types for the harness pipeline.

use thiserror::Error;

/// Result type alias for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Errors that abort a harness run.
///
/// Each variant corresponds to one pipeline stage failing fast. A subject
/// that voluntarily reports a non-zero result is *not* an error — that is
/// a [`crate::RunOutcome`], produced after the emulator exits.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Disk image creation failed.
    #[error("provisioning failed: {0}")]
    Provision(String),

    /// The external build exited non-zero or could not be started.
    #[error("build failed: {0}")]
    Build(String),

    /// The emulator could not be started.
    #[error("emulator launch failed: {0}")]
    Launch(String),
}

impl HarnessError {
    /// Creates a provisioning error.
    #[must_use]
    pub fn provision(msg: impl Into<String>) -> Self {
        Self::Provision(msg.into())
    }

    /// Creates a build error.
    #[must_use]
    pub fn build(msg: impl Into<String>) -> Self {
        Self::Build(msg.into())
    }

    /// Creates a launch error.
    #[must_use]
    pub fn launch(msg: impl Into<String>) -> Self {
        Self::Launch(msg.into())
    }
}
