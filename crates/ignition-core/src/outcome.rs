//! Outcome interpretation.
//!
//! The subject has no conventional process exit; it reports through the
//! debug-exit device, which makes the emulator terminate with
//! `(code << 1) | 1`. The low bit being set distinguishes a deliberate
//! signal from any default termination, so an even status can only mean
//! the subject crashed, was killed, or the emulator itself failed.

use std::fmt;
use std::process::ExitStatus;

/// Final result of one harness run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The subject signaled code 0 through the debug-exit device.
    Success,
    /// The subject signaled a non-zero code (decoded).
    Failure(i32),
    /// The emulator terminated without a decodable signal; the raw exit
    /// code is carried when one exists (`None` means killed by signal).
    AbnormalTermination(Option<i32>),
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure(code) => write!(f, "failure (subject code {code})"),
            Self::AbnormalTermination(Some(raw)) => {
                write!(f, "abnormal termination (raw exit status {raw})")
            }
            Self::AbnormalTermination(None) => {
                write!(f, "abnormal termination (killed by signal)")
            }
        }
    }
}

/// Encodes a subject code the way the debug-exit device does.
#[must_use]
pub const fn encode(code: i32) -> i32 {
    (code << 1) | 1
}

/// Maps the emulator's termination status to a [`RunOutcome`].
#[must_use]
pub fn interpret(status: ExitStatus) -> RunOutcome {
    interpret_code(status.code())
}

/// Maps a raw exit code to a [`RunOutcome`].
///
/// Odd statuses decode to the subject's code via the inverse of
/// [`encode`]; everything else is an abnormal termination.
#[must_use]
pub fn interpret_code(code: Option<i32>) -> RunOutcome {
    match code {
        Some(raw) if raw & 1 == 1 => {
            let decoded = raw >> 1;
            if decoded == 0 {
                RunOutcome::Success
            } else {
                RunOutcome::Failure(decoded)
            }
        }
        other => RunOutcome::AbnormalTermination(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_round_trip() {
        for code in 0..=127 {
            let outcome = interpret_code(Some(encode(code)));
            if code == 0 {
                assert_eq!(outcome, RunOutcome::Success);
            } else {
                assert_eq!(outcome, RunOutcome::Failure(code));
            }
        }
    }

    #[test]
    fn test_success_signal_decodes_from_one() {
        assert_eq!(interpret_code(Some(1)), RunOutcome::Success);
    }

    #[test]
    fn test_failure_signal_decodes_from_three() {
        assert_eq!(interpret_code(Some(3)), RunOutcome::Failure(1));
    }

    #[test]
    fn test_even_statuses_are_abnormal() {
        for raw in [0, 2, 4, 42, 128, 254] {
            assert_eq!(
                interpret_code(Some(raw)),
                RunOutcome::AbnormalTermination(Some(raw)),
                "raw status {raw} must not classify as a signaled result"
            );
        }
    }

    #[test]
    fn test_signal_death_is_abnormal() {
        assert_eq!(
            interpret_code(None),
            RunOutcome::AbnormalTermination(None)
        );
    }
}
