//! Shared test helpers: output constructors and a quiet `AppContext`.

#![allow(dead_code)]

use std::process::{ExitCode, ExitStatus, Output};

use dockyard_cli::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};

// ── Cross-platform ExitStatus construction ───────────────────────────────────

/// Build an `ExitStatus` from a logical exit code (0 = success, non-zero = failure).
///
/// On Unix the raw wait-status encodes the exit code in bits 8–15, so we shift.
/// On Windows `ExitStatusExt::from_raw` takes the exit code directly.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    ExitStatus::from_raw(code as u32)
}

// ── Output constructors ──────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(code: i32, stderr: &[u8]) -> Output {
    Output {
        status: exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

// ── AppContext ───────────────────────────────────────────────────────────────

/// Quiet, colorless, non-interactive context.
pub fn app(json: bool) -> AppContext {
    AppContext::new(&AppFlags {
        output: OutputFlags {
            no_color: true,
            quiet: true,
            json,
        },
        behaviour: BehaviourFlags { yes: true },
    })
}

/// `ExitCode` has no accessor for its value; compare the debug form.
pub fn assert_exit(actual: ExitCode, expected: ExitCode) {
    assert_eq!(format!("{actual:?}"), format!("{expected:?}"));
}
