//! Command runner abstraction for pipeline steps.
//!
//! Pipeline logic talks to child processes only through [`CommandRunner`],
//! so tests can substitute a recording fake or a `mockall` mock for
//! [`ProcessRunner`].

use std::io;
use std::process::Command;

use super::Invocation;

/// Exit status of a finished child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    code: Option<i32>,
}

impl ExitOutcome {
    /// An outcome with the given exit code.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// An outcome for a child terminated without an exit code.
    #[must_use]
    pub const fn signalled() -> Self {
        Self { code: None }
    }

    /// The exit code, if the child exited normally.
    #[must_use]
    pub const fn code(self) -> Option<i32> {
        self.code
    }

    /// Whether the child exited with status zero.
    #[must_use]
    pub const fn success(self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// Executes invocations and reports how they exited.
pub trait CommandRunner {
    /// Runs `invocation` to completion.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the program could not be started.
    fn run(&self, invocation: &Invocation) -> io::Result<ExitOutcome>;
}

/// Runs invocations as real child processes.
///
/// The child inherits stdio and the parent environment, extended with the
/// invocation's overlay.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ExitOutcome> {
        let status = Command::new(invocation.program())
            .args(invocation.arguments())
            .current_dir(invocation.cwd())
            .envs(invocation.env_overlay())
            .status()?;
        Ok(ExitOutcome {
            code: status.code(),
        })
    }
}
