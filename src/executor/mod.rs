//! Command execution abstraction for zypstrap.
//!
//! This module provides:
//! - [`CommandSpec`]: Specification for commands to execute
//! - [`ExecutionResult`]: Result of command execution
//! - [`CommandExecutor`]: Trait for command execution strategies
//! - [`RealCommandExecutor`]: Production implementation using `std::process::Command`
//!
//! Every external side effect the tool performs goes through a single
//! [`CommandExecutor`], so `--dry-run` substitutes all of them uniformly.

mod real;

use std::process::ExitStatus;

use anyhow::Result;

use crate::error::ZypstrapError;

pub use real::RealCommandExecutor;

/// Formats string arguments into a space-separated, debug-quoted string.
///
/// Used by error messages and dry-run output to consistently format
/// command arguments (e.g., `"--root" "/tmp/r1"`).
pub(crate) fn format_command_args(args: &[String]) -> String {
    args.iter()
        .map(|a| format!("{:?}", a))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Specification for a command to be executed.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// The command to execute (e.g., "zypper").
    pub command: String,
    /// Command arguments.
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Creates a new CommandSpec with command and args.
    #[must_use]
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    /// Renders the command with its arguments for logs and error messages.
    pub fn rendered(&self) -> String {
        if self.args.is_empty() {
            self.command.clone()
        } else {
            format!("{} {}", self.command, format_command_args(&self.args))
        }
    }
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.rendered())
    }
}

/// Result of command execution.
#[derive(Debug)]
pub struct ExecutionResult {
    /// Exit status of the command (None in dry-run mode).
    pub status: Option<ExitStatus>,
}

impl ExecutionResult {
    /// Returns true if the command executed successfully.
    ///
    /// In dry-run mode (status is None), this always returns true.
    pub fn success(&self) -> bool {
        self.status.is_none_or(|s| s.success())
    }

    /// Returns the exit code if available.
    pub fn code(&self) -> Option<i32> {
        self.status.and_then(|s| s.code())
    }
}

/// Result of an output-capturing query.
#[derive(Debug)]
pub struct CaptureResult {
    /// Exit status of the command (None in dry-run mode).
    pub status: Option<ExitStatus>,
    /// Captured standard output.
    pub stdout: String,
}

impl CaptureResult {
    /// Returns true if the query exited successfully.
    ///
    /// In dry-run mode (status is None), this always returns true.
    pub fn success(&self) -> bool {
        self.status.is_none_or(|s| s.success())
    }
}

/// Trait for command execution.
///
/// `execute` runs a command for its side effects with inherited stdio
/// (the interactive password step depends on that); `capture` runs a
/// query command and returns its exit status together with its standard
/// output. A non-zero exit is a normal `capture` result the caller
/// interprets; only spawn failures and missing commands are errors.
pub trait CommandExecutor: Send + Sync {
    /// Executes a command with the given specification.
    fn execute(&self, spec: &CommandSpec) -> Result<ExecutionResult>;

    /// Executes a command and captures its standard output.
    ///
    /// In dry-run mode the command is logged and the output is empty.
    fn capture(&self, spec: &CommandSpec) -> Result<CaptureResult>;
}

/// Runs a query and converts a non-success result into a typed error,
/// returning the captured output.
pub fn capture_checked(executor: &dyn CommandExecutor, spec: &CommandSpec) -> Result<String> {
    let result = executor.capture(spec)?;
    if !result.success() {
        let status = match result.status {
            Some(s) => s.to_string(),
            None => "unknown status".to_string(),
        };
        return Err(ZypstrapError::Execution {
            command: spec.rendered(),
            status,
        }
        .into());
    }
    Ok(result.stdout)
}

/// Executes a command and converts a non-success result into a typed error.
pub fn execute_checked(executor: &dyn CommandExecutor, spec: &CommandSpec) -> Result<()> {
    let result = executor.execute(spec)?;
    if !result.success() {
        let status = match result.status {
            Some(s) => s.to_string(),
            None => "unknown status".to_string(),
        };
        return Err(ZypstrapError::Execution {
            command: spec.rendered(),
            status,
        }
        .into());
    }
    Ok(())
}
