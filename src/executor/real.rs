//! Real command executor implementation.
//!
//! [`RealCommandExecutor`] runs commands with `std::process::Command`.
//! Side-effecting calls inherit the parent's stdio so that interactive
//! steps (the in-root `passwd` prompt) and package-manager progress
//! output work unchanged; query calls capture stdout.

use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use which::which;

use super::{CaptureResult, CommandExecutor, CommandSpec, ExecutionResult};
use crate::error::ZypstrapError;

/// Command executor that runs actual system commands.
///
/// When `dry_run` is true, commands are logged but not executed:
/// `execute()` returns `Ok(ExecutionResult { status: None })` and
/// `capture()` returns an empty result with no status.
pub struct RealCommandExecutor {
    pub dry_run: bool,
}

impl RealCommandExecutor {
    fn resolve(&self, spec: &CommandSpec) -> Result<std::path::PathBuf> {
        which(&spec.command).map_err(|_| {
            ZypstrapError::CommandNotFound {
                command: spec.command.clone(),
            }
            .into()
        })
    }
}

impl CommandExecutor for RealCommandExecutor {
    fn execute(&self, spec: &CommandSpec) -> Result<ExecutionResult> {
        if self.dry_run {
            tracing::info!("dry run: {}", spec);
            return Ok(ExecutionResult { status: None });
        }

        let cmd = self.resolve(spec)?;
        tracing::trace!("command found: {}: {}", spec.command, cmd.to_string_lossy());

        let status = Command::new(cmd)
            .args(&spec.args)
            .status()
            .with_context(|| format!("failed to spawn command: {}", spec))?;

        tracing::trace!("executed command: {}: success={}", spec.command, status.success());

        Ok(ExecutionResult {
            status: Some(status),
        })
    }

    fn capture(&self, spec: &CommandSpec) -> Result<CaptureResult> {
        if self.dry_run {
            tracing::info!("dry run: {}", spec);
            return Ok(CaptureResult {
                status: None,
                stdout: String::new(),
            });
        }

        let cmd = self.resolve(spec)?;
        let output = Command::new(cmd)
            .args(&spec.args)
            .stderr(Stdio::inherit())
            .output()
            .with_context(|| format!("failed to spawn command: {}", spec))?;

        Ok(CaptureResult {
            status: Some(output.status),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
