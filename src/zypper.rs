//! zypper client wrapper.
//!
//! Builds and runs the `zypper` invocations the bootstrap paths need:
//! adding a repository to an alternate root and installing a package
//! pattern into it. Quiet mode maps to zypper's global
//! `--non-interactive --quiet` flags on every call.

use anyhow::Result;
use camino::Utf8Path;

use crate::executor::{CommandExecutor, CommandSpec, execute_checked};
use crate::repos::RepositoryEntry;

/// zypper exit code for an invalid argument, returned when adding a
/// repository whose alias already exists.
const ZYPPER_EXIT_INVALID_ARGS: i32 = 4;

fn global_args(root: &Utf8Path, quiet: bool) -> Vec<String> {
    let mut args = vec!["--root".to_string(), root.to_string()];
    if quiet {
        args.push("--non-interactive".to_string());
        args.push("--quiet".to_string());
    }
    args
}

/// Adds a repository to the target root.
///
/// Re-adding an alias that already exists is tolerated, so repeated runs
/// against the same root converge on the same repository set; zypper
/// itself owns duplicate handling.
pub fn add_repository(
    root: &Utf8Path,
    entry: &RepositoryEntry,
    quiet: bool,
    executor: &dyn CommandExecutor,
) -> Result<()> {
    let mut args = global_args(root, quiet);
    args.push("addrepo".to_string());
    args.push(entry.url.to_string());
    args.push(entry.label.to_string());

    let spec = CommandSpec::new("zypper", args);
    tracing::info!("adding repository {:?}: {}", entry.label, entry.url);

    let result = executor.execute(&spec)?;
    if !result.success() {
        if result.code() == Some(ZYPPER_EXIT_INVALID_ARGS) {
            tracing::warn!("repository {:?} already present, keeping existing entry", entry.label);
            return Ok(());
        }
        return Err(crate::error::ZypstrapError::Execution {
            command: spec.rendered(),
            status: result
                .status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "unknown status".to_string()),
        }
        .into());
    }
    Ok(())
}

/// Installs a named package pattern into the target root.
pub fn install_pattern(
    root: &Utf8Path,
    pattern: &str,
    recommends: bool,
    quiet: bool,
    executor: &dyn CommandExecutor,
) -> Result<()> {
    let mut args = global_args(root, quiet);
    args.push("install".to_string());
    args.push("-t".to_string());
    args.push("pattern".to_string());
    if !recommends {
        args.push("--no-recommends".to_string());
    }
    args.push(pattern.to_string());

    tracing::info!("installing pattern {:?} into {}", pattern, root);
    execute_checked(executor, &CommandSpec::new("zypper", args))
}
