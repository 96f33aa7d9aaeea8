//! Domain-specific error types for zypstrap.
//!
//! This module defines `ZypstrapError`, a `thiserror`-based enum that
//! provides typed error variants for every failure mode the tool can
//! report. Public API functions return `Result<T, ZypstrapError>` for
//! programmatic error handling, while orchestration seams continue to
//! use `anyhow::Result`.
//!
//! `ZypstrapError` implements `Into<anyhow::Error>`, so the `?` operator
//! converts it automatically at seams that return `anyhow::Result`.

use std::io;

/// Formats an IO error kind into a human-readable message.
///
/// Provides consistent messages for common IO error kinds (e.g.,
/// "I/O error: not found") instead of the OS-level messages (e.g.,
/// "No such file or directory (os error 2)"). For unrecognized error
/// kinds, falls back to the OS-level error message directly.
pub(crate) fn io_error_kind_message(err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::NotFound => "I/O error: not found".to_string(),
        io::ErrorKind::PermissionDenied => "I/O error: permission denied".to_string(),
        io::ErrorKind::IsADirectory => "I/O error: is a directory".to_string(),
        _ => format!("I/O error: {}", err),
    }
}

/// Domain-specific error type for zypstrap.
///
/// Every failure is fatal within a single invocation; there is no retry
/// and no rollback of changes already applied to the target root. The
/// binary renders any of these as a single line and exits non-zero.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ZypstrapError {
    /// A required argument was absent or empty.
    #[error("missing required argument: --{name}")]
    MissingRequiredArgument {
        /// Long option name, without the leading dashes.
        name: &'static str,
    },

    /// An argument was supplied with a value outside its accepted set.
    #[error("invalid value for --{name}: {value:?}")]
    InvalidArgumentValue {
        /// Long option name, without the leading dashes.
        name: &'static str,
        /// The rejected value, verbatim.
        value: String,
    },

    /// The requested target architecture cannot be provisioned from this host.
    #[error("target architecture {arch} is not supported on a 32-bit host")]
    IncompatibleArchitecture {
        /// The rejected target architecture.
        arch: String,
    },

    /// An enterprise product was requested without a registration code.
    #[error("a registration code is required to bootstrap {product}")]
    MissingRegistrationCode {
        /// Product name ("SLED" or "SLES").
        product: String,
    },

    /// The distribution version has no entry in the bootstrap allowlist.
    #[error("unhandled {distro} version: {version}")]
    UnhandledVersion {
        /// Distribution or product name the version belongs to.
        distro: String,
        /// The rejected version string, verbatim.
        version: String,
    },

    /// The distribution tag reached dispatch without resolving to a known
    /// family. Unreachable when validation ran first.
    #[error("unhandled distribution: {tag}")]
    UnhandledDistribution {
        /// The raw distribution tag.
        tag: String,
    },

    /// An external command was not found on the host.
    #[error("command not found in PATH: {command}")]
    CommandNotFound {
        /// The command name that was looked up.
        command: String,
    },

    /// An external command failed (non-zero exit, spawn failure, etc.).
    #[error("command execution failed: {command}: {status}")]
    Execution {
        /// The command that was executed, rendered with its arguments.
        command: String,
        /// Human-readable reason for the failure: exit code, signal
        /// information, or a description of the spawn error.
        status: String,
    },

    /// An I/O operation failed with contextual information.
    #[error("{context}: {message}")]
    Io {
        /// What was being done when the error occurred, usually a file
        /// path or an operation description with a path.
        context: String,
        /// Human-readable description of the I/O failure, derived from
        /// [`io_error_kind_message`] for consistent formatting.
        message: String,
        /// The underlying I/O error, preserved for programmatic inspection.
        #[source]
        source: std::io::Error,
    },
}

impl ZypstrapError {
    /// Creates an `Io` variant with the `message` field automatically
    /// derived from the `source` via [`io_error_kind_message`].
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            message: io_error_kind_message(&source),
            source,
        }
    }
}
