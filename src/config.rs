//! Bootstrap request configuration and parameter validation.
//!
//! [`BootstrapRequest`] is the immutable configuration object built once
//! from the CLI and threaded through every component call. Validation
//! fails fast, before any external call is made.

use camino::Utf8PathBuf;
use clap::ValueEnum;
use strum::Display;

use crate::distro::{DistroFamily, DistroSpec};
use crate::error::ZypstrapError;

/// Target architecture for the provisioned root.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Display)]
#[value(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Arch {
    I586,
    X86_64,
}

impl Arch {
    /// Returns the architecture of the running host.
    pub fn host() -> Self {
        if host_is_64bit() { Self::X86_64 } else { Self::I586 }
    }
}

/// Returns true when the running host is a 64-bit machine.
pub fn host_is_64bit() -> bool {
    cfg!(target_pointer_width = "64")
}

/// A validated request to provision one target root.
///
/// Built once from the CLI arguments and immutable thereafter. `quiet`
/// and `dry_run` apply uniformly to every downstream external call.
#[derive(Debug, Clone)]
pub struct BootstrapRequest {
    /// Target root directory to provision.
    pub root: Utf8PathBuf,
    /// Raw distribution tag (e.g., "SLED-12.0"). `None` skips package
    /// provisioning and runs only post-install finalization.
    pub distro: Option<String>,
    /// Target architecture.
    pub arch: Arch,
    /// Registration code for enterprise products.
    pub reg_code: Option<String>,
    /// Verbatim password value for the target root's shadow file.
    pub root_pass: Option<String>,
    /// Non-interactive mode with suppressed package-manager output.
    pub quiet: bool,
    /// Print external commands instead of executing them.
    pub dry_run: bool,
}

impl BootstrapRequest {
    /// Validates the request against the given host bitness.
    ///
    /// The architecture compatibility check runs first; an `x86_64`
    /// target cannot be provisioned from a 32-bit host. The distro tag,
    /// when present, must resolve to a known family here so that an
    /// unknown tag fails before any side effect occurs.
    pub fn validate(&self, host_64bit: bool) -> Result<(), ZypstrapError> {
        if self.arch == Arch::X86_64 && !host_64bit {
            return Err(ZypstrapError::IncompatibleArchitecture {
                arch: self.arch.to_string(),
            });
        }

        if self.root.as_str().is_empty() {
            return Err(ZypstrapError::MissingRequiredArgument { name: "root" });
        }

        if let Some(tag) = &self.distro {
            let spec = DistroSpec::parse(tag);
            if spec.family == DistroFamily::Unknown {
                return Err(ZypstrapError::InvalidArgumentValue {
                    name: "distro",
                    value: tag.clone(),
                });
            }
        }

        Ok(())
    }
}
