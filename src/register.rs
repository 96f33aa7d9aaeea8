//! Product registration for the enterprise (SLED/SLES) bootstrap path.
//!
//! Wraps the external `SUSEConnect` client. Registration both associates
//! the target root with a product subscription and adds/refreshes the
//! vendor repositories inside it, so the enterprise path never adds
//! repositories itself.

use anyhow::Result;
use camino::Utf8Path;

use crate::config::Arch;
use crate::error::ZypstrapError;
use crate::executor::{CommandExecutor, CommandSpec, execute_checked};

/// Maps an enterprise distribution version to the registration version
/// token.
///
/// A closed allowlist keyed by the exact version string; versions the
/// tool has not been taught are rejected rather than guessed at.
pub fn map_enterprise_version(product: &str, version: &str) -> Result<&'static str, ZypstrapError> {
    match version {
        "12.0" => Ok("12"),
        _ => Err(ZypstrapError::UnhandledVersion {
            distro: product.to_string(),
            version: version.to_string(),
        }),
    }
}

/// Registers a product against the target root.
///
/// The registration client validates repository signatures during its
/// implicit refresh, so vendor keys must already be imported into the
/// root's trust store when this runs.
pub fn register_product(
    root: &Utf8Path,
    product: &str,
    version_token: &str,
    arch: Arch,
    reg_code: &str,
    executor: &dyn CommandExecutor,
) -> Result<()> {
    let triple = format!("{}/{}/{}", product, version_token, arch);
    tracing::info!("registering product {} in {}", triple, root);

    let args = vec![
        "--root".to_string(),
        root.to_string(),
        "-p".to_string(),
        triple,
        "-r".to_string(),
        reg_code.to_string(),
    ];
    execute_checked(executor, &CommandSpec::new("SUSEConnect", args))
}
