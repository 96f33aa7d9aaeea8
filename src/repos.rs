//! Repository resolution for the community (openSUSE) bootstrap path.
//!
//! The version-to-URL mapping is a closed allowlist keyed by the exact
//! version string. New releases are supported by adding entries, never by
//! inferring URL patterns from the version.

use url::Url;

use crate::error::ZypstrapError;

/// A package repository to register in the target root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryEntry {
    pub url: Url,
    pub label: &'static str,
}

/// Base (OSS) repository label.
pub const BASE_LABEL: &str = "openSUSE";
/// Update repository label.
pub const UPDATE_LABEL: &str = "openSUSE update";

/// Resolves an openSUSE version to its base and update repositories.
///
/// Returns exactly two entries (base first, update second) for known
/// versions and `UnhandledVersion` for everything else.
pub fn resolve(version: &str) -> Result<Vec<RepositoryEntry>, ZypstrapError> {
    let (base, update) = match version {
        "13.1" => (
            "http://download.opensuse.org/distribution/13.1/repo/oss/",
            "http://download.opensuse.org/update/13.1/",
        ),
        _ => {
            return Err(ZypstrapError::UnhandledVersion {
                distro: "openSUSE".to_string(),
                version: version.to_string(),
            });
        }
    };

    Ok(vec![
        RepositoryEntry {
            url: Url::parse(base).expect("allowlisted repository URL is valid"),
            label: BASE_LABEL,
        },
        RepositoryEntry {
            url: Url::parse(update).expect("allowlisted repository URL is valid"),
            label: UPDATE_LABEL,
        },
    ])
}
