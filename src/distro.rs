//! Distribution tag parsing.
//!
//! A distribution tag such as `SLED-12.0` names a family and a version.
//! The family selects the bootstrap procedure; the version is passed
//! verbatim to the per-family version allowlists.

use strum::Display;

/// Distribution family, derived from the tag prefix.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
pub enum DistroFamily {
    /// SUSE Linux Enterprise Desktop.
    #[strum(serialize = "SLED")]
    Sled,
    /// SUSE Linux Enterprise Server.
    #[strum(serialize = "SLES")]
    Sles,
    /// openSUSE community distribution.
    #[strum(serialize = "openSUSE")]
    OpenSuse,
    /// The tag matched no known prefix.
    #[strum(serialize = "unknown")]
    Unknown,
}

/// A distribution tag parsed into family and version.
///
/// Derived once from the raw tag at dispatch time; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistroSpec {
    pub family: DistroFamily,
    /// The suffix after the family prefix, verbatim.
    pub version: String,
}

impl DistroSpec {
    /// Parses a raw distribution tag.
    ///
    /// Unmatched tags yield `DistroFamily::Unknown` with an empty
    /// version; validation rejects those before dispatch.
    pub fn parse(tag: &str) -> Self {
        let prefixes = [
            ("SLED-", DistroFamily::Sled),
            ("SLES-", DistroFamily::Sles),
            ("openSUSE-", DistroFamily::OpenSuse),
        ];

        for (prefix, family) in prefixes {
            if let Some(version) = tag.strip_prefix(prefix) {
                return Self {
                    family,
                    version: version.to_string(),
                };
            }
        }

        Self {
            family: DistroFamily::Unknown,
            version: String::new(),
        }
    }
}
