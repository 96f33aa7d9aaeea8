//! Vendor trust key propagation.
//!
//! The enterprise bootstrap path copies the vendor package-signing keys
//! the host already trusts into the target root's trust store, so the
//! registration client's repository refresh can validate signatures.
//!
//! Keys are enumerated from the host rpm database, filtered by a fixed
//! substring match on their summary text, and moved one at a time
//! through a temporary file that is removed on every exit path.

use std::io::Write;

use anyhow::{Context, Result};
use camino::Utf8Path;

use crate::executor::{CommandExecutor, CommandSpec, capture_checked, execute_checked};

/// Summary text identifying the vendor's package-signing keys among the
/// host's installed `gpg-pubkey` packages.
const VENDOR_KEY_PATTERN: &str = "SuSE Package Signing Key";

/// rpm query format listing one key per line as `name<TAB>summary`.
const KEY_LIST_FORMAT: &str = "%{NAME}-%{VERSION}-%{RELEASE}\t%{SUMMARY}\n";

const ARMOR_BEGIN: &str = "-----BEGIN PGP PUBLIC KEY BLOCK-----";
const ARMOR_END: &str = "-----END PGP PUBLIC KEY BLOCK-----";

/// Imports every vendor signing key trusted on the host into the target
/// root's trust store.
pub fn propagate_vendor_keys(root: &Utf8Path, executor: &dyn CommandExecutor) -> Result<()> {
    let listing = executor
        .capture(&CommandSpec::new(
            "rpm",
            vec![
                "-q".to_string(),
                "gpg-pubkey".to_string(),
                "--qf".to_string(),
                KEY_LIST_FORMAT.to_string(),
            ],
        ))
        .context("failed to list installed trust keys")?;

    // rpm -q exits non-zero when no gpg-pubkey package is installed at
    // all; a host without trust keys simply has nothing to propagate.
    if !listing.success() {
        tracing::debug!("no trust keys installed on the host");
        return Ok(());
    }

    let keys = vendor_keys(&listing.stdout);
    tracing::debug!("found {} vendor signing key(s) on the host", keys.len());

    for key in keys {
        let info = capture_checked(
            executor,
            &CommandSpec::new("rpm", vec!["-qi".to_string(), key.clone()]),
        )
        .with_context(|| format!("failed to export trust key {}", key))?;

        let Some(block) = armored_block(&info) else {
            tracing::warn!("key {} carries no armored key block, skipping", key);
            continue;
        };

        import_key(root, &key, block, executor)?;
    }

    Ok(())
}

/// Filters an rpm key listing down to the vendor signing key names.
fn vendor_keys(listing: &str) -> Vec<String> {
    listing
        .lines()
        .filter_map(|line| {
            let (name, summary) = line.split_once('\t')?;
            summary
                .contains(VENDOR_KEY_PATTERN)
                .then(|| name.trim().to_string())
        })
        .collect()
}

/// Extracts the armored public key block from rpm package info text.
fn armored_block(info: &str) -> Option<&str> {
    let start = info.find(ARMOR_BEGIN)?;
    let end = info[start..].find(ARMOR_END)? + start + ARMOR_END.len();
    Some(&info[start..end])
}

/// Writes a key block to a temporary file and imports it into the target
/// root. The temporary file is deleted when it goes out of scope, on
/// failure as well as success.
fn import_key(
    root: &Utf8Path,
    name: &str,
    block: &str,
    executor: &dyn CommandExecutor,
) -> Result<()> {
    let mut tmp = tempfile::Builder::new()
        .prefix("zypstrap-key-")
        .suffix(".asc")
        .tempfile()
        .context("failed to create temporary key file")?;
    tmp.write_all(block.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .context("failed to write temporary key file")?;

    tracing::info!("importing trust key {} into {}", name, root);
    execute_checked(
        executor,
        &CommandSpec::new(
            "rpm",
            vec![
                "--root".to_string(),
                root.to_string(),
                "--import".to_string(),
                tmp.path().to_string_lossy().into_owned(),
            ],
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "gpg-pubkey-307e3d54-4be01a65\tgpg(SuSE Package Signing Key <build@suse.de>)\n\
        gpg-pubkey-3dbdc284-53674dd4\tgpg(openSUSE Project Signing Key <opensuse@opensuse.org>)\n\
        gpg-pubkey-9c800aca-4be01999\tgpg(SuSE Package Signing Key <build@suse.de>)\n";

    #[test]
    fn test_vendor_keys_filters_by_summary() {
        let keys = vendor_keys(LISTING);
        assert_eq!(
            keys,
            vec!["gpg-pubkey-307e3d54-4be01a65", "gpg-pubkey-9c800aca-4be01999"]
        );
    }

    #[test]
    fn test_vendor_keys_empty_listing() {
        assert!(vendor_keys("").is_empty());
    }

    #[test]
    fn test_vendor_keys_ignores_malformed_lines() {
        let keys = vendor_keys("no-tab-in-this-line\n");
        assert!(keys.is_empty());
    }

    #[test]
    fn test_armored_block_extracted() {
        let info = format!(
            "Name        : gpg-pubkey\nDescription :\n{}\nVersion: GnuPG v1.4.2\n\nmQENBE...\n{}\n\n",
            ARMOR_BEGIN, ARMOR_END
        );
        let block = armored_block(&info).unwrap();
        assert!(block.starts_with(ARMOR_BEGIN));
        assert!(block.ends_with(ARMOR_END));
        assert!(block.contains("mQENBE"));
    }

    #[test]
    fn test_armored_block_missing() {
        assert!(armored_block("Name: gpg-pubkey\nDescription: no block here\n").is_none());
    }

    #[test]
    fn test_armored_block_missing_end_marker() {
        let info = format!("{}\ntruncated", ARMOR_BEGIN);
        assert!(armored_block(&info).is_none());
    }
}
