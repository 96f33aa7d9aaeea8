//! Post-install finalization of the target root.
//!
//! After package installation the target root gets minimal login
//! hardening: `pts/0` is allowed as a console login device, and the root
//! password is either rewritten verbatim in the shadow file or set
//! interactively via `passwd` inside the root.

use std::fs::{self, OpenOptions};
use std::io::Write;

use anyhow::Result;
use camino::Utf8Path;

use crate::config::BootstrapRequest;
use crate::error::ZypstrapError;
use crate::executor::{CommandExecutor, CommandSpec, execute_checked};

/// Pseudo-terminal device allowed for console login.
const PTS_DEVICE: &str = "pts/0";

/// Runs post-install finalization. The caller skips this entirely in
/// dry-run mode.
pub fn run(req: &BootstrapRequest, executor: &dyn CommandExecutor) -> Result<()> {
    allow_pts_login(&req.root)?;

    match &req.root_pass {
        Some(pass) => set_shadow_password(&req.root, pass)?,
        None if !req.quiet => interactive_passwd(&req.root, executor)?,
        None => {}
    }

    Ok(())
}

/// Appends the pseudo-terminal device to the target root's login
/// restriction file, creating the file if it does not exist yet.
pub fn allow_pts_login(root: &Utf8Path) -> Result<(), ZypstrapError> {
    let path = root.join("etc/securetty");
    tracing::debug!("allowing {} login in {}", PTS_DEVICE, path);

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| ZypstrapError::io(path.as_str(), e))?;
    writeln!(file, "{}", PTS_DEVICE).map_err(|e| ZypstrapError::io(path.as_str(), e))?;
    Ok(())
}

/// Rewrites the root entry's password field in the target root's shadow
/// file, leaving every other field and line byte-identical.
///
/// The value is written verbatim; callers supply an already-hashed value
/// when the target's authentication stack requires one.
pub fn set_shadow_password(root: &Utf8Path, pass: &str) -> Result<(), ZypstrapError> {
    let path = root.join("etc/shadow");
    tracing::debug!("setting root password in {}", path);

    let content =
        fs::read_to_string(&path).map_err(|e| ZypstrapError::io(path.as_str(), e))?;
    let rewritten = replace_root_password(&content, pass);
    fs::write(&path, rewritten).map_err(|e| ZypstrapError::io(path.as_str(), e))?;
    Ok(())
}

/// Pure rewrite of the shadow file content: the second colon-delimited
/// field of the `root` entry becomes `pass`.
fn replace_root_password(content: &str, pass: &str) -> String {
    content
        .split_inclusive('\n')
        .map(|line| {
            let body = line.strip_suffix('\n').unwrap_or(line);
            let newline = if body.len() < line.len() { "\n" } else { "" };

            let mut fields: Vec<&str> = body.split(':').collect();
            if fields.first() == Some(&"root") && fields.len() > 1 {
                fields[1] = pass;
                format!("{}{}", fields.join(":"), newline)
            } else {
                line.to_string()
            }
        })
        .collect()
}

/// Runs `passwd` inside the target root, prompting the operator on the
/// controlling terminal. Blocks until the operator finishes; there is no
/// timeout.
fn interactive_passwd(root: &Utf8Path, executor: &dyn CommandExecutor) -> Result<()> {
    tracing::info!("setting root password interactively in {}", root);
    execute_checked(
        executor,
        &CommandSpec::new("chroot", vec![root.to_string(), "passwd".to_string()]),
    )
}
