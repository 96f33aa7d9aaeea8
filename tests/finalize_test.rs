mod helpers;

use std::fs;

use camino::Utf8PathBuf;
use helpers::{RecordingExecutor, request};

const SHADOW: &str = "root:*:16000:0:99999:7:::\n\
    bin:*:16000:0:99999:7:::\n\
    daemon:*:16000:0:99999:7:::\n";

/// Creates a minimal target root with etc/shadow populated.
fn seeded_root(dir: &tempfile::TempDir) -> Utf8PathBuf {
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    fs::create_dir_all(root.join("etc")).unwrap();
    fs::write(root.join("etc/shadow"), SHADOW).unwrap();
    root
}

#[test]
fn finalizer_appends_pts_device_and_rewrites_root_password() {
    let dir = tempfile::tempdir().unwrap();
    let root = seeded_root(&dir);
    let executor = RecordingExecutor::new();

    let mut req = request(root.as_str(), None);
    req.dry_run = false;
    req.root_pass = Some("secret".to_string());

    zypstrap::run(&req, &executor).unwrap();

    let securetty = fs::read_to_string(root.join("etc/securetty")).unwrap();
    assert_eq!(securetty, "pts/0\n");

    let shadow = fs::read_to_string(root.join("etc/shadow")).unwrap();
    assert_eq!(
        shadow,
        "root:secret:16000:0:99999:7:::\n\
         bin:*:16000:0:99999:7:::\n\
         daemon:*:16000:0:99999:7:::\n"
    );

    // Explicit password: no interactive passwd run inside the root.
    assert!(executor.calls().is_empty());
}

#[test]
fn finalizer_runs_interactive_passwd_when_not_quiet_and_no_password() {
    let dir = tempfile::tempdir().unwrap();
    let root = seeded_root(&dir);
    let executor = RecordingExecutor::new();

    let mut req = request(root.as_str(), None);
    req.dry_run = false;
    req.quiet = false;

    zypstrap::run(&req, &executor).unwrap();

    let calls = executor.rendered_calls();
    assert_eq!(calls, vec![format!("chroot {} passwd", root)]);
}

#[test]
fn finalizer_skips_interactive_passwd_in_quiet_mode() {
    let dir = tempfile::tempdir().unwrap();
    let root = seeded_root(&dir);
    let executor = RecordingExecutor::new();

    let mut req = request(root.as_str(), None);
    req.dry_run = false;
    req.quiet = true;

    zypstrap::run(&req, &executor).unwrap();

    assert!(executor.calls().is_empty());
    // The login device is still allowed.
    assert!(root.join("etc/securetty").exists());
}

#[test]
fn dry_run_skips_the_finalizer_entirely() {
    let dir = tempfile::tempdir().unwrap();
    let root = seeded_root(&dir);
    let executor = RecordingExecutor::new();

    let mut req = request(root.as_str(), Some("openSUSE-13.1"));
    req.dry_run = true;
    req.root_pass = Some("secret".to_string());

    zypstrap::run(&req, &executor).unwrap();

    // The bootstrap calls went through the sink, but no file in the
    // target root was touched.
    assert_eq!(executor.calls().len(), 3);
    assert!(!root.join("etc/securetty").exists());
    let shadow = fs::read_to_string(root.join("etc/shadow")).unwrap();
    assert_eq!(shadow, SHADOW);
}

#[test]
fn finalizer_runs_after_community_bootstrap() {
    let dir = tempfile::tempdir().unwrap();
    let root = seeded_root(&dir);
    let executor = RecordingExecutor::new();

    let mut req = request(root.as_str(), Some("openSUSE-13.1"));
    req.dry_run = false;
    req.root_pass = Some("secret".to_string());

    zypstrap::run(&req, &executor).unwrap();

    // Three bootstrap calls, then file edits only.
    assert_eq!(executor.calls().len(), 3);
    assert!(root.join("etc/securetty").exists());
    assert!(fs::read_to_string(root.join("etc/shadow")).unwrap().contains("root:secret:"));
}
