use super::*;
use std::os::unix;
use std::os::unix::fs::PermissionsExt;

/// Root bypasses permission checks, which makes "unreadable" impossible to
/// arrange.
fn permissions_enforced(path: &Path) -> bool {
    fs::File::open(path).is_err()
}

#[test]
fn test_unreadable_file_is_absent() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::write(root.join("readable.txt"), "ok").unwrap();
    fs::write(root.join("secret.txt"), "hidden").unwrap();
    fs::set_permissions(root.join("secret.txt"), fs::Permissions::from_mode(0o000)).unwrap();

    if !permissions_enforced(&root.join("secret.txt")) {
        return;
    }

    let snapshot = scan(root);

    assert_eq!(keys(&snapshot), vec!["readable.txt"]);
    assert!(!snapshot.contains(&key("secret.txt")));
}

#[test]
fn test_unreadable_subdirectory_is_skipped() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::write(root.join("top.txt"), "top").unwrap();
    fs::create_dir(root.join("locked")).unwrap();
    fs::write(root.join("locked/inner.txt"), "inner").unwrap();
    fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o000)).unwrap();

    let enforced = fs::read_dir(root.join("locked")).is_err();
    let result = scan_tree(root, &ScanOptions::default());

    fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o755)).unwrap();

    if !enforced {
        return;
    }

    let snapshot = result.unwrap();
    assert_eq!(keys(&snapshot), vec!["top.txt"]);
}

#[test]
fn test_symlink_to_file_is_hashed_through_link() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::write(root.join("target.txt"), "target content").unwrap();
    unix::fs::symlink("target.txt", root.join("link.txt")).unwrap();

    let snapshot = scan(root);

    assert_eq!(keys(&snapshot), vec!["link.txt", "target.txt"]);
    assert_eq!(
        snapshot.get(&key("link.txt")),
        snapshot.get(&key("target.txt"))
    );
}

#[test]
fn test_broken_symlink_is_absent() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    unix::fs::symlink("/nonexistent/target", root.join("broken")).unwrap();

    let snapshot = scan(root);

    assert!(snapshot.is_empty());
}

#[test]
fn test_directory_symlink_is_not_followed() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::create_dir(root.join("real")).unwrap();
    fs::write(root.join("real/file.txt"), "content").unwrap();
    unix::fs::symlink("real", root.join("alias")).unwrap();

    let snapshot = scan(root);

    assert_eq!(keys(&snapshot), vec!["real/file.txt"]);
}

#[test]
fn test_symlink_cycle_does_not_cause_infinite_loop() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::create_dir(root.join("dir")).unwrap();
    fs::write(root.join("dir/file.txt"), "content").unwrap();
    // Symlink pointing back to parent - would cause infinite loop if followed
    unix::fs::symlink("..", root.join("dir/parent_link")).unwrap();
    // Self-referential symlink
    unix::fs::symlink("self", root.join("self")).unwrap();
    // Mutual symlinks
    unix::fs::symlink("b", root.join("a")).unwrap();
    unix::fs::symlink("a", root.join("b")).unwrap();

    // This should complete without hanging
    let snapshot = scan(root);

    assert_eq!(keys(&snapshot), vec!["dir/file.txt"]);
}

#[test]
fn test_non_utf8_name_is_skipped() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::write(root.join("plain.txt"), "plain").unwrap();
    let name = OsStr::from_bytes(b"bad\xffname");
    // Some filesystems refuse non-UTF-8 names outright.
    if fs::write(root.join(name), "content").is_err() {
        return;
    }

    let snapshot = scan(root);

    assert_eq!(keys(&snapshot), vec!["plain.txt"]);
}
