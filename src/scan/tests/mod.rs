use super::*;
use crate::fingerprint::checksum_file;
use crate::snapshot::ContentHash;
use std::fs;
use tempfile::TempDir;

fn key(path: &str) -> RelativePath {
    RelativePath::parse(path).unwrap()
}

fn scan(root: &Path) -> Snapshot {
    scan_tree(root, &ScanOptions::default()).unwrap()
}

fn keys(snapshot: &Snapshot) -> Vec<&str> {
    snapshot.paths().map(|p| p.as_str()).collect()
}

fn hash_of(path: &Path) -> ContentHash {
    checksum_file(path).unwrap()
}

#[cfg(unix)]
#[path = "unix.rs"]
mod unix_tests;
