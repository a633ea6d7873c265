//! Non-recursive directory listing.
//!
//! Lists the immediate children of one directory and classifies each one for
//! the tree scanner. Directory symlinks are never reported as directories, so
//! a walk built on top of this listing cannot loop through a symlink cycle.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum DirListError {
    #[error("IO error: {0}")]
    Io(std::io::Error),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file, or a symlink resolving to one.
    File,
    /// A real directory (not a symlink to one).
    Dir,
    /// Anything that must not be opened for hashing: sockets, FIFOs, devices,
    /// broken symlinks and symlinks to directories.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEntry {
    pub name: OsString,
    pub kind: EntryKind,
}

fn map_io_error(path: &Path, e: std::io::Error) -> DirListError {
    if e.kind() == std::io::ErrorKind::PermissionDenied {
        DirListError::PermissionDenied(path.to_path_buf())
    } else {
        DirListError::Io(e)
    }
}

/// Lists the immediate children of `dir`, sorted by name.
pub fn list_directory(dir: &Path) -> Result<Vec<FsEntry>, DirListError> {
    let read_dir = std::fs::read_dir(dir).map_err(|e| map_io_error(dir, e))?;

    let mut entries = Vec::new();

    // Only `read_dir` itself can fail the listing. A child that vanishes or
    // cannot be inspected between readdir and stat is left out.
    for entry in read_dir {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        let path = entry.path();

        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                debug!("Skipping entry {}: {}", path.display(), e);
                continue;
            }
        };

        let kind = if file_type.is_symlink() {
            // Follow the link only to find out whether it names a regular
            // file. Broken links and links to directories are left alone.
            match std::fs::metadata(&path) {
                Ok(target) if target.is_file() => EntryKind::File,
                _ => EntryKind::Other,
            }
        } else if file_type.is_dir() {
            EntryKind::Dir
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };

        entries.push(FsEntry {
            name: entry.file_name(),
            kind,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(entries)
}
