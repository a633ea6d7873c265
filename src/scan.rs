use crate::dir_list::{DirListError, EntryKind, list_directory};
use crate::fingerprint::fingerprint_file;
use crate::snapshot::{RelativePath, Snapshot};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Directory listing error: {0}")]
    DirList(#[from] DirListError),
}

#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Absolute paths that are never included in the snapshot. Compared after
    /// canonicalization of the parent directory.
    pub exclude: Vec<PathBuf>,
}

#[derive(Default)]
struct ScanStats {
    hashed: usize,
    skipped: usize,
}

/// Capture a [`Snapshot`] of every readable regular file under `root`.
///
/// Recursively walks the tree depth-first, hashing each file and keying it by
/// its `/`-separated path relative to `root`.
///
/// # Behavior
///
/// * Files that cannot be read are left out of the snapshot. They are not
///   reported as errors and are never recorded with a placeholder hash.
/// * Subdirectories that cannot be listed are skipped with a warning, which
///   leaves their files out of the snapshot in the same way.
/// * Directory symlinks are not followed. Symlinks to regular files are hashed
///   through the link.
/// * Sockets, FIFOs, devices and broken symlinks are never opened.
///
/// # Errors
///
/// Returns an error only if `root` itself is not a listable directory.
pub fn scan_tree(root: &Path, options: &ScanOptions) -> Result<Snapshot, ScanError> {
    let root = root.canonicalize().map_err(|e| {
        if e.kind() == ErrorKind::PermissionDenied {
            DirListError::PermissionDenied(root.to_path_buf())
        } else {
            DirListError::Io(e)
        }
    })?;

    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root));
    }

    let exclude: Vec<PathBuf> = options
        .exclude
        .iter()
        .map(|p| canonicalize_parent(p))
        .collect();

    // The root must be listable; failures below it are tolerated.
    let entries = list_directory(&root)?;

    let mut snapshot = Snapshot::new();
    let mut stats = ScanStats::default();
    let mut pending = vec![(root.clone(), entries)];

    while let Some((dir, entries)) = pending.pop() {
        for entry in entries {
            let path = dir.join(&entry.name);

            if exclude.contains(&path) {
                debug!("Excluding {}", path.display());
                continue;
            }

            match entry.kind {
                EntryKind::Dir => match list_directory(&path) {
                    Ok(children) => pending.push((path, children)),
                    Err(e) => {
                        warn!("Skipping unreadable directory {}: {}", path.display(), e);
                    }
                },
                EntryKind::File => {
                    if record_file(&root, &path, &mut snapshot) {
                        stats.hashed += 1;
                    } else {
                        stats.skipped += 1;
                    }
                }
                EntryKind::Other => {
                    debug!("Ignoring non-regular entry {}", path.display());
                }
            }
        }
    }

    info!(
        "Scanned {}: {} files hashed, {} unreadable files skipped",
        root.display(),
        stats.hashed,
        stats.skipped
    );

    Ok(snapshot)
}

fn record_file(root: &Path, path: &Path, snapshot: &mut Snapshot) -> bool {
    let relative = match path.strip_prefix(root).map(RelativePath::from_relative) {
        Ok(Ok(relative)) => relative,
        _ => {
            warn!("Skipping file with unrepresentable path {}", path.display());
            return false;
        }
    };

    match fingerprint_file(path) {
        Some(hash) => {
            snapshot.insert(relative, hash);
            true
        }
        None => false,
    }
}

/// Resolves the directory part of `path` so it compares equal to paths built
/// from the canonical scan root. The file itself need not exist yet.
fn canonicalize_parent(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    match (parent.canonicalize(), path.file_name()) {
        (Ok(parent), Some(name)) => parent.join(name),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests;
