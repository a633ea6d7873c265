//! Point-in-time content state of a directory tree.
//!
//! A [`Snapshot`] maps every readable regular file under a root to the SHA-256
//! of its content. Keys are [`RelativePath`]s, which are always `/`-separated
//! and relative to the scanned root, so the same file maps to the same key no
//! matter where the tool was invoked from or which platform produced it.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Component, Path};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("Invalid content hash {0:?} (expected 64 lowercase hex characters)")]
    InvalidHash(String),
    #[error("Invalid relative path {0:?}")]
    InvalidPath(String),
}

/// Hex encoded SHA-256 digest of a file's content.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    pub const HEX_LEN: usize = 64;

    /// Validates `value` as a lowercase hex SHA-256 digest.
    pub fn parse(value: &str) -> Result<Self, SnapshotError> {
        let valid = value.len() == Self::HEX_LEN
            && value
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));

        if valid {
            Ok(ContentHash(value.to_string()))
        } else {
            Err(SnapshotError::InvalidHash(value.to_string()))
        }
    }

    /// Wraps the `{:x}` rendering of a finalized SHA-256 digest.
    pub(crate) fn from_hex(hex: String) -> Self {
        debug_assert_eq!(hex.len(), Self::HEX_LEN);
        ContentHash(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Path of a file relative to the scanned root, components joined by `/`.
///
/// Never empty, never absolute, and never contains `.` or `..` components or
/// leading/trailing separators.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelativePath(String);

impl RelativePath {
    pub const SEPARATOR: char = '/';

    /// Builds the canonical key for `path`, which must already be relative to
    /// the scanned root.
    ///
    /// Fails for absolute paths, `.`/`..` components, empty paths, and names
    /// that are not valid UTF-8.
    pub fn from_relative(path: &Path) -> Result<Self, SnapshotError> {
        let invalid = || SnapshotError::InvalidPath(path.to_string_lossy().into_owned());

        let mut parts = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(name) => parts.push(name.to_str().ok_or_else(invalid)?),
                Component::CurDir
                | Component::ParentDir
                | Component::RootDir
                | Component::Prefix(_) => return Err(invalid()),
            }
        }

        if parts.is_empty() {
            return Err(invalid());
        }

        Ok(RelativePath(parts.join("/")))
    }

    /// Validates an already-normalized key, as read back from a stored baseline.
    pub fn parse(value: &str) -> Result<Self, SnapshotError> {
        let valid = !value.is_empty()
            && !value.contains('\0')
            && value
                .split(Self::SEPARATOR)
                .all(|part| !part.is_empty() && part != "." && part != "..");

        if valid {
            Ok(RelativePath(value.to_string()))
        } else {
            Err(SnapshotError::InvalidPath(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Complete path to hash mapping of a tree, in lexicographic path order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: BTreeMap<RelativePath, ContentHash>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `hash` for `path`. Returns the previous hash if the path was
    /// already present.
    pub fn insert(&mut self, path: RelativePath, hash: ContentHash) -> Option<ContentHash> {
        self.entries.insert(path, hash)
    }

    pub fn get(&self, path: &RelativePath) -> Option<&ContentHash> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &RelativePath) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RelativePath, &ContentHash)> {
        self.entries.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &RelativePath> {
        self.entries.keys()
    }
}

impl FromIterator<(RelativePath, ContentHash)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (RelativePath, ContentHash)>>(iter: I) -> Self {
        Snapshot {
            entries: iter.into_iter().collect(),
        }
    }
}
