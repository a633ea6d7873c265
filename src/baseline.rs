use crate::snapshot::{ContentHash, RelativePath, Snapshot, SnapshotError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name used for the baseline when no other location is given.
pub const DEFAULT_BASELINE_FILENAME: &str = "baseline_hashes.toml";

#[derive(Debug, thiserror::Error)]
pub enum BaselineError {
    #[error("Baseline not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(std::io::Error),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Unsupported baseline version: {0}")]
    UnsupportedVersion(u32),
    #[error("Baseline is not valid UTF-8: {0}")]
    NotUtf8(PathBuf),
    #[error("Invalid baseline entry: {0}")]
    InvalidEntry(#[from] SnapshotError),
}

impl BaselineError {
    /// True if the artifact exists but its content cannot be trusted as a
    /// baseline (malformed, foreign, or from an unknown format version).
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            BaselineError::TomlParse(_)
                | BaselineError::NotUtf8(_)
                | BaselineError::UnsupportedVersion(_)
                | BaselineError::InvalidEntry(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Metadata {
    version: u32,
}

/// Helper struct to extract only the metadata section from a TOML file,
/// ignoring all other content. Used to check version before parsing the full file.
/// Note: We explicitly do NOT use deny_unknown_fields here, as this struct's
/// purpose is to ignore everything except metadata.
#[derive(Debug, Deserialize)]
struct MetadataOnly {
    metadata: Metadata,
}

/// On-disk form of a baseline: a version header plus a flat table mapping
/// relative paths to hex SHA-256 digests, sorted by path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct BaselineFile {
    metadata: Metadata,
    files: BTreeMap<String, String>,
}

impl BaselineFile {
    const SUPPORTED_VERSION: u32 = 1;

    fn from_snapshot(snapshot: &Snapshot) -> Self {
        BaselineFile {
            metadata: Metadata {
                version: Self::SUPPORTED_VERSION,
            },
            files: snapshot
                .iter()
                .map(|(path, hash)| (path.as_str().to_owned(), hash.as_str().to_owned()))
                .collect(),
        }
    }

    fn into_snapshot(self) -> Result<Snapshot, BaselineError> {
        self.files
            .into_iter()
            .map(|(path, hash)| {
                Ok::<_, BaselineError>((RelativePath::parse(&path)?, ContentHash::parse(&hash)?))
            })
            .collect()
    }

    fn from_toml(content: &str) -> Result<Self, BaselineError> {
        // First, extract only the metadata to check version. Otherwise
        // we would fail on unexpected *other* input (which could just be
        // due to a future version), without being able to provide a sensible
        // explanation.
        let metadata_only: MetadataOnly = toml::from_str(content)?;

        if metadata_only.metadata.version != Self::SUPPORTED_VERSION {
            return Err(BaselineError::UnsupportedVersion(
                metadata_only.metadata.version,
            ));
        }

        Ok(toml::from_str(content)?)
    }

    fn to_toml(&self) -> Result<String, BaselineError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Parses baseline TOML text into a [`Snapshot`].
pub fn snapshot_from_toml(content: &str) -> Result<Snapshot, BaselineError> {
    BaselineFile::from_toml(content)?.into_snapshot()
}

/// Serializes a [`Snapshot`] to baseline TOML text.
pub fn snapshot_to_toml(snapshot: &Snapshot) -> Result<String, BaselineError> {
    BaselineFile::from_snapshot(snapshot).to_toml()
}

/// Durable home of a single baseline. The storage location is explicit;
/// there is no process-wide default beyond what the caller passes in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaselineStore {
    path: PathBuf,
}

impl BaselineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        BaselineStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored baseline.
    ///
    /// A missing artifact is reported as `NotFound`, never as an empty
    /// snapshot. Malformed content is reported as one of the errors for which
    /// [`BaselineError::is_corrupt`] is true.
    pub fn load(&self) -> Result<Snapshot, BaselineError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => BaselineError::NotFound(self.path.clone()),
            ErrorKind::PermissionDenied => BaselineError::PermissionDenied(self.path.clone()),
            ErrorKind::InvalidData => BaselineError::NotUtf8(self.path.clone()),
            _ => BaselineError::Io(e),
        })?;

        let snapshot = snapshot_from_toml(&content)?;

        debug!(
            "Loaded baseline of {} files from {}",
            snapshot.len(),
            self.path.display()
        );

        Ok(snapshot)
    }

    /// Replace the stored baseline with `snapshot`, atomically.
    ///
    /// Writes to a temporary file, fsyncs it, then atomically renames it into place.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), BaselineError> {
        use std::io::Write;

        let content = snapshot_to_toml(snapshot)?;

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let map_err = |path: &Path, e: std::io::Error| {
            if e.kind() == ErrorKind::PermissionDenied {
                BaselineError::PermissionDenied(path.to_path_buf())
            } else {
                BaselineError::Io(e)
            }
        };

        let mut temp_file =
            tempfile::NamedTempFile::new_in(parent).map_err(|e| map_err(parent, e))?;

        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| map_err(&self.path, e))?;

        temp_file.as_file().sync_all().map_err(BaselineError::Io)?;

        temp_file
            .persist(&self.path)
            .map_err(|e| map_err(&self.path, e.error))?;

        info!(
            "Saved baseline of {} files to {}",
            snapshot.len(),
            self.path.display()
        );

        Ok(())
    }
}
