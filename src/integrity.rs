use crate::baseline::{BaselineError, BaselineStore};
use crate::diff::{ChangeReport, diff};
use crate::scan::{ScanError, ScanOptions, scan_tree};
use crate::snapshot::Snapshot;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum IntegrityError {
    #[error("No baseline found at {0} (create one with the baseline command first)")]
    BaselineNotFound(PathBuf),
    #[error("Baseline error: {0}")]
    Baseline(BaselineError),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
}

impl From<BaselineError> for IntegrityError {
    fn from(e: BaselineError) -> Self {
        match e {
            BaselineError::NotFound(path) => IntegrityError::BaselineNotFound(path),
            other => IntegrityError::Baseline(other),
        }
    }
}

/// The artifact is never part of the tree it describes, even when it is
/// stored inside that tree.
fn scan_options(store: &BaselineStore) -> ScanOptions {
    ScanOptions {
        exclude: vec![store.path().to_path_buf()],
    }
}

/// Scan `root` and store the result as the new baseline, replacing any
/// previous one.
pub fn create_baseline(root: &Path, store: &BaselineStore) -> Result<Snapshot, IntegrityError> {
    let snapshot = scan_tree(root, &scan_options(store))?;
    store.save(&snapshot)?;
    Ok(snapshot)
}

/// Compare `root` against the stored baseline.
///
/// The baseline is loaded before anything is scanned. A missing baseline is
/// reported as [`IntegrityError::BaselineNotFound`] and a corrupt one as
/// [`IntegrityError::Baseline`]; neither is ever treated as an empty baseline.
pub fn scan_for_changes(root: &Path, store: &BaselineStore) -> Result<ChangeReport, IntegrityError> {
    let baseline = store.load()?;
    let current = scan_tree(root, &scan_options(store))?;

    let report = diff(&baseline, &current);

    info!(
        "Compared {} baseline files against {} current files: {} new, {} deleted, {} modified",
        baseline.len(),
        current.len(),
        report.new.len(),
        report.deleted.len(),
        report.modified.len()
    );

    Ok(report)
}
