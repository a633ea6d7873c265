use crate::snapshot::{RelativePath, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    New,
    Deleted,
    Modified,
    Unchanged,
}

/// Classification of every path seen in either of two snapshots.
///
/// Each path lands in exactly one list, and every list is sorted
/// lexicographically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeReport {
    /// Present in the current snapshot only.
    pub new: Vec<RelativePath>,
    /// Present in the baseline only.
    pub deleted: Vec<RelativePath>,
    /// Present in both with differing hashes.
    pub modified: Vec<RelativePath>,
    /// Present in both with identical hashes.
    pub unchanged: Vec<RelativePath>,
}

impl ChangeReport {
    /// True if nothing was added, deleted or modified.
    pub fn is_clean(&self) -> bool {
        self.change_count() == 0
    }

    pub fn change_count(&self) -> usize {
        self.new.len() + self.deleted.len() + self.modified.len()
    }

    /// All classified paths in lexicographic order, with their classification.
    pub fn entries(&self) -> Vec<(&RelativePath, ChangeType)> {
        let mut entries: Vec<_> = self
            .new
            .iter()
            .map(|p| (p, ChangeType::New))
            .chain(self.deleted.iter().map(|p| (p, ChangeType::Deleted)))
            .chain(self.modified.iter().map(|p| (p, ChangeType::Modified)))
            .chain(self.unchanged.iter().map(|p| (p, ChangeType::Unchanged)))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

/// Compare a current snapshot against a baseline.
///
/// Walks the baseline once to find deleted, modified and unchanged paths,
/// then the current snapshot once to find new ones. Both snapshots iterate in
/// path order, so every list in the report comes out sorted.
pub fn diff(baseline: &Snapshot, current: &Snapshot) -> ChangeReport {
    let mut report = ChangeReport::default();

    for (path, baseline_hash) in baseline.iter() {
        match current.get(path) {
            None => report.deleted.push(path.clone()),
            Some(current_hash) if current_hash != baseline_hash => {
                report.modified.push(path.clone())
            }
            Some(_) => report.unchanged.push(path.clone()),
        }
    }

    for path in current.paths() {
        if !baseline.contains(path) {
            report.new.push(path.clone());
        }
    }

    report
}
