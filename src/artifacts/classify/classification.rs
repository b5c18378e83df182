use std::collections::BTreeSet;
use std::path::PathBuf;

/// The outcome of one comparison run: every classified path lives in exactly
/// one bucket, or on exactly one side of one renamed pair.
///
/// Buckets preserve insertion order, which is lexical because the differ
/// walks paths sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationResult {
    modified: Vec<PathBuf>,
    added: Vec<PathBuf>,
    removed: Vec<PathBuf>,
    renamed: Vec<(PathBuf, PathBuf)>,
}

impl ClassificationResult {
    pub fn modified(&self) -> &[PathBuf] {
        &self.modified
    }

    pub fn added(&self) -> &[PathBuf] {
        &self.added
    }

    pub fn removed(&self) -> &[PathBuf] {
        &self.removed
    }

    pub fn renamed(&self) -> &[(PathBuf, PathBuf)] {
        &self.renamed
    }

    pub fn is_unchanged(&self) -> bool {
        self.modified.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && self.renamed.is_empty()
    }

    pub(crate) fn record_modified(&mut self, path: PathBuf) {
        self.modified.push(path);
    }

    pub(crate) fn record_added(&mut self, path: PathBuf) {
        self.added.push(path);
    }

    pub(crate) fn record_removed(&mut self, path: PathBuf) {
        self.removed.push(path);
    }

    /// Apply a resolved rename list: every matched old path leaves `removed`
    /// and every matched new path leaves `added`, in one pass after the scan
    /// (the buckets are never mutated while being iterated).
    pub(crate) fn resolve_renames(&mut self, renames: Vec<(PathBuf, PathBuf)>) {
        let matched_old: BTreeSet<&PathBuf> = renames.iter().map(|(old, _)| old).collect();
        let matched_new: BTreeSet<&PathBuf> = renames.iter().map(|(_, new)| new).collect();

        self.removed.retain(|path| !matched_old.contains(path));
        self.added.retain(|path| !matched_new.contains(path));
        self.renamed = renames;
    }
}
