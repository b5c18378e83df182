//! Diff pass and rename detection
//!
//! The differ walks the union of both snapshots' tracked paths in lexical
//! order and sorts every path into modified/added/removed, then runs rename
//! detection over the removed and added buckets. Exact byte equality is the
//! sole rename signal; near-identical files are never paired.
//!
//! Any read failure along the way is logged and excludes only the affected
//! path or pair. The run always completes and always yields a result.

use crate::areas::snapshot::SnapshotSource;
use crate::artifacts::classify::classification::ClassificationResult;
use crate::diagnostics::Diagnostics;
use bytes::Bytes;
use derive_new::new;
use std::collections::BTreeSet;
use std::path::Path;

#[derive(new)]
pub struct Differ<'r, S: SnapshotSource> {
    old: &'r S,
    new: &'r S,
    diagnostics: &'r Diagnostics,
}

impl<S: SnapshotSource> Differ<'_, S> {
    pub fn classify(&self) -> ClassificationResult {
        let old_paths = self.old.tracked_paths();
        let new_paths = self.new.tracked_paths();
        let mut result = ClassificationResult::default();

        for path in old_paths.union(&new_paths) {
            match (old_paths.contains(path), new_paths.contains(path)) {
                (true, true) => {
                    let Some(old_content) = self.read_side(self.old, path) else {
                        continue;
                    };
                    let Some(new_content) = self.read_side(self.new, path) else {
                        continue;
                    };

                    if old_content != new_content {
                        self.diagnostics.trace(format!("modified: {}", path.display()));
                        result.record_modified(path.clone());
                    }
                }
                (true, false) => result.record_removed(path.clone()),
                (false, true) => result.record_added(path.clone()),
                (false, false) => unreachable!("path not in either side of its own union"),
            }
        }

        self.detect_renames(&mut result);
        result
    }

    /// Pair removed and added paths whose content matches byte-for-byte.
    ///
    /// The scan is removed-first, added-second, both in lexical order, and
    /// the first equal pair wins: an added path claimed by an earlier
    /// removed path is skipped for all later removed paths. The rename list
    /// is built first and applied to the buckets afterwards.
    fn detect_renames(&self, result: &mut ClassificationResult) {
        let mut claimed = BTreeSet::new();
        let mut renames = Vec::new();

        for removed in result.removed() {
            for added in result.added() {
                if claimed.contains(added) {
                    continue;
                }

                let Some((removed_content, added_content)) = self.read_pair(removed, added)
                else {
                    continue;
                };

                if removed_content == added_content {
                    self.diagnostics.trace(format!(
                        "renamed: {} -> {}",
                        removed.display(),
                        added.display()
                    ));
                    claimed.insert(added.clone());
                    renames.push((removed.clone(), added.clone()));
                    break;
                }
            }
        }

        result.resolve_renames(renames);
    }

    fn read_side(&self, side: &S, path: &Path) -> Option<Bytes> {
        self.diagnostics
            .debug(format!("reading {} in {}", path.display(), side.label()));

        match side.read_file(path) {
            Ok(content) => Some(content),
            Err(err) => {
                self.diagnostics.warn(format!(
                    "skipping {} ({} side unreadable: {err})",
                    path.display(),
                    side.label()
                ));
                None
            }
        }
    }

    fn read_pair(&self, removed: &Path, added: &Path) -> Option<(Bytes, Bytes)> {
        let pair = self
            .old
            .read_file(removed)
            .and_then(|removed_content| {
                self.new
                    .read_file(added)
                    .map(|added_content| (removed_content, added_content))
            });

        match pair {
            Ok(pair) => Some(pair),
            Err(err) => {
                self.diagnostics.warn(format!(
                    "skipping rename candidate {} -> {} ({err})",
                    removed.display(),
                    added.display()
                ));
                None
            }
        }
    }
}
