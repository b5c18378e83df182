//! Repository snapshot at a fixed reference
//!
//! A `Snapshot` is an immutable view of one repository at one reference,
//! built once at open time and discarded with the run. Opening resolves the
//! reference to a commit, loads its tree and flattens it into a sorted map
//! of relative path to blob id; everything afterwards is served from that
//! map and the object database. The caller's working tree is never touched.

use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::reference::ReferenceName;
use crate::diagnostics::Diagnostics;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Repository path invalid, not a repository, or the reference cannot be
    /// resolved. Fatal: the comparison never starts.
    #[error("repository access failed: {0}")]
    RepositoryAccess(String),

    /// A tracked path cannot be read at the reference. Recoverable: the
    /// differ logs it and excludes the path.
    #[error("{} not found at reference {reference}", path.display())]
    FileNotFoundAtReference { reference: String, path: PathBuf },

    /// The object store holds something other than what its id promises.
    #[error("object {oid} is corrupt: {reason}")]
    ObjectCorrupt { oid: String, reason: String },

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The contract the differ consumes. `Snapshot` is the production
/// implementation; tests substitute an in-memory one.
pub trait SnapshotSource {
    /// All paths tracked at the fixed reference, lexically sorted.
    fn tracked_paths(&self) -> BTreeSet<PathBuf>;

    /// Raw content of a tracked file at the reference.
    fn read_file(&self, path: &Path) -> Result<Bytes, SnapshotError>;

    /// Human-readable identity of the side, used in diagnostics.
    fn label(&self) -> String;
}

pub struct Snapshot {
    root: Box<Path>,
    reference: ReferenceName,
    database: Database,
    tracked: BTreeMap<PathBuf, ObjectId>,
}

impl Snapshot {
    pub fn open(
        path: &Path,
        reference: ReferenceName,
        diagnostics: &Diagnostics,
    ) -> Result<Self, SnapshotError> {
        let root = path.canonicalize().map_err(|err| {
            SnapshotError::RepositoryAccess(format!(
                "invalid repository path {}: {err}",
                path.display()
            ))
        })?;

        let git_dir = root.join(".git");
        if !git_dir.is_dir() {
            return Err(SnapshotError::RepositoryAccess(format!(
                "{} is not a git repository",
                root.display()
            )));
        }

        let database = Database::new(git_dir.join("objects").into_boxed_path());
        let refs = Refs::new(git_dir.into_boxed_path());

        let commit_oid = refs.resolve(&reference)?.ok_or_else(|| {
            SnapshotError::RepositoryAccess(format!(
                "reference {reference} not found in {}",
                root.display()
            ))
        })?;
        diagnostics.debug(format!(
            "resolved {reference} to {commit_oid} in {}",
            root.display()
        ));

        let commit = database.load_commit(&commit_oid)?;
        let mut tracked = BTreeMap::new();
        Self::flatten_tree(&database, commit.tree_oid(), Path::new(""), &mut tracked)?;
        diagnostics.debug(format!(
            "{} paths tracked at {reference} in {}",
            tracked.len(),
            root.display()
        ));

        Ok(Snapshot {
            root: root.into_boxed_path(),
            reference,
            database,
            tracked,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn reference(&self) -> &ReferenceName {
        &self.reference
    }

    fn flatten_tree(
        database: &Database,
        oid: &ObjectId,
        prefix: &Path,
        tracked: &mut BTreeMap<PathBuf, ObjectId>,
    ) -> Result<(), SnapshotError> {
        let tree = database.load_tree(oid)?;

        for (name, entry) in tree.into_entries() {
            let path = prefix.join(&name);

            if entry.mode.is_tree() {
                Self::flatten_tree(database, &entry.oid, &path, tracked)?;
            } else if entry.mode.is_gitlink() {
                // submodule pointer, no content to compare
                continue;
            } else {
                tracked.insert(path, entry.oid);
            }
        }

        Ok(())
    }
}

impl SnapshotSource for Snapshot {
    fn tracked_paths(&self) -> BTreeSet<PathBuf> {
        self.tracked.keys().cloned().collect()
    }

    fn read_file(&self, path: &Path) -> Result<Bytes, SnapshotError> {
        let oid = self
            .tracked
            .get(path)
            .ok_or_else(|| SnapshotError::FileNotFoundAtReference {
                reference: self.reference.to_string(),
                path: path.to_path_buf(),
            })?;

        Ok(self.database.load_blob(oid)?.into_content())
    }

    fn label(&self) -> String {
        self.root.display().to_string()
    }
}
