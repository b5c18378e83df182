//! Read-only reference resolution
//!
//! References are text files containing either a 40-character SHA-1 (direct
//! reference) or `ref: <path>` (symbolic reference). Resolution probes, in
//! order: `refs/heads/<name>`, `refs/tags/<name>`, then `<name>` itself
//! relative to `.git` (which covers raw ref files like `HEAD`). A name that
//! matches no ref file but is a full hex id resolves to that id directly.
//!
//! Nothing in this module writes: no checkout, no locks, the repository's
//! working tree and refs are never touched.

use crate::areas::snapshot::SnapshotError;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::reference::ReferenceName;
use derive_new::new;
use std::path::{Path, PathBuf};

const SYMREF_REGEX: &str = r"^ref: (.+)$";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the `.git` directory
    path: Box<Path>,
}

#[derive(Debug, Clone)]
enum SymRefOrOid {
    SymRef(String),
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn read_from(path: &Path) -> Result<Option<SymRefOrOid>, SnapshotError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|err| SnapshotError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        let symref = regex::Regex::new(SYMREF_REGEX).map_err(|err| {
            SnapshotError::RepositoryAccess(format!("invalid symref pattern: {err}"))
        })?;

        if let Some(symref_match) = symref.captures(content) {
            Ok(Some(SymRefOrOid::SymRef(symref_match[1].to_string())))
        } else {
            let oid = ObjectId::try_parse(content.to_string()).map_err(|err| {
                SnapshotError::RepositoryAccess(format!(
                    "malformed ref file {}: {err}",
                    path.display()
                ))
            })?;
            Ok(Some(SymRefOrOid::Oid(oid)))
        }
    }
}

impl Refs {
    /// Resolve a reference name to the object id it points at.
    ///
    /// Returns `None` when no ref file matches the name and the name is not
    /// a full commit id.
    pub fn resolve(&self, reference: &ReferenceName) -> Result<Option<ObjectId>, SnapshotError> {
        let candidates = [
            self.heads_path().join(reference.as_ref()),
            self.tags_path().join(reference.as_ref()),
            self.path.join(reference.as_ref()),
        ];

        if let Some(ref_path) = candidates.iter().find(|path| path.exists()) {
            return self.read_symref(ref_path);
        }

        if reference.is_commit_id() {
            let oid = ObjectId::try_parse(reference.as_ref().to_string()).map_err(|err| {
                SnapshotError::RepositoryAccess(format!("invalid commit id: {err}"))
            })?;
            return Ok(Some(oid));
        }

        Ok(None)
    }

    // Follows `ref: ...` indirection recursively until a direct oid.
    fn read_symref(&self, path: &Path) -> Result<Option<ObjectId>, SnapshotError> {
        match SymRefOrOid::read_from(path)? {
            Some(SymRefOrOid::SymRef(target)) => self.read_symref(&self.path.join(target)),
            Some(SymRefOrOid::Oid(oid)) => Ok(Some(oid)),
            None => Ok(None),
        }
    }

    fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    fn heads_path(&self) -> PathBuf {
        self.refs_path().join("heads")
    }

    fn tags_path(&self) -> PathBuf {
        self.refs_path().join("tags")
    }
}
