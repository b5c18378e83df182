use crate::areas::snapshot::SnapshotError;
use crate::artifacts::objects::Unpackable;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{Cursor, Read};
use std::path::Path;

/// Read-only loose-object database rooted at `.git/objects`.
///
/// Every load inflates the zlib stream and verifies that the SHA-1 of the
/// raw object matches the requested id, so a damaged store surfaces as
/// `ObjectCorrupt` rather than as silently wrong content.
// Packfiles are not supported; freshly committed repositories keep all
// objects loose.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> Result<Blob, SnapshotError> {
        let (object_type, reader) = self.read_object(object_id)?;

        match object_type {
            ObjectType::Blob => {
                Blob::deserialize(reader).map_err(|err| Self::corrupt(object_id, err))
            }
            other => Err(Self::type_mismatch(object_id, ObjectType::Blob, other)),
        }
    }

    pub fn load_tree(&self, object_id: &ObjectId) -> Result<Tree, SnapshotError> {
        let (object_type, reader) = self.read_object(object_id)?;

        match object_type {
            ObjectType::Tree => {
                Tree::deserialize(reader).map_err(|err| Self::corrupt(object_id, err))
            }
            other => Err(Self::type_mismatch(object_id, ObjectType::Tree, other)),
        }
    }

    pub fn load_commit(&self, object_id: &ObjectId) -> Result<Commit, SnapshotError> {
        let (object_type, reader) = self.read_object(object_id)?;

        match object_type {
            ObjectType::Commit => {
                Commit::deserialize(reader).map_err(|err| Self::corrupt(object_id, err))
            }
            other => Err(Self::type_mismatch(object_id, ObjectType::Commit, other)),
        }
    }

    fn read_object(
        &self,
        object_id: &ObjectId,
    ) -> Result<(ObjectType, impl std::io::BufRead), SnapshotError> {
        let object_path = self.path.join(object_id.to_path());

        let compressed = std::fs::read(&object_path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                SnapshotError::ObjectCorrupt {
                    oid: object_id.to_string(),
                    reason: "missing from the object database".to_string(),
                }
            } else {
                SnapshotError::Io {
                    path: object_path.clone(),
                    source: err,
                }
            }
        })?;

        let content = Self::decompress(compressed.into()).map_err(|err| SnapshotError::ObjectCorrupt {
            oid: object_id.to_string(),
            reason: err.to_string(),
        })?;

        self.verify_integrity(object_id, &content)?;

        let mut reader = Cursor::new(content);
        let object_type = ObjectType::parse_header(&mut reader)
            .map_err(|err| Self::corrupt(object_id, err))?;

        Ok((object_type, reader))
    }

    // The id of a loose object is the SHA-1 of its full serialized form,
    // header included.
    fn verify_integrity(&self, object_id: &ObjectId, content: &Bytes) -> Result<(), SnapshotError> {
        let mut hasher = Sha1::new();
        hasher.update(content);
        let digest = format!("{:x}", hasher.finalize());

        if digest != object_id.as_ref() {
            return Err(SnapshotError::ObjectCorrupt {
                oid: object_id.to_string(),
                reason: format!("content hashes to {}", digest),
            });
        }

        Ok(())
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder.read_to_end(&mut decompressed_content)?;

        Ok(decompressed_content.into())
    }

    fn corrupt(object_id: &ObjectId, err: anyhow::Error) -> SnapshotError {
        SnapshotError::ObjectCorrupt {
            oid: object_id.to_string(),
            reason: err.to_string(),
        }
    }

    fn type_mismatch(object_id: &ObjectId, expected: ObjectType, found: ObjectType) -> SnapshotError {
        SnapshotError::ObjectCorrupt {
            oid: object_id.to_string(),
            reason: format!("expected a {} object, found {}", expected, found),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn open_database(dir: &assert_fs::TempDir) -> Database {
        Database::new(dir.path().to_path_buf().into_boxed_path())
    }

    fn store_raw_object(objects_dir: &Path, payload: &[u8]) -> ObjectId {
        let mut hasher = Sha1::new();
        hasher.update(payload);
        let oid = ObjectId::try_parse(format!("{:x}", hasher.finalize())).unwrap();

        let object_path = objects_dir.join(oid.to_path());
        std::fs::create_dir_all(object_path.parent().unwrap()).unwrap();

        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(payload).unwrap();
        std::fs::write(&object_path, encoder.finish().unwrap()).unwrap();

        oid
    }

    #[test]
    fn loads_a_stored_blob() {
        let dir = assert_fs::TempDir::new().unwrap();
        let oid = store_raw_object(dir.path(), b"blob 5\0hello");

        let blob = open_database(&dir).load_blob(&oid).unwrap();
        assert_eq!(blob.content().as_ref(), b"hello");
    }

    #[test]
    fn blob_content_is_raw_bytes() {
        let dir = assert_fs::TempDir::new().unwrap();
        let oid = store_raw_object(dir.path(), b"blob 4\0\x00\xffab");

        let blob = open_database(&dir).load_blob(&oid).unwrap();
        assert_eq!(blob.content().as_ref(), b"\x00\xffab");
    }

    #[test]
    fn missing_object_is_reported_as_corrupt_store() {
        let dir = assert_fs::TempDir::new().unwrap();
        let oid =
            ObjectId::try_parse("0123456789abcdef0123456789abcdef01234567".to_string()).unwrap();

        let err = open_database(&dir).load_blob(&oid).unwrap_err();
        assert!(matches!(err, SnapshotError::ObjectCorrupt { .. }));
    }

    #[test]
    fn detects_integrity_mismatch() {
        let dir = assert_fs::TempDir::new().unwrap();
        let oid = store_raw_object(dir.path(), b"blob 5\0hello");

        // overwrite the object file with different (validly compressed) bytes
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(b"blob 5\0jello").unwrap();
        std::fs::write(dir.path().join(oid.to_path()), encoder.finish().unwrap()).unwrap();

        let err = open_database(&dir).load_blob(&oid).unwrap_err();
        assert!(matches!(err, SnapshotError::ObjectCorrupt { .. }));
    }

    #[test]
    fn rejects_type_mismatch() {
        let dir = assert_fs::TempDir::new().unwrap();
        let oid = store_raw_object(dir.path(), b"blob 5\0hello");

        let err = open_database(&dir).load_commit(&oid).unwrap_err();
        assert!(matches!(err, SnapshotError::ObjectCorrupt { .. }));
    }

    #[test]
    fn loads_a_stored_tree() {
        let blob_hex = "0123456789abcdef0123456789abcdef01234567";
        let mut content = Vec::new();
        content.extend_from_slice(b"100644 f.txt\0");
        content
            .extend((0..20).map(|i| u8::from_str_radix(&blob_hex[i * 2..i * 2 + 2], 16).unwrap()));

        let mut payload = format!("tree {}\0", content.len()).into_bytes();
        payload.extend_from_slice(&content);

        let dir = assert_fs::TempDir::new().unwrap();
        let oid = store_raw_object(dir.path(), &payload);

        let tree = open_database(&dir).load_tree(&oid).unwrap();
        let entries: Vec<_> = tree.into_entries().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "f.txt");
        assert_eq!(entries[0].1.oid.as_ref(), blob_hex);
    }
}
