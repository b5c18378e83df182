//! Git tree object
//!
//! Trees are directory snapshots: a sorted list of named entries pointing at
//! blobs (files) or further trees (subdirectories).
//!
//! On disk each entry is `<octal mode> <name>\0<20-byte-sha1>`, with no
//! separator between entries.

use crate::artifacts::objects::Unpackable;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::collections::BTreeMap;
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub oid: ObjectId,
    pub mode: EntryMode,
}

/// A tree loaded from the object database, keyed by entry name.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    entries: BTreeMap<String, TreeEntry>,
}

impl Tree {
    pub fn entries(&self) -> impl Iterator<Item = (&String, &TreeEntry)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> impl Iterator<Item = (String, TreeEntry)> {
        self.entries.into_iter()
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut entries = BTreeMap::new();
        let mut reader = reader;

        // Reuse scratch buffers to reduce allocs
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            let n = reader.read_until(b' ', &mut mode_bytes)?;
            if n == 0 {
                break; // clean EOF: no more entries
            }
            if *mode_bytes.last().unwrap() != b' ' {
                return Err(anyhow::anyhow!("unexpected EOF in mode"));
            }
            mode_bytes.pop(); // drop the space

            let mode_str = std::str::from_utf8(&mode_bytes)?;
            let mode = EntryMode::from_octal_str(mode_str)?;

            name_bytes.clear();
            let n = reader.read_until(b'\0', &mut name_bytes)?;
            if n == 0 || *name_bytes.last().unwrap() != b'\0' {
                return Err(anyhow::anyhow!("unexpected EOF in name"));
            }
            name_bytes.pop(); // drop NUL
            let name = std::str::from_utf8(&name_bytes)?.to_owned();

            let oid =
                ObjectId::read_h40_from(&mut reader).context("unexpected EOF in object id")?;

            entries.insert(name, TreeEntry::new(oid, mode));
        }

        Ok(Tree { entries })
    }
}
