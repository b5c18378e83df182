//! Git commit object
//!
//! A snapshot only needs the commit's tree pointer; author, committer and
//! message are skipped over. The header section is a series of
//! `<key> <value>` lines terminated by a blank line before the message.

use crate::artifacts::objects::Unpackable;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    tree_oid: ObjectId,
    parent_oids: Vec<ObjectId>,
}

impl Commit {
    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent_oids(&self) -> &[ObjectId] {
        &self.parent_oids
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been consumed
        let mut tree_oid = None;
        let mut parent_oids = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                break; // end of headers, the message follows
            }

            if let Some(oid) = line.strip_prefix("tree ") {
                tree_oid = Some(ObjectId::try_parse(oid.to_string())?);
            } else if let Some(oid) = line.strip_prefix("parent ") {
                parent_oids.push(ObjectId::try_parse(oid.to_string())?);
            }
        }

        Ok(Commit {
            tree_oid: tree_oid.context("commit has no tree header")?,
            parent_oids,
        })
    }
}
