//! Git blob object
//!
//! Blobs hold raw file content. The content stays as bytes end to end:
//! classification is byte-for-byte equality and files are not required to be
//! valid UTF-8.

use crate::artifacts::objects::Unpackable;
use bytes::Bytes;
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn into_content(self) -> Bytes {
        self.content
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been consumed
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        Ok(Blob {
            content: content.into(),
        })
    }
}
