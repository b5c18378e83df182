//! Git object types, read side only
//!
//! Git stores all content as zlib-compressed objects identified by SHA-1
//! hashes, serialized as `<type> <size>\0<content>`. This tool never writes
//! objects, so each type implements deserialization from an already
//! header-stripped reader and nothing else.

pub mod blob;
pub mod commit;
pub mod entry_mode;
pub mod object_id;
pub mod object_type;
pub mod tree;

use std::io::BufRead;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self>
    where
        Self: Sized;
}
