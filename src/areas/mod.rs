//! Repository-facing components
//!
//! - `database`: read-only loose-object database under `.git/objects`
//! - `refs`: read-only reference resolution (branches, tags, raw ref files)
//! - `snapshot`: the immutable view of one repository at one reference

pub mod database;
pub mod refs;
pub mod snapshot;
