//! Three-way classification of two snapshots
//!
//! - `classification`: the four-bucket result type
//! - `differ`: the diff pass and rename detection

pub mod classification;
pub mod differ;
