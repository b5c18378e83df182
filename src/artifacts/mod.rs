//! Domain types and algorithms
//!
//! - `classify`: the three-way classification (diff + rename detection)
//! - `objects`: git object types read from the object database
//! - `reference`: reference name validation
//! - `report`: Markdown report and run manifest serialization

pub mod classify;
pub mod objects;
pub mod reference;
pub mod report;
