//! Command orchestration
//!
//! A single porcelain operation: compare two repositories at a reference
//! and emit the report, the manifest and the diagnostic log.

pub mod compare;
