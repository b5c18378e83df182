//! Run outputs: the Markdown report and the run manifest

pub mod manifest;
pub mod reporter;
