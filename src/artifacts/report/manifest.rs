//! Run manifest
//!
//! A small bill-of-materials for traceability: which tool version compared
//! which repositories at which reference, and where the outputs went.
//! Written to a fixed file name in the working directory, overwritten on
//! every run.

use crate::artifacts::reference::ReferenceName;
use anyhow::Context;
use derive_new::new;
use std::path::Path;

pub const MANIFEST_FILE_NAME: &str = "repodiff_manifest.txt";

#[derive(Debug, new)]
pub struct Manifest<'m> {
    repo1: &'m Path,
    repo2: &'m Path,
    reference: &'m ReferenceName,
    output: &'m Path,
    log_path: &'m Path,
}

impl Manifest<'_> {
    pub fn write(&self, destination: &Path) -> anyhow::Result<()> {
        std::fs::write(destination, self.render())
            .with_context(|| format!("unable to write manifest to {}", destination.display()))
    }

    fn render(&self) -> String {
        let mut manifest = String::new();
        manifest.push_str("Software Bill of Materials:\n");
        manifest.push_str(&format!(
            "- {}: {}\n",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ));
        manifest.push_str(&format!(
            "- Generated: {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S %z")
        ));
        manifest.push_str(&format!(
            "- Repositories compared: {}, {}\n",
            self.repo1.display(),
            self.repo2.display()
        ));
        manifest.push_str(&format!("- Reference: {}\n", self.reference));
        manifest.push_str(&format!("- Output file: {}\n", self.output.display()));
        manifest.push_str(&format!("- Log file: {}\n", self.log_path.display()));
        manifest
    }
}
