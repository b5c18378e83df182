//! Markdown report serialization
//!
//! The report layout is fixed: a title, then Modified, Added, Removed and
//! Renamed sections in that order, one `- path` line per entry (`- old ->
//! new` for renames). Section entries keep the differ's insertion order.
//! A destination that cannot be written is fatal; no partial-write cleanup
//! is attempted.

use crate::artifacts::classify::classification::ClassificationResult;
use crate::diagnostics::Diagnostics;
use anyhow::Context;
use derive_new::new;
use std::path::Path;

#[derive(new)]
pub struct Reporter<'r> {
    diagnostics: &'r Diagnostics,
}

impl Reporter<'_> {
    pub fn write(&self, result: &ClassificationResult, destination: &Path) -> anyhow::Result<()> {
        self.diagnostics
            .info(format!("writing results to {}", destination.display()));

        std::fs::write(destination, Self::render(result))
            .with_context(|| format!("unable to write report to {}", destination.display()))
    }

    fn render(result: &ClassificationResult) -> String {
        let mut report = String::new();
        report.push_str("# Repository Comparison Results\n\n");

        report.push_str("## Modified Files\n");
        for path in result.modified() {
            report.push_str(&format!("- {}\n", path.display()));
        }

        report.push_str("\n## Added Files\n");
        for path in result.added() {
            report.push_str(&format!("- {}\n", path.display()));
        }

        report.push_str("\n## Removed Files\n");
        for path in result.removed() {
            report.push_str(&format!("- {}\n", path.display()));
        }

        report.push_str("\n## Renamed Files\n");
        for (old, new) in result.renamed() {
            report.push_str(&format!("- {} -> {}\n", old.display(), new.display()));
        }

        report
    }
}
