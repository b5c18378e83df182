use crate::areas::snapshot::Snapshot;
use crate::artifacts::classify::differ::Differ;
use crate::artifacts::reference::ReferenceName;
use crate::artifacts::report::manifest::{MANIFEST_FILE_NAME, Manifest};
use crate::artifacts::report::reporter::Reporter;
use crate::diagnostics::Diagnostics;
use anyhow::Context;
use colored::Colorize;
use derive_new::new;
use std::path::PathBuf;

pub const LOG_FILE_NAME: &str = "repodiff.log";

#[derive(Debug, Clone, new)]
pub struct CompareOptions {
    pub repo1: PathBuf,
    pub repo2: PathBuf,
    pub output: PathBuf,
    pub reference: String,
}

/// Run one full comparison: open both snapshots, classify, write the report
/// and the manifest, and print a confirmation with a per-bucket summary.
///
/// Setup and output failures abort with an error; per-path read failures are
/// handled inside the differ and only show up in the diagnostic log.
pub fn compare(options: &CompareOptions, writer: &mut impl std::io::Write) -> anyhow::Result<()> {
    let log_path = PathBuf::from(LOG_FILE_NAME);
    let diagnostics = Diagnostics::to_file(&log_path)?;
    diagnostics.info(format!(
        "starting comparison of {} and {}",
        options.repo1.display(),
        options.repo2.display()
    ));

    let reference = ReferenceName::try_parse(options.reference.clone())?;

    let snapshot1 = Snapshot::open(&options.repo1, reference.clone(), &diagnostics)
        .with_context(|| format!("unable to open repository {}", options.repo1.display()))?;
    let snapshot2 = Snapshot::open(&options.repo2, reference.clone(), &diagnostics)
        .with_context(|| format!("unable to open repository {}", options.repo2.display()))?;

    let result = Differ::new(&snapshot1, &snapshot2, &diagnostics).classify();

    Reporter::new(&diagnostics).write(&result, &options.output)?;

    let manifest_path = PathBuf::from(MANIFEST_FILE_NAME);
    Manifest::new(
        &options.repo1,
        &options.repo2,
        &reference,
        &options.output,
        &log_path,
    )
    .write(&manifest_path)?;
    diagnostics.info(format!("manifest written to {}", manifest_path.display()));

    writeln!(
        writer,
        "Comparison results saved to {}",
        options.output.display()
    )?;
    writeln!(
        writer,
        "{} modified, {} added, {} removed, {} renamed",
        result.modified().len().to_string().yellow(),
        result.added().len().to_string().green(),
        result.removed().len().to_string().red(),
        result.renamed().len().to_string().cyan(),
    )?;

    diagnostics.info("comparison completed");
    Ok(())
}
