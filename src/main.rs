use anyhow::Result;
use clap::Parser;
use repodiff::commands::compare::{CompareOptions, compare};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "repodiff",
    version,
    about = "Compare the tracked files of two git repositories",
    long_about = "Compares the files tracked by two git repositories at the same reference \
    and classifies each path as modified, added, removed or renamed. \
    Results are written as a Markdown report alongside a run manifest and a diagnostic log. \
    Both repositories are read through their object databases; neither working tree is touched.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(long, help = "Path to the first repository")]
    repo1: PathBuf,

    #[arg(long, help = "Path to the second repository")]
    repo2: PathBuf,

    #[arg(
        long,
        default_value = "repo_diff_results.md",
        help = "Path to save the comparison report"
    )]
    output: PathBuf,

    #[arg(
        long,
        default_value = "main",
        help = "Reference to compare at (branch, tag or full commit id)"
    )]
    reference: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let options = CompareOptions::new(cli.repo1, cli.repo2, cli.output, cli.reference);

    compare(&options, &mut std::io::stdout())
}
