use crate::command;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "rebase-plan")]
#[command(about = "Print the git rebase commands needed to restack a hierarchy of branches")]
#[command(after_help = "Commands are printed parent first. Nothing is executed.")]
struct Cli {
    /// Location of the repository's git metadata (e.g. path/to/repo/.git)
    git_dir: PathBuf,
}

// --- Public Entry Point ---
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    command::plan::run(&cli.git_dir)
}
