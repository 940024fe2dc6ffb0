//! git-branch-checkout - an interactive fuzzy picker for `git checkout`
//!
//! Lists every local and remote branch of a repository, lets the user narrow
//! them down with an incremental fuzzy filter, and checks out the selection.

mod app;
mod git;
mod process;
mod ui;

use clap::Parser;
use color_eyre::eyre::Result;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Selection};

/// Interactively pick a git branch and check it out
#[derive(Parser, Debug)]
#[command(name = "gbc")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the git repository (defaults to current directory)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Enable debug logging (writes to gbc-debug.log)
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    color_eyre::install()?;

    let repo_path = args
        .path
        .clone()
        .unwrap_or_else(|| std::env::current_dir().expect("Failed to get current directory"));

    // Debug logs go to a file so they don't tear the TUI
    if args.debug {
        let log_file = std::fs::File::create(repo_path.join("gbc-debug.log"))
            .expect("Failed to create log file");
        tracing_subscriber::registry()
            .with(EnvFilter::new("debug"))
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(log_file),
            )
            .init();
    }

    let repo = git::Repository::discover(&repo_path)?;
    let branches = repo.list_branches()?;

    if branches.total() == 0 {
        println!("No branches to check out");
        return Ok(());
    }

    let terminal = ratatui::init();
    let selection = App::new(branches).run(terminal);
    ratatui::restore();

    match selection? {
        Selection::Branch(name) => {
            println!();
            git::checkout(&repo, &name)
        }
        Selection::Cancelled => {
            println!("Aborted");
            Ok(())
        }
    }
}
