//! Checking out the selected branch

use color_eyre::eyre::Result;
use tracing::info;

use super::Repository;
use crate::process::run_inherited;

/// Check out a branch by name, streaming git's output to the terminal.
///
/// Inherited stdio keeps git's progress messages, warnings, and colors
/// intact.
pub fn checkout(repo: &Repository, branch: &str) -> Result<()> {
    info!("Checking out branch: {}", branch);

    run_inherited(repo.root(), "git", &["checkout", branch])
}
