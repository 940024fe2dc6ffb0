//! Repository discovery and branch listing using git CLI

use color_eyre::eyre::{Context, Result, eyre};
use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

use crate::process::run_captured;

/// One parsed line of `git branch --all` output
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawRef {
    /// Short branch name with the ref prefix stripped
    name: String,
    /// Whether this ref is the currently checked-out branch
    checked_out: bool,
    /// Whether this is a remote-tracking ref
    is_remote: bool,
}

/// All branches known to the repository, grouped for the picker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchSet {
    /// Unique local branch names, sorted
    pub local: Vec<String>,
    /// Unique remote branch names with no local counterpart, sorted
    pub remote_only: Vec<String>,
    /// Short name of the currently checked-out branch, if any
    pub checked_out: Option<String>,
}

impl BranchSet {
    /// Number of selectable branches across both groups
    pub fn total(&self) -> usize {
        self.local.len() + self.remote_only.len()
    }
}

/// Wrapper around a git repository (uses git CLI)
pub struct Repository {
    root: PathBuf,
}

impl Repository {
    /// Discover and open a git repository from the given path
    pub fn discover(path: &Path) -> Result<Self> {
        let output = Command::new("git")
            .args(["rev-parse", "--show-toplevel"])
            .current_dir(path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .with_context(|| format!("Failed to run git in: {}", path.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(eyre!(
                "Could not find a git repository in '{}' or in any of its parents.\n{}",
                path.display(),
                stderr.trim()
            ));
        }

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let root = PathBuf::from(root);

        debug!("Discovered git repository at: {}", root.display());

        Ok(Self { root })
    }

    /// Get the repository root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List every branch ref, split into local and remote-only groups
    pub fn list_branches(&self) -> Result<BranchSet> {
        let output = run_captured(
            &self.root,
            "git",
            &["branch", "--all", "--format=%(HEAD) %(refname)"],
        )?;

        let branches = parse_branch_output(&output);
        debug!(
            "Found {} local and {} remote-only branches",
            branches.local.len(),
            branches.remote_only.len()
        );

        Ok(branches)
    }
}

/// Parse `git branch --all --format="%(HEAD) %(refname)"` output.
///
/// HEAD-pointer refs are dropped, names are deduplicated and sorted by byte
/// order, and remote names shadowed by a local branch collapse into the
/// local group.
fn parse_branch_output(output: &str) -> BranchSet {
    // Only the first segment after remotes/ is the remote name; any further
    // slashes belong to the branch name itself.
    let ref_prefix = Regex::new(r"^refs/(heads|remotes/[^/]+)/").unwrap();

    let mut refs = Vec::new();
    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() || line.ends_with("/HEAD") {
            continue;
        }

        let checked_out = line.starts_with('*');
        let full_ref = line.trim_start_matches('*').trim_start();

        refs.push(RawRef {
            name: ref_prefix.replace(full_ref, "").to_string(),
            checked_out,
            is_remote: full_ref.starts_with("refs/remotes/"),
        });
    }

    let checked_out = refs
        .iter()
        .find(|r| r.checked_out)
        .map(|r| r.name.clone());

    let local: BTreeSet<String> = refs
        .iter()
        .filter(|r| !r.is_remote)
        .map(|r| r.name.clone())
        .collect();

    let remote_only: BTreeSet<String> = refs
        .iter()
        .filter(|r| r.is_remote && !local.contains(&r.name))
        .map(|r| r.name.clone())
        .collect();

    BranchSet {
        local: local.into_iter().collect(),
        remote_only: remote_only.into_iter().collect(),
        checked_out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_local_and_remote_branches() {
        let set = parse_branch_output(
            "* refs/heads/main\n  refs/heads/dev\n  refs/remotes/origin/main\n  refs/remotes/origin/feature\n",
        );
        assert_eq!(set.local, vec!["dev", "main"]);
        assert_eq!(set.remote_only, vec!["feature"]);
        assert_eq!(set.total(), 3);
        assert_eq!(set.checked_out.as_deref(), Some("main"));
    }

    #[test]
    fn empty_output_yields_empty_set() {
        let set = parse_branch_output("");
        assert_eq!(set.total(), 0);
        assert!(set.local.is_empty());
        assert!(set.remote_only.is_empty());
        assert!(set.checked_out.is_none());
    }

    #[test]
    fn head_pointer_refs_are_skipped() {
        let set = parse_branch_output(
            "  refs/heads/main\n  refs/remotes/origin/HEAD\n  refs/remotes/origin/main\n",
        );
        assert_eq!(set.local, vec!["main"]);
        assert!(set.remote_only.is_empty());
    }

    #[test]
    fn remote_copies_of_local_branches_collapse_into_local() {
        let set = parse_branch_output("* refs/heads/main\n  refs/remotes/origin/main\n");
        assert_eq!(set.local, vec!["main"]);
        assert!(set.remote_only.is_empty());
        assert_eq!(set.total(), 1);
    }

    #[test]
    fn names_are_deduplicated_and_sorted() {
        let set = parse_branch_output(
            "  refs/remotes/origin/zeta\n  refs/remotes/backup/zeta\n  refs/remotes/origin/alpha\n",
        );
        assert_eq!(set.remote_only, vec!["alpha", "zeta"]);
        assert_eq!(set.total(), 2);
    }

    #[test]
    fn slashes_in_branch_names_survive_prefix_stripping() {
        let set = parse_branch_output(
            "  refs/heads/feature/login\n  refs/remotes/origin/feature/deep/nesting\n",
        );
        assert_eq!(set.local, vec!["feature/login"]);
        assert_eq!(set.remote_only, vec!["feature/deep/nesting"]);
    }

    #[test]
    fn unmarked_lines_leave_checked_out_empty() {
        let set = parse_branch_output("  refs/heads/dev\n  refs/heads/main\n");
        assert!(set.checked_out.is_none());
    }

    #[test]
    fn test_discover_repo() {
        let current_dir = std::env::current_dir().unwrap();
        let result = Repository::discover(&current_dir);
        if let Ok(repo) = result {
            assert!(repo.root().exists());
        }
    }
}
