//! Status report formatting
//!
//! The `status` command reconciles three file-set views: the working tree,
//! the staging area, and the HEAD snapshot. This module holds the assembled
//! result and renders the five fixed sections in their required order, each
//! terminated by a blank line.

use std::fmt;

/// How a tracked-after-staging file diverges from the working tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// The working-tree content hashes differently than the staged/tracked blob
    Modified,
    /// The working-tree file is gone without a staged removal
    Deleted,
}

impl ChangeKind {
    pub fn as_str(&self) -> &str {
        match self {
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Assembled working-tree status
///
/// All file lists hold basenames, already sorted by the caller:
/// staged/removed/untracked lexicographically, modifications by full path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    /// The branch HEAD designates
    pub current_branch: String,
    /// Every other branch, lexicographic
    pub other_branches: Vec<String>,
    /// Pending additions
    pub staged: Vec<String>,
    /// Pending removals
    pub removed: Vec<String>,
    /// Unstaged divergences between the working tree and the staged view
    pub modifications: Vec<(String, ChangeKind)>,
    /// Working-tree files absent from the staged view
    pub untracked: Vec<String>,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Branches ===")?;
        writeln!(f, "*{}", self.current_branch)?;
        for branch in &self.other_branches {
            writeln!(f, "{}", branch)?;
        }
        writeln!(f)?;

        writeln!(f, "=== Staged Files ===")?;
        for name in &self.staged {
            writeln!(f, "{}", name)?;
        }
        writeln!(f)?;

        writeln!(f, "=== Removed Files ===")?;
        for name in &self.removed {
            writeln!(f, "{}", name)?;
        }
        writeln!(f)?;

        writeln!(f, "=== Modifications Not Staged For Commit ===")?;
        for (name, kind) in &self.modifications {
            writeln!(f, "{} ({})", name, kind)?;
        }
        writeln!(f)?;

        writeln!(f, "=== Untracked Files ===")?;
        for name in &self.untracked {
            writeln!(f, "{}", name)?;
        }
        writeln!(f)
    }
}
