//! Core utilities and shared types
//!
//! This module holds the closed set of user-visible failure conditions.
//! Every variant's `Display` is the exact diagnostic line shown to the user;
//! `main` downcasts to this type to decide between the quiet exit convention
//! (print the line, exit 0) and a genuine internal failure.

use thiserror::Error;

/// User-visible failure conditions
///
/// Each variant halts the running command; local recovery is never attempted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GitletError {
    #[error("Please enter a command.")]
    NoCommand,
    #[error("No command with that name exists.")]
    UnknownCommand,
    #[error("Incorrect operands.")]
    BadOperands,
    #[error("Please enter a commit message.")]
    EmptyCommitMessage,
    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,
    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,
    #[error("File does not exist.")]
    FileMissing,
    #[error("No changes added to the commit.")]
    NoChanges,
    #[error("No reason to remove the file.")]
    NothingToRemove,
    #[error("Found no commit with that message.")]
    NoSuchMessage,
    #[error("File does not exist in that commit.")]
    NotInCommit,
    #[error("No commit with that id exists.")]
    NoSuchCommit,
    #[error("Commit id should contain at least 4 characters.")]
    ShortId,
    #[error("More than 1 commit has the same id prefix.")]
    AmbiguousId,
    /// Reported by `checkout <branch>` when the target branch is missing.
    #[error("No such branch exists.")]
    NoSuchBranch,
    /// Reported by `rm-branch` and `merge` when the named branch is missing.
    #[error("A branch with that name does not exist.")]
    BranchNotFound,
    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,
    #[error("A branch with that name already exists.")]
    BranchExists,
    #[error("Cannot remove the current branch.")]
    RemoveCurrentBranch,
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedOverwrite,
    #[error("You have uncommitted changes.")]
    UncommittedChanges,
    #[error("Cannot merge a branch with itself.")]
    MergeWithSelf,
}
