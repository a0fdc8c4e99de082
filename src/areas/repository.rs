//! Repository abstraction and coordination
//!
//! This module provides the main `Repository` type that coordinates all
//! engine operations. It acts as a facade over the lower-level components
//! (database, workspace, refs, staging area) and hosts the high-level
//! commands, one `impl` block per operation under `commands::porcelain`.
//!
//! ## Architecture
//!
//! The repository maintains references to:
//! - Database: content-addressed object storage (blobs, commits)
//! - Workspace: working directory operations
//! - Refs: branch and HEAD management
//!
//! The staging area is rehydrated on demand inside a command, with the HEAD
//! snapshot injected as its `tracked` view, so purely static operations
//! never touch it.

use crate::areas::database::Database;
use crate::areas::index::StagingArea;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::GitletError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Metadata directory name
const GITLET_DIR: &str = ".gitlet";

/// Object database directory name
const DATABASE_DIR: &str = "objects";

/// Index file name
const INDEX_FILE: &str = "index";

/// Branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";

/// Gitlet repository
///
/// Coordinates all engine operations and provides access to the database,
/// workspace, and refs subsystems. This is the main entry point for every
/// command.
///
/// ## Usage
///
/// ```ignore
/// let mut repository = Repository::new(pwd, Box::new(std::io::stdout()))?;
/// repository.init()?;
/// repository.add("file.txt")?;
/// repository.commit("first")?;
/// ```
pub struct Repository {
    /// Working root path
    path: Box<Path>,
    /// Output writer (stdout in production, a buffer in tests)
    writer: RefCell<Box<dyn std::io::Write>>,
    /// Object database
    database: Database,
    /// Working directory
    workspace: Workspace,
    /// Reference manager
    refs: Refs,
}

impl Repository {
    pub fn new(path: PathBuf, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path
            .canonicalize()
            .context(format!("Invalid working directory {}", path.display()))?;

        let database = Database::new(path.join(GITLET_DIR).join(DATABASE_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(path.join(GITLET_DIR).into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn gitlet_path(&self) -> PathBuf {
        self.path.join(GITLET_DIR)
    }

    pub fn index_path(&self) -> PathBuf {
        self.gitlet_path().join(INDEX_FILE)
    }

    /// Fail with the standard diagnostic unless `init` has run here
    pub fn check_initialized(&self) -> anyhow::Result<()> {
        if !self.gitlet_path().is_dir() {
            return Err(GitletError::NotInitialized.into());
        }

        Ok(())
    }

    /// The tip commit id of the branch HEAD designates
    pub fn head_tip(&self) -> anyhow::Result<ObjectId> {
        let branch = self.refs.current_branch()?;

        self.refs
            .branch_tip(&branch)?
            .context(format!("Branch {} has no tip commit", branch))
    }

    /// The commit at the tip of the current branch
    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        let tip = self.head_tip()?;

        self.database.load_commit(&tip)
    }

    /// Rehydrate the staging area with the HEAD snapshot injected
    pub fn staging(&self) -> anyhow::Result<StagingArea> {
        let tracked = self.head_commit()?.tracked().clone();

        StagingArea::load(self.index_path(), tracked)
    }

    /// Resolve a full or abbreviated commit id to the stored commit
    pub fn resolve_commit(&self, id: &str) -> anyhow::Result<Commit> {
        let object_id = self.database.resolve_commit_prefix(id)?;

        self.database.load_commit(&object_id)
    }

    /// Every commit reachable from any branch tip, newest first
    ///
    /// Ordering is reverse chronological with the commit id as a stable
    /// secondary key, so repeated runs print identical sequences even when
    /// timestamps collide.
    pub fn reachable_commits(&self) -> anyhow::Result<Vec<(ObjectId, Commit)>> {
        let mut pending = Vec::new();
        for branch in self.refs.list_branches()? {
            if let Some(tip) = self.refs.branch_tip(&branch)? {
                pending.push(tip);
            }
        }

        let mut visited = HashSet::new();
        let mut commits = Vec::new();

        while let Some(oid) = pending.pop() {
            if !visited.insert(oid.clone()) {
                continue;
            }

            let commit = self.database.load_commit(&oid)?;
            pending.extend(commit.parents().iter().cloned());
            commits.push((oid, commit));
        }

        commits.sort_by(|(left_oid, left), (right_oid, right)| {
            right
                .timestamp()
                .cmp(&left.timestamp())
                .then_with(|| left_oid.cmp(right_oid))
        });

        Ok(commits)
    }
}
