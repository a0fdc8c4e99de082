use crate::areas::repository::{DEFAULT_BRANCH, Repository};
use crate::artifacts::core::GitletError;
use crate::artifacts::objects::commit::Commit;
use anyhow::Context;
use std::fs;

impl Repository {
    /// Create the metadata skeleton and the initial commit
    ///
    /// ```text
    /// .gitlet
    /// ├── HEAD
    /// ├── objects
    /// └── refs
    ///     └── heads
    /// ```
    pub fn init(&mut self) -> anyhow::Result<()> {
        if self.gitlet_path().exists() {
            return Err(GitletError::AlreadyInitialized.into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .gitlet/objects directory")?;
        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .gitlet/refs/heads directory")?;

        let initial_commit_id = self.database().store(&Commit::initial())?;
        self.refs().set_branch_tip(DEFAULT_BRANCH, &initial_commit_id)?;
        self.refs().set_current_branch(DEFAULT_BRANCH)?;

        Ok(())
    }
}
