use crate::areas::repository::Repository;
use crate::artifacts::core::GitletError;

impl Repository {
    /// Delete a branch reference; the commits it pointed at are untouched
    pub fn rm_branch(&mut self, name: &str) -> anyhow::Result<()> {
        if !self.refs().branch_exists(name) {
            return Err(GitletError::BranchNotFound.into());
        }

        if name == self.refs().current_branch()? {
            return Err(GitletError::RemoveCurrentBranch.into());
        }

        self.refs().delete_branch(name)
    }
}
