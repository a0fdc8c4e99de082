use crate::areas::repository::Repository;
use crate::artifacts::core::GitletError;

impl Repository {
    /// Create a branch pointing at the current HEAD commit
    pub fn branch(&mut self, name: &str) -> anyhow::Result<()> {
        if self.refs().branch_exists(name) {
            return Err(GitletError::BranchExists.into());
        }

        let head_tip = self.head_tip()?;
        self.refs().set_branch_tip(name, &head_tip)
    }
}
