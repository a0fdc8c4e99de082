use crate::areas::repository::Repository;

impl Repository {
    /// Move the current branch's tip to the given commit
    ///
    /// The working tree is replaced with the target snapshot, guarded by the
    /// same untracked-overwrite check as a branch checkout. HEAD keeps
    /// naming the same branch.
    pub fn reset(&mut self, commit_id: &str) -> anyhow::Result<()> {
        let target_id = self.database().resolve_commit_prefix(commit_id)?;
        let target_commit = self.database().load_commit(&target_id)?;

        let mut staging = self.staging()?;
        self.check_untracked_overwrite(&staging, &target_commit)?;
        self.checkout_commit(&mut staging, &target_commit)?;

        let current_branch = self.refs().current_branch()?;
        self.refs().set_branch_tip(&current_branch, &target_id)
    }
}
