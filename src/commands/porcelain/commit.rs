use crate::areas::index::StagingArea;
use crate::areas::repository::Repository;
use crate::artifacts::core::GitletError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Drain the staging area into a new commit on the current branch
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let mut staging = self.staging()?;
        if staging.is_clean() {
            return Err(GitletError::NoChanges.into());
        }

        let parent = self.head_tip()?;
        self.commit_from_staging(message, vec![parent], &mut staging)?;

        Ok(())
    }

    /// Create a commit from the drained staging area and advance the branch
    ///
    /// Shared by `commit` (one parent) and `merge` (two parents).
    pub(crate) fn commit_from_staging(
        &mut self,
        message: &str,
        parents: Vec<ObjectId>,
        staging: &mut StagingArea,
    ) -> anyhow::Result<ObjectId> {
        let tracked = staging.commit_drain();
        let commit = Commit::new(parents, message.to_string(), tracked);

        let commit_id = self.database().store(&commit)?;
        staging.save()?;

        let current_branch = self.refs().current_branch()?;
        self.refs().set_branch_tip(&current_branch, &commit_id)?;

        Ok(commit_id)
    }
}
