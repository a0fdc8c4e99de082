use crate::areas::index::RemoveOutcome;
use crate::areas::repository::Repository;
use crate::areas::workspace::path_key;
use crate::artifacts::core::GitletError;

impl Repository {
    /// Unstage a pending addition, or mark a tracked file for removal
    ///
    /// Marking a tracked file also deletes it from the working tree.
    pub fn rm(&mut self, name: &str) -> anyhow::Result<()> {
        let path = self.workspace().resolve_path(name);

        let mut staging = self.staging()?;
        match staging.remove(&path_key(&path)) {
            RemoveOutcome::Unstaged => staging.save(),
            RemoveOutcome::Removed => {
                self.workspace().remove_file(&path)?;
                staging.save()
            }
            RemoveOutcome::Unchanged => Err(GitletError::NothingToRemove.into()),
        }
    }
}
