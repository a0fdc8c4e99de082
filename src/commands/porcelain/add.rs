use crate::areas::repository::Repository;
use crate::areas::workspace::path_key;
use crate::artifacts::core::GitletError;

impl Repository {
    /// Stage a file's current content
    ///
    /// Re-staging content identical to the tracked version reverts any
    /// pending entry for the path instead. The staging area is persisted
    /// only when it actually changed.
    pub fn add(&mut self, name: &str) -> anyhow::Result<()> {
        let path = self.workspace().resolve_path(name);

        if !self.workspace().file_exists(&path) {
            return Err(GitletError::FileMissing.into());
        }

        let blob = self.workspace().parse_blob(&path)?;
        let blob_id = self.database().store(&blob)?;

        let mut staging = self.staging()?;
        if staging.stage(&path_key(&path), blob_id) {
            staging.save()?;
        }

        Ok(())
    }
}
