use crate::areas::index::StagingArea;
use crate::areas::repository::Repository;
use crate::areas::workspace::path_key;
use crate::artifacts::core::GitletError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use std::path::Path;

impl Repository {
    /// `checkout -- <name>`: restore a file from the HEAD commit
    pub fn checkout_file(&mut self, name: &str) -> anyhow::Result<()> {
        let path = self.workspace().resolve_path(name);
        let head_commit = self.head_commit()?;

        if !head_commit.restore_tracked(&path_key(&path), self.database())? {
            return Err(GitletError::NotInCommit.into());
        }

        Ok(())
    }

    /// `checkout <commit-id> -- <name>`: restore a file from any commit
    ///
    /// The id may be abbreviated down to 4 characters.
    pub fn checkout_file_at(&mut self, commit_id: &str, name: &str) -> anyhow::Result<()> {
        let path = self.workspace().resolve_path(name);
        let commit = self.resolve_commit(commit_id)?;

        if !commit.restore_tracked(&path_key(&path), self.database())? {
            return Err(GitletError::NotInCommit.into());
        }

        Ok(())
    }

    /// `checkout <branch>`: make the working tree match another branch's tip
    ///
    /// The untracked-overwrite safety check runs before anything is touched.
    pub fn checkout_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let target_tip = self
            .refs()
            .branch_tip(name)?
            .ok_or(GitletError::NoSuchBranch)?;

        if name == self.refs().current_branch()? {
            return Err(GitletError::AlreadyOnBranch.into());
        }

        let target_commit = self.database().load_commit(&target_tip)?;
        let mut staging = self.staging()?;

        self.check_untracked_overwrite(&staging, &target_commit)?;
        self.checkout_commit(&mut staging, &target_commit)?;
        self.refs().set_current_branch(name)?;

        Ok(())
    }

    /// Abort when an untracked working-tree file would be overwritten
    ///
    /// A file counts as untracked when it is neither staged for addition nor
    /// tracked by HEAD (a staged removal makes a re-created file untracked
    /// again). Only files the target commit would materialize with different
    /// content are in the way.
    pub(crate) fn check_untracked_overwrite(
        &self,
        staging: &StagingArea,
        target: &Commit,
    ) -> anyhow::Result<()> {
        for file in self.workspace().list_files()? {
            let key = path_key(&file);

            let staged = staging.added().contains_key(&key);
            let tracked = staging.tracked().contains_key(&key) && !staging.removed().contains(&key);
            if staged || tracked {
                continue;
            }

            if let Some(target_blob_id) = target.tracked().get(&key) {
                let current_id = self.workspace().parse_blob(&file)?.object_id()?;
                if &current_id != target_blob_id {
                    return Err(GitletError::UntrackedOverwrite.into());
                }
            }
        }

        Ok(())
    }

    /// Replace the working tree with a commit's snapshot
    ///
    /// Clears the staging area, deletes the files tracked by the current
    /// HEAD commit, and re-materializes the target snapshot. Untracked files
    /// that passed the safety check are left alone.
    pub(crate) fn checkout_commit(
        &self,
        staging: &mut StagingArea,
        target: &Commit,
    ) -> anyhow::Result<()> {
        staging.clear();
        staging.save()?;

        for path in staging.tracked().keys() {
            self.workspace().remove_file(Path::new(path))?;
        }

        target.restore_all_tracked(self.database())
    }
}
