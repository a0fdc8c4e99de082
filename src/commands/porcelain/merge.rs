use crate::areas::index::{RemoveOutcome, StagingArea};
use crate::areas::repository::Repository;
use crate::artifacts::core::GitletError;
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Three-way merge of another branch into the current one
    ///
    /// After the preconditions pass, the split point (latest common
    /// ancestor) decides the shape of the merge: an ancestor merge and a
    /// fast-forward short-circuit without creating a commit; otherwise the
    /// classic three-way rules are applied per path and a two-parent merge
    /// commit records the result, even when conflicts were synthesized.
    pub fn merge(&mut self, other_branch: &str) -> anyhow::Result<()> {
        let mut staging = self.staging()?;
        if !staging.is_clean() {
            return Err(GitletError::UncommittedChanges.into());
        }

        let other_tip = self
            .refs()
            .branch_tip(other_branch)?
            .ok_or(GitletError::BranchNotFound)?;

        let current_branch = self.refs().current_branch()?;
        if other_branch == current_branch {
            return Err(GitletError::MergeWithSelf.into());
        }

        let head_tip = self.head_tip()?;
        let other_commit = self.database().load_commit(&other_tip)?;
        self.check_untracked_overwrite(&staging, &other_commit)?;

        let split_point = {
            let finder = SplitPointFinder::new(|oid: &ObjectId| self.database().slim_commit(oid));
            finder.find_split_point(&head_tip, &other_tip)?
        };
        let split_point =
            split_point.context("Merged branches share no history with each other")?;

        if split_point == other_tip {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }

        if split_point == head_tip {
            self.checkout_commit(&mut staging, &other_commit)?;
            self.refs().set_branch_tip(&current_branch, &other_tip)?;
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let head_commit = self.database().load_commit(&head_tip)?;
        let split_commit = self.database().load_commit(&split_point)?;

        let mut paths = BTreeSet::new();
        paths.extend(split_commit.tracked().keys().cloned());
        paths.extend(head_commit.tracked().keys().cloned());
        paths.extend(other_commit.tracked().keys().cloned());

        let mut conflicted = false;
        for path in &paths {
            let base = split_commit.tracked().get(path);
            let head = head_commit.tracked().get(path);
            let other = other_commit.tracked().get(path);

            // Identical on both sides (or absent from both): nothing to merge
            if head == other {
                continue;
            }

            if base == head {
                // Only the other side changed
                match other {
                    Some(other_blob_id) => {
                        other_commit.restore_tracked(path, self.database())?;
                        staging.stage(path, other_blob_id.clone());
                    }
                    None => {
                        if staging.remove(path) == RemoveOutcome::Removed {
                            self.workspace().remove_file(Path::new(path))?;
                        }
                    }
                }
            } else if base == other {
                // Only this side changed: keep HEAD
            } else {
                conflicted = true;
                self.synthesize_conflict(path, head, other, &mut staging)?;
            }
        }

        let message = format!("Merged {} into {}.", other_branch, current_branch);
        self.commit_from_staging(&message, vec![head_tip, other_tip], &mut staging)?;

        if conflicted {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }

    /// Write the bracketed conflict payload into the working file and stage it
    fn synthesize_conflict(
        &self,
        path: &str,
        head_blob_id: Option<&ObjectId>,
        other_blob_id: Option<&ObjectId>,
        staging: &mut StagingArea,
    ) -> anyhow::Result<()> {
        let head_content = self.merge_side_content(head_blob_id)?;
        let other_content = self.merge_side_content(other_blob_id)?;

        let mut payload = Vec::new();
        payload.extend_from_slice(b"<<<<<<< HEAD\n");
        payload.extend_from_slice(&head_content);
        payload.extend_from_slice(b"=======\n");
        payload.extend_from_slice(&other_content);
        payload.extend_from_slice(b">>>>>>>\n");

        let file_path = Path::new(path);
        self.workspace().write_file(file_path, &payload)?;

        let blob = self.workspace().parse_blob(file_path)?;
        let blob_id = self.database().store(&blob)?;
        staging.stage(path, blob_id);

        Ok(())
    }

    /// One side's content for a conflict payload; empty when the side
    /// deleted the file
    fn merge_side_content(&self, blob_id: Option<&ObjectId>) -> anyhow::Result<Bytes> {
        match blob_id {
            Some(blob_id) => {
                let blob = self
                    .database()
                    .parse_object_as_blob(blob_id)?
                    .context(format!("Blob {} missing from the object store", blob_id))?;

                Ok(blob.content().clone())
            }
            None => Ok(Bytes::new()),
        }
    }
}
