//! Staging area (index)
//!
//! The staging area buffers pending changes between commits:
//! - `added`: new or modified stagings, mapped path -> blob id
//! - `removed`: paths marked for deletion at the next commit
//! - `tracked`: a transient view of the HEAD commit's snapshot, injected on
//!   load and never persisted
//!
//! A path appears in at most one of `added` / `removed`. Both sets are
//! cleared when a commit drains the staging area.
//!
//! ## Persistence
//!
//! The staging area is persisted as JSON at `.gitlet/index`, guarded by an
//! advisory file lock while reading or writing.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::DerefMut;
use std::path::PathBuf;

/// Outcome of asking the staging area to remove a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The path had a pending addition, which was dropped
    Unstaged,
    /// The path is tracked by HEAD and is now marked for deletion;
    /// the caller deletes the working-tree file
    Removed,
    /// The path is neither staged nor tracked
    Unchanged,
}

/// Staging area
///
/// Mutable session state between commits, rehydrated from `.gitlet/index`
/// with the HEAD snapshot injected as the `tracked` view.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StagingArea {
    /// Path to the index file (typically `.gitlet/index`)
    #[serde(skip)]
    path: PathBuf,
    /// Pending additions: path -> blob id
    added: BTreeMap<String, ObjectId>,
    /// Pending removals
    removed: BTreeSet<String>,
    /// HEAD commit snapshot, injected on load
    #[serde(skip)]
    tracked: BTreeMap<String, ObjectId>,
}

impl StagingArea {
    /// Rehydrate the staging area from disk
    ///
    /// A missing or empty index file yields an empty staging area.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the index file
    /// * `tracked` - The HEAD commit's snapshot map
    pub fn load(path: PathBuf, tracked: BTreeMap<String, ObjectId>) -> anyhow::Result<Self> {
        if !path.exists() || std::fs::metadata(&path)?.len() == 0 {
            return Ok(StagingArea {
                path,
                tracked,
                ..Default::default()
            });
        }

        let mut index_file = std::fs::OpenOptions::new()
            .read(true)
            .open(&path)
            .context(format!("Unable to open index file {}", path.display()))?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        let mut staging: StagingArea = serde_json::from_reader(lock.deref_mut())
            .context(format!("Unable to parse index file {}", path.display()))?;
        staging.path = path;
        staging.tracked = tracked;

        Ok(staging)
    }

    /// Persist the staging area to its index file
    pub fn save(&self) -> anyhow::Result<()> {
        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .context(format!("Unable to open index file {}", self.path.display()))?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        serde_json::to_writer(lock.deref_mut(), self)
            .context(format!("Unable to write index file {}", self.path.display()))?;

        Ok(())
    }

    /// Stage a blob for `path`
    ///
    /// If the blob matches the tracked version, any pending entry for the
    /// path is dropped instead (the path reverts to clean). Otherwise the
    /// pending addition is recorded, replacing a prior one and clearing a
    /// pending removal.
    ///
    /// # Returns
    ///
    /// Whether the staging area changed
    pub fn stage(&mut self, path: &str, blob_id: ObjectId) -> bool {
        if self.tracked.get(path) == Some(&blob_id) {
            let had_addition = self.added.remove(path).is_some();
            let had_removal = self.removed.remove(path);
            return had_addition || had_removal;
        }

        let cleared_removal = self.removed.remove(path);
        match self.added.insert(path.to_string(), blob_id.clone()) {
            Some(previous) if previous == blob_id && !cleared_removal => false,
            _ => true,
        }
    }

    /// Mark `path` for removal
    ///
    /// A pending addition is dropped outright; a tracked path is marked for
    /// deletion at the next commit.
    pub fn remove(&mut self, path: &str) -> RemoveOutcome {
        if self.added.remove(path).is_some() {
            return RemoveOutcome::Unstaged;
        }

        if self.tracked.contains_key(path) {
            self.removed.insert(path.to_string());
            return RemoveOutcome::Removed;
        }

        RemoveOutcome::Unchanged
    }

    /// Whether no additions or removals are pending
    pub fn is_clean(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Empty both pending sets
    pub fn clear(&mut self) {
        self.added.clear();
        self.removed.clear();
    }

    /// Drain the staging area into the next commit's snapshot
    ///
    /// Starts from the injected `tracked` view, applies pending additions,
    /// drops pending removals, and clears both sets.
    pub fn commit_drain(&mut self) -> BTreeMap<String, ObjectId> {
        let mut tracked = std::mem::take(&mut self.tracked);
        tracked.extend(std::mem::take(&mut self.added));
        for path in std::mem::take(&mut self.removed) {
            tracked.remove(&path);
        }

        self.tracked = tracked.clone();
        tracked
    }

    /// The snapshot the next commit would record: `(tracked ∪ added) \ removed`
    pub fn tracked_after_staging(&self) -> BTreeMap<String, ObjectId> {
        let mut effective = self.tracked.clone();
        effective.extend(self.added.clone());
        for path in &self.removed {
            effective.remove(path);
        }

        effective
    }

    pub fn added(&self) -> &BTreeMap<String, ObjectId> {
        &self.added
    }

    pub fn removed(&self) -> &BTreeSet<String> {
        &self.removed
    }

    pub fn tracked(&self) -> &BTreeMap<String, ObjectId> {
        &self.tracked
    }
}
