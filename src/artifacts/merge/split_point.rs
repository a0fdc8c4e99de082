//! Split-point finder for three-way merges
//!
//! The split point of two branch tips is their latest common ancestor: the
//! most recent commit reachable from both, preferring the newest when more
//! than one exists. It is the base against which a three-way merge decides,
//! per path, which side changed.
//!
//! ## Algorithm
//!
//! A bidirectional traversal over the commit DAG:
//! - Seed a priority queue with both tips, newest first
//! - Mark each commit with the side(s) it has been reached from
//! - Pop commits in reverse chronological order, inheriting visit marks
//!   down to parents
//! - The first popped commit already seen from the other side is the split
//!   point
//!
//! Processing newest-first guarantees that when several common ancestors
//! exist (criss-cross histories), the latest one wins. Ties on timestamp are
//! broken by commit id so the traversal is deterministic.
//!
//! ## Debug Logging
//!
//! Detailed traversal output is available behind the `debug_merge` feature
//! flag (`cargo build --features debug_merge`).

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::BinaryHeap;
use std::collections::HashMap;
use std::fmt;

macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            eprintln!($($arg)*);
        }
    };
}

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_HEAD = 0b01;
        const VISITED_FROM_OTHER = 0b10;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_HEAD.bits() | Self::VISITED_FROM_OTHER.bits();
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_HEAD) {
            flags.push("HEAD");
        }
        if self.contains(VisitState::VISITED_FROM_OTHER) {
            flags.push("OTHER");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Finds the split point between two branch tips
///
/// Takes a generic function that loads `SlimCommit` data for any commit id,
/// which keeps the traversal independent of the storage backend (object
/// database in production, an in-memory graph in tests).
pub struct SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    /// Function to load commit data for any given commit ID
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    /// Creates a new finder with the given commit loader function
    ///
    /// # Arguments
    ///
    /// * `commit_loader` - Function that takes a commit id and returns a
    ///   `SlimCommit` with its parent ids and timestamp. Root commits have
    ///   an empty parents vector.
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Find the latest common ancestor of `head` and `other`
    ///
    /// # Returns
    ///
    /// - `Some(id)` - The split point (one of the tips when they are related
    ///   by ancestry, the tip itself when both are equal)
    /// - `None` - No common ancestor exists (disjoint histories)
    pub fn find_split_point(
        &self,
        head: &ObjectId,
        other: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        if head == other {
            return Ok(Some(head.clone()));
        }

        let mut visit_states = HashMap::<ObjectId, VisitState>::new();
        let mut priority_queue = BinaryHeap::new();

        // Seed both tips; the max-heap pops the newest commit first
        let head_commit = (self.commit_loader)(head)?;
        let other_commit = (self.commit_loader)(other)?;

        visit_states.insert(head.clone(), VisitState::VISITED_FROM_HEAD);
        visit_states.insert(other.clone(), VisitState::VISITED_FROM_OTHER);
        priority_queue.push((head_commit.timestamp, head.clone()));
        priority_queue.push((other_commit.timestamp, other.clone()));

        while let Some((_, commit_id)) = priority_queue.pop() {
            let current_state = visit_states
                .get(&commit_id)
                .copied()
                .unwrap_or(VisitState::NONE);

            debug_log!("Processing commit {}: state={}", &commit_id, current_state);

            // Seen from both sides: this is the newest such commit
            if current_state.contains(VisitState::VISITED_FROM_BOTH) {
                return Ok(Some(commit_id));
            }

            let current_commit = (self.commit_loader)(&commit_id)?;

            for parent_id in &current_commit.parents {
                let parent_state = visit_states
                    .get(parent_id)
                    .copied()
                    .unwrap_or(VisitState::NONE);

                // Inherit visit state from the current commit; re-enqueue
                // only when the parent learns about a new side
                if !parent_state.contains(current_state) {
                    let parent_commit = (self.commit_loader)(parent_id)?;
                    visit_states.insert(parent_id.clone(), parent_state | current_state);
                    priority_queue.push((parent_commit.timestamp, parent_id.clone()));
                }
            }
        }

        Ok(None)
    }
}
