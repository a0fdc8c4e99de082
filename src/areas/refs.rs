//! References (branches and HEAD)
//!
//! References are human-readable names pointing at commits:
//! - Branches: `refs/heads/<name>` files containing a full 40-char commit id
//! - HEAD: a symbolic reference naming the current branch
//!
//! A branch always exists while HEAD is valid; detached HEAD is not
//! supported.
//!
//! ## File Format
//!
//! - `refs/heads/<name>`: the tip commit id
//! - `HEAD`: `ref: refs/heads/<name>`

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// Regex pattern for parsing the HEAD symbolic reference
const SYMREF_REGEX: &str = r"^ref: refs/heads/(.+)$";

/// Name of the HEAD reference file
const HEAD_FILE: &str = "HEAD";

/// Branch reference manager
///
/// Reads and writes branch tip files and the HEAD symbolic reference under
/// the metadata directory.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.gitlet`)
    path: Box<Path>,
}

impl Refs {
    /// Read the name of the branch HEAD currently designates
    pub fn current_branch(&self) -> anyhow::Result<String> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .context(format!("Unable to read HEAD at {}", head_path.display()))?;
        let content = content.trim();

        let captures = regex::Regex::new(SYMREF_REGEX)?
            .captures(content)
            .context(format!("Malformed HEAD reference: {:?}", content))?;

        Ok(captures[1].to_string())
    }

    /// Point HEAD at a branch
    pub fn set_current_branch(&self, branch_name: &str) -> anyhow::Result<()> {
        self.update_ref_file(
            self.head_path(),
            format!("ref: refs/heads/{}\n", branch_name),
        )
    }

    /// Read the tip commit id of a branch
    ///
    /// # Returns
    ///
    /// None if the branch does not exist
    pub fn branch_tip(&self, branch_name: &str) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.heads_path().join(branch_name);

        if !branch_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path).context(format!(
            "Unable to read branch ref at {}",
            branch_path.display()
        ))?;

        Ok(Some(ObjectId::try_parse(content.trim().to_string())?))
    }

    /// Advance (or create) a branch so its tip is the given commit
    pub fn set_branch_tip(&self, branch_name: &str, oid: &ObjectId) -> anyhow::Result<()> {
        let branch_path = self.heads_path().join(branch_name).into_boxed_path();

        self.update_ref_file(branch_path, oid.as_ref().to_string())
    }

    pub fn branch_exists(&self, branch_name: &str) -> bool {
        self.heads_path().join(branch_name).exists()
    }

    /// Delete a branch reference
    pub fn delete_branch(&self, branch_name: &str) -> anyhow::Result<()> {
        let branch_path = self.heads_path().join(branch_name);

        std::fs::remove_file(&branch_path).context(format!(
            "Unable to delete branch ref at {}",
            branch_path.display()
        ))
    }

    /// List all branch names in lexicographic order
    pub fn list_branches(&self) -> anyhow::Result<Vec<String>> {
        let heads_path = self.heads_path();

        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                if entry.path().is_file() {
                    let relative_path = entry.path().strip_prefix(&heads_path).ok()?;
                    Some(relative_path.to_string_lossy().to_string())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();
        branches.sort();

        Ok(branches)
    }

    fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        // create all the parent directories if they don't exist
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.clone())
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_FILE).into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.path.join("refs").join("heads").into_boxed_path()
    }
}
