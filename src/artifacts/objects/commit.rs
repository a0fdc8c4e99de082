//! Commit object
//!
//! Commits are the immutable nodes of the history DAG. Each one records:
//! - A creation timestamp (epoch 0 for the initial commit)
//! - The commit message
//! - Parent commit id(s): none for the initial commit, one for an ordinary
//!   commit, two for a merge commit
//! - The tracked-files snapshot (absolute path -> blob id)
//!
//! Parents are referred to by id only; parent objects are never embedded.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! timestamp <formatted>
//! parent <parent-id>
//! tracked <blob-id> <path>
//!
//! <commit message>
//! ```

use crate::areas::database::Database;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::Path;

/// Timestamp layout used for both log output and identity hashing,
/// e.g. `Wed Dec 31 16:00:00 1969 -0800`
const TIMESTAMP_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";

/// Message of the commit created by `init`
const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Slim representation of a commit
///
/// Contains only the fields needed by graph traversal algorithms such as
/// split-point finding.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    /// The commit's object ID
    pub oid: ObjectId,
    /// The commit's parent object IDs
    pub parents: Vec<ObjectId>,
    /// Commit timestamp (needed for traversal ordering)
    pub timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl PartialOrd for SlimCommit {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SlimCommit {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.timestamp.cmp(&other.timestamp)
    }
}

/// Commit object
///
/// A snapshot of the tracked working-tree files plus history metadata.
/// The id is a pure function of the serialized content, so a commit loaded
/// back from the store hashes to the id it was stored under.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Creation timestamp
    timestamp: chrono::DateTime<chrono::FixedOffset>,
    /// Commit message
    message: String,
    /// Parent commit IDs (empty for the initial commit, two for merges)
    parents: Vec<ObjectId>,
    /// Tracked files snapshot: absolute path -> blob id
    tracked: BTreeMap<String, ObjectId>,
}

impl Commit {
    /// Create an ordinary commit stamped with the current wall-clock time
    ///
    /// # Arguments
    ///
    /// * `parents` - Parent commit IDs (one, or two for a merge)
    /// * `message` - Commit message
    /// * `tracked` - Snapshot map produced by draining the staging area
    pub fn new(
        parents: Vec<ObjectId>,
        message: String,
        tracked: BTreeMap<String, ObjectId>,
    ) -> Self {
        Commit {
            timestamp: chrono::Local::now().fixed_offset(),
            message,
            parents,
            tracked,
        }
    }

    /// Create the initial commit: epoch-0 timestamp, no parents, empty snapshot
    pub fn initial() -> Self {
        let epoch = chrono::DateTime::from_timestamp(0, 0)
            .unwrap_or_default()
            .with_timezone(&chrono::Local)
            .fixed_offset();

        Commit {
            timestamp: epoch,
            message: INITIAL_COMMIT_MESSAGE.to_string(),
            parents: Vec::new(),
            tracked: BTreeMap::new(),
        }
    }

    /// Get the commit message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the first parent, if any
    pub fn first_parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn tracked(&self) -> &BTreeMap<String, ObjectId> {
        &self.tracked
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }

    /// Format the timestamp in the log layout
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Re-materialize the blob tracked at `path` into the working tree
    ///
    /// # Returns
    ///
    /// false if the commit does not track `path`
    pub fn restore_tracked(&self, path: &str, database: &Database) -> anyhow::Result<bool> {
        match self.tracked.get(path) {
            Some(blob_id) => {
                let blob = database
                    .parse_object_as_blob(blob_id)?
                    .context(format!("Blob {} missing from the object store", blob_id))?;
                blob.restore(Path::new(path))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Re-materialize the full snapshot in the working tree
    pub fn restore_all_tracked(&self, database: &Database) -> anyhow::Result<()> {
        for path in self.tracked.keys() {
            self.restore_tracked(path, database)?;
        }

        Ok(())
    }

    /// Format the log entry for this commit
    ///
    /// ```text
    /// ===
    /// commit <id>
    /// Merge: <parent1-short> <parent2-short>    (merge commits only)
    /// Date: <timestamp>
    /// <message>
    /// ```
    /// followed by a blank line.
    pub fn log_entry(&self) -> anyhow::Result<String> {
        let mut lines = vec![
            "===".to_string(),
            format!("commit {}", self.object_id()?),
        ];

        if let [first, second] = self.parents.as_slice() {
            lines.push(format!(
                "Merge: {} {}",
                first.to_short_oid(),
                second.to_short_oid()
            ));
        }

        lines.push(format!("Date: {}", self.readable_timestamp()));
        lines.push(self.message.clone());
        lines.push(String::new());
        lines.push(String::new());

        Ok(lines.join("\n"))
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![format!("timestamp {}", self.readable_timestamp())];

        for parent in &self.parents {
            object_content.push(format!("parent {}", parent.as_ref()));
        }
        for (path, blob_id) in &self.tracked {
            object_content.push(format!("tracked {} {}", blob_id.as_ref(), path));
        }
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        let object_content = object_content.join("\n");

        let mut content_bytes = Vec::new();
        content_bytes.write_all(object_content.as_bytes())?;

        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), content_bytes.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)?;
        let mut lines = content.lines();

        let timestamp_line = lines
            .next()
            .context("Invalid commit object: missing timestamp line")?;
        let timestamp = timestamp_line
            .strip_prefix("timestamp ")
            .context("Invalid commit object: invalid timestamp line")?;
        let timestamp = chrono::DateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
            .context("Invalid commit object: unparseable timestamp")?;

        let mut parents = Vec::new();
        let mut tracked = BTreeMap::new();

        for line in lines.by_ref() {
            if line.is_empty() {
                break;
            }

            if let Some(parent_oid) = line.strip_prefix("parent ") {
                parents.push(ObjectId::try_parse(parent_oid.to_string())?);
            } else if let Some(entry) = line.strip_prefix("tracked ") {
                let (blob_id, path) = entry
                    .split_once(' ')
                    .context("Invalid commit object: invalid tracked line")?;
                tracked.insert(path.to_string(), ObjectId::try_parse(blob_id.to_string())?);
            } else {
                anyhow::bail!("Invalid commit object: unexpected line {:?}", line);
            }
        }

        let message = lines.collect::<Vec<&str>>().join("\n");

        Ok(Commit {
            timestamp,
            message,
            parents,
            tracked,
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
