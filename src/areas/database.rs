//! Object database
//!
//! The database stores all engine objects (blobs and commits) using
//! content-addressable storage. Objects are identified by their SHA-1 hash
//! and stored in a directory structure based on the hash prefix for
//! efficient lookup.
//!
//! ## Storage Format
//!
//! Objects are stored as:
//! - Path: `.gitlet/objects/ab/cdef123...` (first 2 chars as directory, rest as filename)
//! - Content: `<type> <size>\0<payload>`, where the type tag lets lookups
//!   decide the kind of an object without deserializing it into the wrong shape

use crate::artifacts::core::GitletError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Write};
use std::path::{Path, PathBuf};

/// Shortest accepted abbreviated commit id
const MIN_PREFIX_LENGTH: usize = 4;

/// Content-addressed object store
///
/// Manages storage and retrieval of blobs and commits. Because objects are
/// keyed by the hash of their serialized form, storing is idempotent: saving
/// the same content twice yields the same id and a single on-disk object.
#[derive(Debug)]
pub struct Database {
    /// Path to the objects directory (typically `.gitlet/objects`)
    path: Box<Path>,
}

impl Database {
    /// Create a new database instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the objects directory (typically `.gitlet/objects`)
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    /// Get the path to the objects directory
    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store an object in the database
    ///
    /// The object is serialized and written to the path derived from its
    /// SHA-1 hash. If the object already exists, this is a no-op.
    ///
    /// # Returns
    ///
    /// The id the object is stored under
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object_id.to_path());

        // write the object to disk unless it already exists
        if !object_path.exists() {
            std::fs::create_dir_all(
                object_path
                    .parent()
                    .context(format!("Invalid object path {}", object_path.display()))?,
            )
            .context(format!(
                "Unable to create object directory {}",
                object_path.display()
            ))?;

            self.write_object(object_path, object.serialize()?)?;
        }

        Ok(object_id)
    }

    /// Parse an object as a Blob, if it is one
    ///
    /// # Returns
    ///
    /// Some(Blob) if the object is a blob, None otherwise
    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Option<Blob>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(Some(Blob::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    /// Parse an object as a Commit, if it is one
    ///
    /// # Returns
    ///
    /// Some(Commit) if the object is a commit, None otherwise
    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Option<Commit>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => Ok(Some(Commit::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    /// Load a commit that history bookkeeping guarantees to exist
    ///
    /// Branch tips and parent ids always designate stored commits, so a miss
    /// here is a corrupted repository rather than a user error.
    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        self.parse_object_as_commit(object_id)?
            .context(format!("Object {} is not a stored commit", object_id))
    }

    /// Load the slim representation of a commit for graph traversal
    pub fn slim_commit(&self, object_id: &ObjectId) -> anyhow::Result<SlimCommit> {
        let commit = self.load_commit(object_id)?;

        Ok(SlimCommit {
            oid: object_id.clone(),
            parents: commit.parents().to_vec(),
            timestamp: commit.timestamp(),
        })
    }

    /// Get the type of an object without deserializing its payload
    pub fn object_kind(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        let (object_type, _) = self.parse_object_as_bytes(object_id)?;
        Ok(object_type)
    }

    /// Expand an abbreviated commit id to a full id
    ///
    /// Blobs share the store namespace, so only commit-typed matches count.
    ///
    /// # Errors
    ///
    /// * `ShortId` for prefixes under 4 characters
    /// * `AmbiguousId` when more than one commit matches
    /// * `NoSuchCommit` when none does
    pub fn resolve_commit_prefix(&self, prefix: &str) -> anyhow::Result<ObjectId> {
        if prefix.len() < MIN_PREFIX_LENGTH {
            return Err(GitletError::ShortId.into());
        }
        if prefix.len() > OBJECT_ID_LENGTH || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GitletError::NoSuchCommit.into());
        }

        let mut matches = Vec::new();
        for object_id in self.find_objects_by_prefix(prefix)? {
            if self.object_kind(&object_id)? == ObjectType::Commit {
                matches.push(object_id);
            }
        }

        match matches.as_slice() {
            [] => Err(GitletError::NoSuchCommit.into()),
            [object_id] => Ok(object_id.clone()),
            _ => Err(GitletError::AmbiguousId.into()),
        }
    }

    /// Find all objects whose id starts with the given prefix
    ///
    /// Accepted prefixes are at least 4 characters, so the search always
    /// narrows to a single shard directory.
    fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let dir_name = &prefix[..2];
        let file_prefix = &prefix[2..];
        let dir_path = self.path.join(dir_name);

        let mut matches = Vec::new();

        if dir_path.is_dir() {
            for entry in std::fs::read_dir(&dir_path)? {
                let entry = entry?;
                let file_name = entry.file_name();
                let file_name_str = file_name.to_string_lossy();

                if file_name_str.starts_with(file_prefix) {
                    let full_oid = format!("{}{}", dir_name, file_name_str);
                    if let Ok(oid) = ObjectId::try_parse(full_oid) {
                        matches.push(oid);
                    }
                }
            }
        }

        Ok(matches)
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let object_path = self.path.join(object_id.to_path());
        let object_content = self.read_object(object_path)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader)?;

        Ok((object_type, object_reader))
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Ok(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
