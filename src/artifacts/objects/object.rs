//! Core object traits
//!
//! This module defines the traits implemented by both stored object kinds:
//! - `Packable`: Serialization to the on-disk envelope format
//! - `Unpackable`: Deserialization from the envelope format
//! - `Object`: Common object operations (ID computation, type tag)
//!
//! ## Object Format
//!
//! All objects are stored as:
//! ```text
//! <type> <size>\0<content>
//! ```
//! under `.gitlet/objects/`, keyed by the SHA-1 of those bytes. Because the
//! id is the digest of the serialized form, identical content always lands
//! at the same path and storing is idempotent.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;
use std::path::PathBuf;

/// Trait for serializing objects to the envelope format
pub trait Packable {
    /// Serialize the object to bytes (including header)
    fn serialize(&self) -> Result<Bytes>;
}

/// Trait for deserializing objects from the envelope format
pub trait Unpackable {
    /// Deserialize the object from a reader (header already consumed)
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

/// Core stored-object trait
///
/// Implemented by `Blob` and `Commit`. The identity of an object is a pure
/// function of its serialized content, so two objects with identical content
/// produce the same id.
pub trait Object: Packable {
    /// Get the object's type
    fn object_type(&self) -> ObjectType;

    /// Compute the object ID (SHA-1 hash)
    ///
    /// The ID is computed by hashing the serialized content.
    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        let mut hasher = Sha1::new();
        hasher.update(&content);

        let oid = hasher.finalize();
        ObjectId::try_parse(format!("{oid:x}"))
    }

    /// Get the file system path where this object would be stored
    fn object_path(&self) -> Result<PathBuf> {
        Ok(self.object_id()?.to_path())
    }
}
