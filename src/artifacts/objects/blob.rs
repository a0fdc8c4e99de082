//! Blob object
//!
//! A blob is an immutable snapshot of one working-tree file's content at a
//! moment in time. The source path is recorded alongside the raw bytes and is
//! mixed into the identity hash, so identical content at two different paths
//! yields two distinct blobs.
//!
//! ## Format
//!
//! On disk: `blob <size>\0<source-path>\n<content>`

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};
use std::path::Path;

/// File-content snapshot
///
/// Blobs are the fundamental unit of file storage. Each unique
/// (path, content) pair is stored once, identified by its SHA-1 hash.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    /// Absolute path of the file the content was read from
    source: String,
    /// Raw file content
    content: Bytes,
}

impl Blob {
    /// Get the absolute path the content was read from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Get the raw file content
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Write the stored bytes back to a file, overwriting any existing content
    pub fn restore(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, &self.content)
            .context(format!("Unable to restore blob to {}", path.display()))
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut content_bytes = Vec::new();
        content_bytes.write_all(self.source.as_bytes())?;
        content_bytes.write_all(b"\n")?;
        content_bytes.write_all(&self.content)?;

        let mut blob_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), content_bytes.len());
        blob_bytes.write_all(header.as_bytes())?;
        blob_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(blob_bytes))
    }
}

impl Unpackable for Blob {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let payload = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let split = payload
            .iter()
            .position(|&byte| byte == b'\n')
            .context("Invalid blob object: missing source path line")?;

        let source = String::from_utf8(payload[..split].to_vec())?;
        let content = Bytes::copy_from_slice(&payload[split + 1..]);

        Ok(Self::new(source, content))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn test_serialize_roundtrip_preserves_source_and_content() {
        let blob = Blob::new("/work/notes.txt".to_string(), Bytes::from_static(b"A\n"));
        let bytes = blob.serialize().unwrap();

        let mut reader = Cursor::new(bytes);
        ObjectType::parse_object_type(&mut reader).unwrap();
        let parsed = Blob::deserialize(reader).unwrap();

        assert_eq!(parsed, blob);
    }

    #[test]
    fn test_identical_content_at_different_paths_hashes_differently() {
        let left = Blob::new("/work/a.txt".to_string(), Bytes::from_static(b"same"));
        let right = Blob::new("/work/b.txt".to_string(), Bytes::from_static(b"same"));

        assert_ne!(left.object_id().unwrap(), right.object_id().unwrap());
    }

    #[test]
    fn test_same_blob_hashes_deterministically() {
        let blob = Blob::new("/work/a.txt".to_string(), Bytes::from_static(b"content"));

        assert_eq!(blob.object_id().unwrap(), blob.object_id().unwrap());
    }
}
