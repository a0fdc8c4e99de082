use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Path, PathBuf};

const IGNORED_PATHS: [&str; 3] = [".gitlet", ".", ".."];

/// Working tree
///
/// The set of regular files directly under the working root. Listing never
/// recurses: tracked paths are files only, directly under the root. All
/// paths handed out are absolute.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

/// Canonical string key for a working-tree path, used by snapshot maps
pub fn path_key(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve a user-supplied file name to an absolute path under the root
    ///
    /// Absolute paths are accepted as-is.
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        let path = Path::new(name);

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.path.join(path)
        }
    }

    /// List the regular files directly under the working root
    ///
    /// The metadata directory is excluded; the result is sorted so that
    /// callers observe a deterministic order.
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = std::fs::read_dir(&self.path)
            .context(format!(
                "Unable to list working directory {}",
                self.path.display()
            ))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && !Self::is_ignored(path))
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    pub fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let content = std::fs::read(file_path)
            .context(format!("Unable to read file {}", file_path.display()))?;

        Ok(content.into())
    }

    pub fn write_file(&self, file_path: &Path, content: &[u8]) -> anyhow::Result<()> {
        std::fs::write(file_path, content)
            .context(format!("Unable to write file {}", file_path.display()))
    }

    /// Delete a working-tree file; missing files are fine
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        if file_path.exists() {
            std::fs::remove_file(file_path)
                .context(format!("Unable to delete file {}", file_path.display()))?;
        }

        Ok(())
    }

    /// Snapshot a working-tree file into a blob
    pub fn parse_blob(&self, path: &Path) -> anyhow::Result<Blob> {
        let content = self.read_file(path)?;

        Ok(Blob::new(path_key(path), content))
    }

    fn is_ignored(path: &Path) -> bool {
        path.file_name()
            .map(|name| IGNORED_PATHS.contains(&name.to_string_lossy().as_ref()))
            .unwrap_or(true)
    }
}
