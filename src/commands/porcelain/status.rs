use crate::areas::repository::Repository;
use crate::areas::workspace::path_key;
use crate::artifacts::objects::object::Object;
use crate::artifacts::status::report::{ChangeKind, StatusReport};
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Print the reconciliation of working tree, staging area, and HEAD
    pub fn status(&mut self) -> anyhow::Result<()> {
        let report = self.build_status_report()?;
        write!(self.writer(), "{}", report)?;

        Ok(())
    }

    fn build_status_report(&self) -> anyhow::Result<StatusReport> {
        let current_branch = self.refs().current_branch()?;
        let other_branches = self
            .refs()
            .list_branches()?
            .into_iter()
            .filter(|branch| branch != &current_branch)
            .collect();

        let staging = self.staging()?;

        let mut staged = staging.added().keys().map(|path| basename(path)).collect::<Vec<_>>();
        staged.sort();

        let mut removed = staging.removed().iter().map(|path| basename(path)).collect::<Vec<_>>();
        removed.sort();

        // The staged view the next commit would record; iterating the map
        // visits paths in lexicographic order, as the section requires.
        let effective = staging.tracked_after_staging();

        let mut modifications = Vec::new();
        for (path, blob_id) in &effective {
            let file_path = Path::new(path);

            if self.workspace().file_exists(file_path) {
                let current_id = self.workspace().parse_blob(file_path)?.object_id()?;
                if &current_id != blob_id {
                    modifications.push((basename(path), ChangeKind::Modified));
                }
            } else {
                modifications.push((basename(path), ChangeKind::Deleted));
            }
        }

        let mut untracked = Vec::new();
        for file in self.workspace().list_files()? {
            let key = path_key(&file);
            if !effective.contains_key(&key) {
                untracked.push(basename(&key));
            }
        }
        untracked.sort();

        Ok(StatusReport {
            current_branch,
            other_branches,
            staged,
            removed,
            modifications,
            untracked,
        })
    }
}

/// Final path component, as shown in the status sections
fn basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}
