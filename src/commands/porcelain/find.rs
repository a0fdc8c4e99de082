use crate::areas::repository::Repository;
use crate::artifacts::core::GitletError;
use std::io::Write;

impl Repository {
    /// Print the ids of all commits whose message equals the given string
    pub fn find(&mut self, message: &str) -> anyhow::Result<()> {
        let matches = self
            .reachable_commits()?
            .into_iter()
            .filter(|(_, commit)| commit.message() == message)
            .collect::<Vec<_>>();

        if matches.is_empty() {
            return Err(GitletError::NoSuchMessage.into());
        }

        for (commit_id, _) in matches {
            writeln!(self.writer(), "{}", commit_id)?;
        }

        Ok(())
    }
}
