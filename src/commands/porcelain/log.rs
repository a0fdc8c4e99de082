use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Print the first-parent chain from HEAD down to the initial commit
    pub fn log(&mut self) -> anyhow::Result<()> {
        let mut commit = self.head_commit()?;

        loop {
            write!(self.writer(), "{}", commit.log_entry()?)?;

            match commit.first_parent().cloned() {
                Some(parent) => commit = self.database().load_commit(&parent)?,
                None => break,
            }
        }

        Ok(())
    }
}
