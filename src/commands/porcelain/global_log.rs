use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Print every commit reachable from any branch tip, newest first
    pub fn global_log(&mut self) -> anyhow::Result<()> {
        for (_, commit) in self.reachable_commits()? {
            write!(self.writer(), "{}", commit.log_entry()?)?;
        }

        Ok(())
    }
}
