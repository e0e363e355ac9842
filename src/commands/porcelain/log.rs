use crate::areas::repository::Repository;
use crate::artifacts::errors::LitError;
use std::io::Write;

impl Repository {
    /// Print the first-parent history of the current branch, newest first
    ///
    /// Merge commits show both parents abbreviated but the walk only follows
    /// the first one.
    pub fn log(&mut self) -> anyhow::Result<()> {
        let state = self.load_state()?;
        let graph = self.graph();

        let mut next = Some(state.branches.current_head().clone());
        while let Some(oid) = next {
            let commit = graph.load(&oid)?;
            writeln!(self.writer(), "{}\n", commit.log_entry(&oid))?;
            next = commit.first_parent().cloned();
        }

        Ok(())
    }

    /// Print every commit ever made, regardless of reachability
    pub fn global_log(&mut self) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        let graph = self.graph();

        let mut commit_ids = graph.all_commit_ids()?;
        commit_ids.sort();

        for oid in commit_ids {
            let commit = graph.load(&oid)?;
            writeln!(self.writer(), "{}\n", commit.log_entry(&oid))?;
        }

        Ok(())
    }

    /// Print the ids of all commits with exactly the given message
    pub fn find(&mut self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        let graph = self.graph();

        let mut commit_ids = graph.all_commit_ids()?;
        commit_ids.sort();

        let mut found = false;
        for oid in commit_ids {
            let commit = graph.load(&oid)?;
            if commit.message() == message {
                writeln!(self.writer(), "{}", oid)?;
                found = true;
            }
        }

        if !found {
            return Err(LitError::NoSuchCommitMessage.into());
        }

        Ok(())
    }
}
