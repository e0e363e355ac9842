use crate::areas::repository::Repository;
use crate::artifacts::merge::MergeOutcome;
use std::io::Write;

pub const FAST_FORWARD_NOTICE: &str = "Current branch fast-forwarded.";
pub const CONFLICT_NOTICE: &str = "Encountered a merge conflict.";

impl Repository {
    /// Merge another branch into the current one
    pub fn merge(&mut self, other_branch: &str) -> anyhow::Result<()> {
        self.merge_at(other_branch, chrono::Local::now().fixed_offset())
    }

    pub fn merge_at(
        &mut self,
        other_branch: &str,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> anyhow::Result<()> {
        let mut state = self.load_state()?;

        let outcome = self
            .merge_engine()
            .merge(&mut state, other_branch, timestamp)?;
        self.save_state(&state)?;

        match outcome {
            MergeOutcome::FastForwarded { .. } => {
                writeln!(self.writer(), "{}", FAST_FORWARD_NOTICE)?;
            }
            MergeOutcome::Merged { conflicted, .. } => {
                if conflicted {
                    writeln!(self.writer(), "{}", CONFLICT_NOTICE)?;
                }
            }
        }

        Ok(())
    }
}
