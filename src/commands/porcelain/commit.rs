use crate::areas::repository::Repository;
use crate::artifacts::errors::LitError;

impl Repository {
    /// Record the staged snapshot as a new commit on the current branch
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        self.commit_at(message, chrono::Local::now().fixed_offset())
    }

    pub fn commit_at(
        &mut self,
        message: &str,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> anyhow::Result<()> {
        if message.trim().is_empty() {
            return Err(LitError::EmptyCommitMessage.into());
        }

        let mut state = self.load_state()?;
        if state.staging.is_empty() {
            return Err(LitError::NoChangesToCommit.into());
        }

        let current_head = state.branches.current_head().clone();
        let parent = self.graph().load(&current_head)?;

        let files = state
            .staging
            .snapshot(parent.files(), |blob| self.database().store(&blob))?;
        let (commit_id, _) =
            self.graph()
                .create(vec![current_head], message.to_string(), timestamp, files)?;

        let current_branch = state.branches.current().to_string();
        state.branches.set_head(&current_branch, commit_id)?;
        state.staging.clear();

        self.save_state(&state)
    }
}
