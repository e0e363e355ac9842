use crate::areas::repository::Repository;
use crate::artifacts::staging::AddOutcome;

impl Repository {
    /// Stage a file for addition
    ///
    /// Staging captures the file's content as it is right now. Adding a file
    /// that is staged for removal cancels the removal and restores the file.
    pub fn add(&mut self, path: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;
        let head = self.graph().load(state.branches.current_head())?;

        let working_content = self.workspace().read_file(path)?;
        let outcome = state.staging.stage_add(path, working_content, &head)?;

        if let AddOutcome::RestoredRemoval(content) = outcome {
            self.workspace().write_file(path, &content)?;
        }

        self.save_state(&state)
    }
}
