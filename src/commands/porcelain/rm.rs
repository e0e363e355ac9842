use crate::areas::repository::Repository;

impl Repository {
    /// Stage a file for removal
    ///
    /// A tracked file is deleted from the working tree as well; a file that
    /// was only staged for addition is merely unstaged.
    pub fn rm(&mut self, path: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;
        let head = self.graph().load(state.branches.current_head())?;

        let working_content = self.workspace().read_file(path)?;
        if state.staging.stage_remove(path, &head, working_content)? {
            self.workspace().remove_file(path)?;
        }

        self.save_state(&state)
    }
}
