use crate::areas::repository::Repository;

impl Repository {
    /// Create a new branch pointing at the current head, without switching
    pub fn branch(&mut self, name: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;
        state.branches.create(name)?;
        self.save_state(&state)
    }

    /// Delete a branch pointer, leaving its commits in place
    pub fn rm_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;
        state.branches.remove(name)?;
        self.save_state(&state)
    }
}
