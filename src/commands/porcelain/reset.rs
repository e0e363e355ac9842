use crate::areas::repository::Repository;

impl Repository {
    /// Move the current branch to an arbitrary commit and check it out
    ///
    /// The commit may be given as a full id or a unique prefix. The staging
    /// area is cleared.
    pub fn reset(&mut self, id_or_prefix: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;

        let graph = self.graph();
        let (target_id, target) = graph.resolve(id_or_prefix)?;
        let head = graph.load(state.branches.current_head())?;

        self.checkout_engine()
            .checkout_commit(&state.staging, &head, &target)?;

        let current_branch = state.branches.current().to_string();
        state.branches.set_head(&current_branch, target_id)?;
        state.staging.clear();
        self.save_state(&state)
    }
}
