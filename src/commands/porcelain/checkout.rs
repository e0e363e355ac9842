use crate::areas::repository::Repository;
use crate::artifacts::errors::LitError;

impl Repository {
    /// Restore a file from the current head commit
    pub fn checkout_head_file(&mut self, path: &str) -> anyhow::Result<()> {
        let state = self.load_state()?;
        let head = self.graph().load(state.branches.current_head())?;

        self.checkout_engine().checkout_file(&head, path)
    }

    /// Restore a file from a given commit, full id or unique prefix
    pub fn checkout_commit_file(&mut self, id_or_prefix: &str, path: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        let (_, commit) = self.graph().resolve(id_or_prefix)?;

        self.checkout_engine().checkout_file(&commit, path)
    }

    /// Switch to another branch, replacing the working tree with its head
    /// snapshot and clearing the staging area
    pub fn checkout_branch(&mut self, branch: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;

        if !state.branches.contains(branch) {
            return Err(LitError::NoSuchBranchToCheckout.into());
        }
        if branch == state.branches.current() {
            return Err(LitError::CheckoutCurrentBranch.into());
        }

        let graph = self.graph();
        let head = graph.load(state.branches.current_head())?;
        let target = graph.load(state.branches.head(branch)?)?;

        self.checkout_engine()
            .checkout_commit(&state.staging, &head, &target)?;

        state.branches.switch_to(branch)?;
        state.staging.clear();
        self.save_state(&state)
    }
}
