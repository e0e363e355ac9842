use crate::areas::repository::{DEFAULT_BRANCH, Repository};
use crate::areas::state::RepoState;
use crate::artifacts::errors::LitError;
use crate::artifacts::objects::commit::FileSnapshot;

pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

impl Repository {
    /// Create the repository directory, the root commit and the state record
    ///
    /// The root commit is identical in every repository: no parents, no
    /// files, the Unix epoch as its timestamp.
    pub fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(LitError::AlreadyInitialized.into());
        }

        std::fs::create_dir_all(self.repo_path())?;
        self.database().init()?;

        let (root_id, _) = self.graph().create(
            vec![],
            ROOT_COMMIT_MESSAGE.to_string(),
            chrono::DateTime::UNIX_EPOCH.fixed_offset(),
            FileSnapshot::new(),
        )?;

        let state = RepoState::bootstrap(DEFAULT_BRANCH, root_id);
        self.save_state(&state)?;

        Ok(())
    }
}
