//! Checkout engine
//!
//! Materializes committed content into the working tree, for a single file
//! or for a whole commit snapshot. Whole-snapshot checkouts refuse to touch
//! anything while an untracked working file would be overwritten, so a failed
//! checkout leaves the working tree exactly as it was.

use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::errors::LitError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::staging::StagingArea;

pub struct CheckoutEngine<'a> {
    database: &'a Database,
    workspace: &'a Workspace,
}

impl<'a> CheckoutEngine<'a> {
    pub fn new(database: &'a Database, workspace: &'a Workspace) -> Self {
        Self {
            database,
            workspace,
        }
    }

    /// Write one file from a commit snapshot into the working tree,
    /// overwriting whatever is there
    pub fn checkout_file(&self, commit: &Commit, path: &str) -> anyhow::Result<()> {
        let blob_id = commit.blob_id(path).ok_or(LitError::FileNotInCommit)?;
        let blob = self.database.load_blob(blob_id)?;
        self.workspace.write_file(path, blob.content())
    }

    /// Replace the working tree content of `old` with the snapshot of
    /// `target`
    ///
    /// Fails without touching anything if an untracked working file (not in
    /// `old`, not staged) would be overwritten. Files tracked by `old` but
    /// absent from `target` are deleted.
    pub fn checkout_commit(
        &self,
        staging: &StagingArea,
        old: &Commit,
        target: &Commit,
    ) -> anyhow::Result<()> {
        for path in self.workspace.list_files()? {
            let untracked = !old.tracks(&path) && !staging.contains(&path);
            if untracked && target.tracks(&path) {
                return Err(LitError::UntrackedFileWouldBeOverwritten.into());
            }
        }

        for path in old.files().keys() {
            if !target.tracks(path) {
                self.workspace.remove_file(path)?;
            }
        }

        for path in target.files().keys() {
            self.checkout_file(target, path)?;
        }

        Ok(())
    }
}
