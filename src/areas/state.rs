//! Repository state record
//!
//! Everything mutable about the repository that is not an object: the branch
//! table and the staging area, persisted as one versioned JSON file at
//! `.lit/state`. Saves go through a temp file and a rename, so a crash mid
//! write never corrupts the record.

use crate::artifacts::branch::BranchTable;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::staging::StagingArea;
use anyhow::Context;
use fake::rand;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const STATE_FILE: &str = "state";
pub const STATE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoState {
    version: u32,
    pub branches: BranchTable,
    pub staging: StagingArea,
}

impl RepoState {
    /// Initial state: one branch at the root commit, empty staging area
    pub fn bootstrap(initial_branch: &str, root: ObjectId) -> Self {
        RepoState {
            version: STATE_VERSION,
            branches: BranchTable::bootstrap(initial_branch, root),
            staging: StagingArea::default(),
        }
    }

    pub fn load(repo_path: &Path) -> anyhow::Result<Self> {
        let state_path = repo_path.join(STATE_FILE);
        let content = std::fs::read(&state_path).context(format!(
            "Unable to read state file {}",
            state_path.display()
        ))?;

        let state: RepoState =
            serde_json::from_slice(&content).context("Unable to parse state file")?;
        anyhow::ensure!(
            state.version == STATE_VERSION,
            "Unsupported state record version {}",
            state.version
        );

        Ok(state)
    }

    pub fn save(&self, repo_path: &Path) -> anyhow::Result<()> {
        let state_path = repo_path.join(STATE_FILE);
        let temp_path = repo_path.join(format!("tmp-state-{}", rand::random::<u32>()));

        let content = serde_json::to_vec_pretty(self).context("Unable to serialize state")?;
        std::fs::write(&temp_path, content).context(format!(
            "Unable to write state file {}",
            temp_path.display()
        ))?;

        // rename to make the save atomic
        std::fs::rename(&temp_path, &state_path).context(format!(
            "Unable to rename state file to {}",
            state_path.display()
        ))
    }
}
